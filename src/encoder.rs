//! # 编码模块
//!
//! 帧布局：
//!
//! ```text
//! | payload_len | name_len | name | payload | padding              |
//! | u32 LE      | u32 LE   |      |         | 8 + name_len 个零字节 |
//! ```
//!
//! 尾部填充不携带信息，只在还有剩余像素时写入，像素不够时被截断。

use crate::bitstream::PixelWriter;
use crate::capacity::max_bytes;
use crate::error::{Result, StegoError};
use crate::header::FrameHeader;
use crate::raster::{EmbedChannels, RasterBuffer};
use log::{debug, info};

/// 将 `payload` 连同 `name` 嵌入 `carrier` 的副本，返回新的图像。
///
/// # Errors
///
/// * [`StegoError::NonAsciiName`]：名称不是 ASCII。
/// * [`StegoError::CapacityExceeded`]：数据长度超过 [`max_bytes`]。
/// * [`StegoError::FrameOverflow`]：帧头加数据超出像素总数。
pub fn encode(payload: &[u8], name: &str, carrier: &RasterBuffer) -> Result<RasterBuffer> {
    encode_with_channels(payload, name, carrier, EmbedChannels::RGB)
}

/// 与 [`encode`] 相同，但可以指定参与嵌入的颜色通道。
pub fn encode_with_channels(
    payload: &[u8],
    name: &str,
    carrier: &RasterBuffer,
    channels: EmbedChannels,
) -> Result<RasterBuffer> {
    let header = FrameHeader::new(payload.len(), name)?;

    let max = max_bytes(carrier);
    if payload.len() as u64 > max {
        return Err(StegoError::CapacityExceeded {
            requested: payload.len() as u64,
            max,
        });
    }

    let frame = build_frame(&header, payload);
    let informative = header.encoded_len() + payload.len();
    let frame_bits = informative as u64 * 8;
    if frame_bits > carrier.pixel_count() {
        return Err(StegoError::FrameOverflow {
            frame_bits,
            pixels: carrier.pixel_count(),
        });
    }
    debug!(
        "Frame: header {} bytes, payload {} bytes, padding {} bytes, image {}x{}",
        header.encoded_len(),
        payload.len(),
        frame.len() - informative,
        carrier.width(),
        carrier.height()
    );

    let mut hidden = carrier.clone();
    let mut writer = PixelWriter::new(&mut hidden, channels);
    writer.write(&frame[..informative])?;
    let padding_bits = writer.write_truncated(&frame[informative..]);
    debug!(
        "Wrote {} frame bits ({} of them padding)",
        writer.position(),
        padding_bits
    );

    info!("Embedded {} bytes as {:?}", payload.len(), name);
    Ok(hidden)
}

/// 分配 `payload_len + 2 × header_len` 字节的缓冲区，写入帧头和数据，其余保持为零。
fn build_frame(header: &FrameHeader, payload: &[u8]) -> Vec<u8> {
    let header_bytes = header.to_bytes();
    let mut frame = vec![0u8; payload.len() + 2 * header_bytes.len()];
    frame[..header_bytes.len()].copy_from_slice(&header_bytes);
    frame[header_bytes.len()..header_bytes.len() + payload.len()].copy_from_slice(payload);
    frame
}
