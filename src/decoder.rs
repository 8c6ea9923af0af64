//! # 解码模块
//!
//! 先读取两个定长长度字段，再根据长度读取名称和数据。解码只读取像素，
//! 对同一幅图像多次解码总是得到相同的结果。

use crate::bitstream::PixelReader;
use crate::capacity::available_bits;
use crate::constants::FIXED_HEADER_BYTES;
use crate::error::{Result, StegoError};
use crate::header::{FrameLengths, decode_name, parse_lengths};
use crate::raster::{EmbedChannels, RasterBuffer};
use log::debug;

/// 从隐写图像中恢复的文件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenFile {
    pub name: String,
    pub payload: Vec<u8>,
}

/// 读取帧头中的名称。
pub fn read_name(hidden: &RasterBuffer) -> Result<String> {
    let reader = PixelReader::new(hidden, EmbedChannels::RGB);
    let lengths = read_lengths(&reader, hidden)?;
    read_name_field(&reader, &lengths)
}

/// 跳过名称，读取被隐藏的数据。
pub fn read_payload(hidden: &RasterBuffer) -> Result<Vec<u8>> {
    let reader = PixelReader::new(hidden, EmbedChannels::RGB);
    let lengths = read_lengths(&reader, hidden)?;
    reader.read(lengths.payload_offset(), u64::from(lengths.payload_len))
}

/// 一次性读取名称和数据。
pub fn decode(hidden: &RasterBuffer) -> Result<HiddenFile> {
    decode_with_channels(hidden, EmbedChannels::RGB)
}

/// 与 [`decode`] 相同，但可以指定参与嵌入的颜色通道。
pub fn decode_with_channels(hidden: &RasterBuffer, channels: EmbedChannels) -> Result<HiddenFile> {
    let reader = PixelReader::new(hidden, channels);
    let lengths = read_lengths(&reader, hidden)?;
    let name = read_name_field(&reader, &lengths)?;
    let payload = reader.read(lengths.payload_offset(), u64::from(lengths.payload_len))?;
    Ok(HiddenFile { name, payload })
}

/// 读取并校验两个长度字段：声明的帧必须能放进图像的像素中。
fn read_lengths(reader: &PixelReader<'_>, hidden: &RasterBuffer) -> Result<FrameLengths> {
    let fixed: [u8; FIXED_HEADER_BYTES] = reader
        .read(0, FIXED_HEADER_BYTES as u64)?
        .try_into()
        .map_err(|_| StegoError::MalformedHeader("short length fields".to_owned()))?;
    let lengths = parse_lengths(fixed);

    let needed_bits = lengths.informative_len() * 8;
    let pixels = available_bits(hidden);
    if needed_bits > pixels {
        return Err(StegoError::MalformedHeader(format!(
            "declared name length {} and payload length {} need {} pixels, image has {}",
            lengths.name_len, lengths.payload_len, needed_bits, pixels
        )));
    }
    debug!(
        "Header: payload {} bytes, name {} bytes",
        lengths.payload_len, lengths.name_len
    );
    Ok(lengths)
}

fn read_name_field(reader: &PixelReader<'_>, lengths: &FrameLengths) -> Result<String> {
    decode_name(reader.read(lengths.name_offset(), u64::from(lengths.name_len))?)
}
