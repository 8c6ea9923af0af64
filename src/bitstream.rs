//! # 像素位流模块
//!
//! 线性位索引 `i` 映射到像素 `(i mod W, i div W)`，从 `(0, 0)` 开始按行扫描。
//! 每个字节按 MSB 优先拆成 8 位，第 `i` 位属于第 `i / 8` 个字节的第 `i % 8` 位。

use crate::bits::{bit_at, push_bit, to_binary_string};
use crate::error::{Result, StegoError};
use crate::raster::{EmbedChannels, RasterBuffer};
use log::trace;

/// 从位索引 0 开始顺序写入的位流。
pub struct PixelWriter<'a> {
    raster: &'a mut RasterBuffer,
    channels: EmbedChannels,
    position: u64,
}

impl<'a> PixelWriter<'a> {
    pub fn new(raster: &'a mut RasterBuffer, channels: EmbedChannels) -> Self {
        Self {
            raster,
            channels,
            position: 0,
        }
    }

    /// 下一个要写入的位索引。
    pub fn position(&self) -> u64 {
        self.position
    }

    /// 剩余可写的位数。
    pub fn remaining_bits(&self) -> u64 {
        self.raster.pixel_count().saturating_sub(self.position)
    }

    /// 写入全部字节。
    ///
    /// # Errors
    ///
    /// 剩余像素不足以容纳 `bytes.len() * 8` 位时返回 [`StegoError::FrameOverflow`]，
    /// 此时不会修改任何像素。
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let needed = bytes.len() as u64 * 8;
        if needed > self.remaining_bits() {
            return Err(StegoError::FrameOverflow {
                frame_bits: self.position + needed,
                pixels: self.raster.pixel_count(),
            });
        }
        self.write_truncated(bytes);
        Ok(())
    }

    /// 尽可能多地写入，像素用完即停止。返回实际写入的位数。
    pub fn write_truncated(&mut self, bytes: &[u8]) -> u64 {
        let start = self.position;
        'bytes: for &byte in bytes {
            trace!("bit {:>8}: {}", self.position, to_binary_string(byte));
            for position in 0..8 {
                if self.remaining_bits() == 0 {
                    break 'bytes;
                }
                self.write_bit(bit_at(byte, position));
            }
        }
        self.position - start
    }

    fn write_bit(&mut self, bit: u8) {
        let (x, y) = self.raster.coordinate(self.position);
        let rgb = self.channels.embed(self.raster.rgb(x, y), bit);
        self.raster.set_rgb(x, y, rgb);
        self.position += 1;
    }
}

/// 按 `(起始字节, 字节数)` 随机读取的位流。
pub struct PixelReader<'a> {
    raster: &'a RasterBuffer,
    channels: EmbedChannels,
}

impl<'a> PixelReader<'a> {
    pub fn new(raster: &'a RasterBuffer, channels: EmbedChannels) -> Self {
        Self { raster, channels }
    }

    /// 读取从帧内第 `start_byte` 个字节开始的 `len` 个字节。
    ///
    /// # Errors
    ///
    /// 读取范围超出图像像素时返回 [`StegoError::MalformedHeader`]。
    pub fn read(&self, start_byte: u64, len: u64) -> Result<Vec<u8>> {
        let pixels = self.raster.pixel_count();
        let end_bit = start_byte
            .checked_add(len)
            .and_then(|end| end.checked_mul(8))
            .filter(|&end_bit| end_bit <= pixels)
            .ok_or_else(|| {
                StegoError::MalformedHeader(format!(
                    "{len} bytes at offset {start_byte} extend beyond the {pixels} pixels of the image"
                ))
            })?;

        let first_bit = start_byte * 8;
        let mut bytes = vec![0u8; len as usize];
        for bit_index in first_bit..end_bit {
            let (x, y) = self.raster.coordinate(bit_index);
            let bit = self.channels.extract(self.raster.rgb(x, y));
            let slot = &mut bytes[((bit_index - first_bit) / 8) as usize];
            *slot = push_bit(*slot, bit);
        }
        Ok(bytes)
    }
}
