//! # 容量计算模块
//!
//! 每个像素承载一位数据，因此 `W·H` 个像素最多容纳 `W·H` 位。

use crate::constants::{BITS_PER_PIXEL, CAPACITY_HEADROOM_PIXELS, FIXED_HEADER_BYTES};
use crate::raster::RasterBuffer;

/// 建议容量 (字节)：`floor((W·H − 8) / 8)`。
///
/// 只由图像尺寸决定，不考虑帧头开销。小于 8 个像素的图像容量为 0。
pub fn max_bytes(raster: &RasterBuffer) -> u64 {
    raster
        .pixel_count()
        .saturating_sub(CAPACITY_HEADROOM_PIXELS)
        / 8
}

/// 图像能承载的总位数。
pub fn available_bits(raster: &RasterBuffer) -> u64 {
    raster.pixel_count() * BITS_PER_PIXEL
}

/// 在给定名称长度下，真正能够成功嵌入的最大数据长度 (字节)。
///
/// 帧头 (`8 + name_len` 字节) 必须和数据一起放进像素中，结果同时不超过
/// [`max_bytes`]。
pub fn max_payload_for_name(raster: &RasterBuffer, name_len: usize) -> u64 {
    let frame_bytes = available_bits(raster) / 8;
    let header_bytes = (FIXED_HEADER_BYTES + name_len) as u64;
    frame_bytes
        .saturating_sub(header_bytes)
        .min(max_bytes(raster))
}
