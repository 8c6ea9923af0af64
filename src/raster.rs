//! # 像素缓冲区模块
//!
//! [`RasterBuffer`] 是完整解码到内存中的 RGBA8 图像，支持按坐标随机读写
//! 颜色通道三元组。[`EmbedChannels`] 描述一个数据位写入哪些颜色通道。

use crate::constants::OPAQUE_ALPHA;
use image::{DynamicImage, Rgba, RgbaImage};

/// 参与嵌入的颜色通道 (R, G, B)。
///
/// 写入时同一个位被复制到每个参与的通道；读取时对这些通道的最低位取逻辑与。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedChannels {
    mask: [bool; 3],
}

impl EmbedChannels {
    /// R、G、B 三个通道全部参与。
    pub const RGB: Self = Self {
        mask: [true, true, true],
    };

    /// 自定义参与的通道，顺序为 `[r, g, b]`。至少需要一个通道。
    pub fn new(r: bool, g: bool, b: bool) -> Option<Self> {
        (r || g || b).then_some(Self { mask: [r, g, b] })
    }

    /// 将 `bit` 写入 `rgb` 中每个参与通道的最低位，其余通道保持不变。
    pub fn embed(&self, rgb: [u8; 3], bit: u8) -> [u8; 3] {
        let mut out = rgb;
        for (value, _) in out.iter_mut().zip(self.mask).filter(|(_, used)| *used) {
            *value = (*value & 0xFE) | (bit & 1);
        }
        out
    }

    /// 对参与通道的最低位取逻辑与。
    pub fn extract(&self, rgb: [u8; 3]) -> u8 {
        rgb.iter()
            .zip(self.mask)
            .filter(|(_, used)| *used)
            .fold(1, |acc, (value, _)| acc & value & 1)
    }
}

impl Default for EmbedChannels {
    fn default() -> Self {
        Self::RGB
    }
}

/// 内存中的 RGBA8 像素网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    pixels: RgbaImage,
}

impl RasterBuffer {
    /// 创建一个全黑、完全不透明的缓冲区。
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, OPAQUE_ALPHA])),
        }
    }

    /// 从已解码的图像构造。非 RGBA8 图像会被转换为 RGBA8。
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            pixels: image.into_rgba8(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// 像素总数 `W·H`，也就是可承载的位数。
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// 读取 `(x, y)` 处的 RGB 三元组。坐标越界时 panic。
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let Rgba([r, g, b, _]) = *self.pixels.get_pixel(x, y);
        [r, g, b]
    }

    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.pixels.get_pixel(x, y).0[3]
    }

    /// 写入 `(x, y)` 处的 RGB 三元组，并将不透明度设为 255。
    pub fn set_rgb(&mut self, x: u32, y: u32, [r, g, b]: [u8; 3]) {
        self.pixels.put_pixel(x, y, Rgba([r, g, b, OPAQUE_ALPHA]));
    }

    /// 直接设置整个像素 (含不透明度)，主要用于构造测试图像。
    pub fn set_rgba(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        self.pixels.put_pixel(x, y, Rgba(rgba));
    }

    /// 线性位索引到像素坐标的映射 (行优先)。
    pub fn coordinate(&self, bit_index: u64) -> (u32, u32) {
        let width = u64::from(self.width());
        ((bit_index % width) as u32, (bit_index / width) as u32)
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }
}

impl From<RgbaImage> for RasterBuffer {
    fn from(pixels: RgbaImage) -> Self {
        Self { pixels }
    }
}
