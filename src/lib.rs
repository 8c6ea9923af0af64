//! # pixel_stash 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：把带名称的任意数据逐位写入像素的最低有效位，
//! 并按相同的帧格式读回。

// 声明库包含的所有模块。

pub mod bits;
pub mod bitstream;
pub mod capacity;
pub mod cli;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod handler;
pub mod header;
pub mod raster;
pub mod storage;

pub use decoder::{HiddenFile, decode, read_name, read_payload};
pub use encoder::encode;
pub use error::{Result, StegoError};
pub use raster::{EmbedChannels, RasterBuffer};
