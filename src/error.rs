//! # 错误类型模块
//!
//! 隐写核心 (帧头编解码、容量计算、像素位流) 的全部失败情形。
//! 命令行层在此之上使用 `anyhow` 附加上下文。

use thiserror::Error;

/// 核心操作的结果类型。
pub type Result<T> = std::result::Result<T, StegoError>;

/// 编码或解码过程中可能出现的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 数据长度超过图像的建议容量。
    #[error("Payload of {requested} bytes exceeds the image capacity. The data length cannot be more than {max}")]
    CapacityExceeded { requested: u64, max: u64 },

    /// 数据本身在建议容量以内，但加上帧头后像素不够用。
    #[error("Frame needs {frame_bits} pixels but the image only has {pixels}")]
    FrameOverflow { frame_bits: u64, pixels: u64 },

    /// 帧头声明的长度超出图像可容纳的范围，或名称字段不是 ASCII。
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// 无法将输入解码为像素缓冲区。
    #[error("Unsupported carrier format: {0}")]
    UnsupportedCarrierFormat(String),

    /// 名称中含有非 ASCII 字符。
    #[error("Name {0:?} contains non-ASCII characters")]
    NonAsciiName(String),

    /// 长度无法用 `u32` 表示。
    #[error("{field} length {len} does not fit in a 32-bit length field")]
    LengthOverflow { field: &'static str, len: usize },
}
