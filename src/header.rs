//! # 帧头编解码模块
//!
//! 帧头格式 (全部为小端序)：
//!
//! ```text
//! | payload_len | name_len | name           |
//! | u32 LE      | u32 LE   | name_len bytes |
//! ```
//!
//! 帧头总长度为 `8 + name_len`。

use crate::constants::{FIXED_HEADER_BYTES, LENGTH_FIELD_BYTES};
use crate::error::{Result, StegoError};

/// 描述被隐藏文件的帧头。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    payload_len: u32,
    name: String,
}

impl FrameHeader {
    /// 根据数据长度和名称构造帧头。
    ///
    /// # Errors
    ///
    /// * 名称含有非 ASCII 字符时返回 [`StegoError::NonAsciiName`]。
    /// * 任一长度无法用 `u32` 表示时返回 [`StegoError::LengthOverflow`]。
    pub fn new(payload_len: usize, name: &str) -> Result<Self> {
        if !name.is_ascii() {
            return Err(StegoError::NonAsciiName(name.to_owned()));
        }
        let payload_len = u32::try_from(payload_len).map_err(|_| StegoError::LengthOverflow {
            field: "Payload",
            len: payload_len,
        })?;
        // 名称长度会被写入 u32 字段，同时整个帧头也要能用 usize 表示。
        u32::try_from(name.len()).map_err(|_| StegoError::LengthOverflow {
            field: "Name",
            len: name.len(),
        })?;
        Ok(Self {
            payload_len,
            name: name.to_owned(),
        })
    }

    pub fn payload_len(&self) -> u32 {
        self.payload_len
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 序列化后的帧头长度：`8 + name_len`。
    pub fn encoded_len(&self) -> usize {
        FIXED_HEADER_BYTES + self.name.len()
    }

    /// 序列化为 `[payload_len][name_len][name]`。
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        bytes.extend_from_slice(&self.payload_len.to_le_bytes());
        bytes.extend_from_slice(&(self.name.len() as u32).to_le_bytes());
        bytes.extend_from_slice(self.name.as_bytes());
        bytes
    }
}

/// 帧头中两个定长字段解析出的长度。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLengths {
    pub payload_len: u32,
    pub name_len: u32,
}

impl FrameLengths {
    /// 帧中有效部分 (帧头 + 数据) 的总字节数。
    pub fn informative_len(&self) -> u64 {
        FIXED_HEADER_BYTES as u64 + u64::from(self.name_len) + u64::from(self.payload_len)
    }

    /// 名称字段在帧中的起始字节偏移。
    pub fn name_offset(&self) -> u64 {
        FIXED_HEADER_BYTES as u64
    }

    /// 数据字段在帧中的起始字节偏移。
    pub fn payload_offset(&self) -> u64 {
        FIXED_HEADER_BYTES as u64 + u64::from(self.name_len)
    }
}

/// 解析帧头开头的 8 个字节。
pub fn parse_lengths(fixed: [u8; FIXED_HEADER_BYTES]) -> FrameLengths {
    let (payload, name) = fixed.split_at(LENGTH_FIELD_BYTES);
    FrameLengths {
        payload_len: read_u32_le(payload),
        name_len: read_u32_le(name),
    }
}

/// 把恢复出的名称字节解码为 ASCII 字符串。
pub fn decode_name(bytes: Vec<u8>) -> Result<String> {
    if !bytes.is_ascii() {
        return Err(StegoError::MalformedHeader(
            "name field contains non-ASCII bytes".to_owned(),
        ));
    }
    String::from_utf8(bytes).map_err(|e| StegoError::MalformedHeader(e.to_string()))
}

fn read_u32_le(field: &[u8]) -> u32 {
    let mut raw = [0u8; LENGTH_FIELD_BYTES];
    raw.copy_from_slice(field);
    u32::from_le_bytes(raw)
}
