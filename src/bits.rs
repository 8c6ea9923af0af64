//! # 位操作模块
//!
//! 以单个 `u8` 为单位的纯函数：按 MSB 优先的顺序取出某一位，
//! 或把一位追加到字节累加器中。

/// 返回 `byte` 中第 `position` 位 (0..=7)，从最高位开始计数。
///
/// `position == 0` 对应 `0x80`。超出范围的位置按 `position % 8` 处理。
#[inline]
pub fn bit_at(byte: u8, position: u8) -> u8 {
    (byte >> (7 - (position & 7))) & 1
}

/// 将累加器左移一位并把 `bit` 放入最低位，用于按 MSB 优先重组字节。
#[inline]
pub fn push_bit(accumulator: u8, bit: u8) -> u8 {
    (accumulator << 1) | (bit & 1)
}

/// 以 `"1011 0010"` 的形式渲染一个字节，仅用于调试日志。
pub fn to_binary_string(byte: u8) -> String {
    let mut rendered = String::with_capacity(9);
    for position in 0..8 {
        if position == 4 {
            rendered.push(' ');
        }
        rendered.push(if bit_at(byte, position) == 1 { '1' } else { '0' });
    }
    rendered
}
