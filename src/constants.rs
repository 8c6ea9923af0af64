/// 每个长度字段 (数据长度、名称长度) 占用的字节数，小端序 `u32`。
pub const LENGTH_FIELD_BYTES: usize = 4;

/// 帧头中固定部分的字节数：两个长度字段。
/// 完整帧头长度为 `FIXED_HEADER_BYTES + 名称长度`。
pub const FIXED_HEADER_BYTES: usize = 2 * LENGTH_FIELD_BYTES;

/// 计算建议容量时预留的像素数。
pub const CAPACITY_HEADROOM_PIXELS: u64 = 8;

/// 每个像素承载的数据位数。
pub const BITS_PER_PIXEL: u64 = 1;

/// 写入时强制使用的不透明度。
pub const OPAQUE_ALPHA: u8 = 255;

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const HIDDEN_IMAGE_PREFIX: &str = "hidden_";

/// 未指定输出路径时，恢复文件名的前缀。
pub const RECOVERED_FILE_PREFIX: &str = "recovered_";
