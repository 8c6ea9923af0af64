//! # 存储模块
//!
//! 负责把磁盘上的图像解码为 [`RasterBuffer`]，以及把结果原子地发布到目标路径：
//! 先写入同目录下的临时文件，写完后再重命名，失败时不会留下半成品。

use crate::error::StegoError;
use crate::raster::RasterBuffer;
use anyhow::{Context, Result};
use image::ImageFormat;
use log::{debug, warn};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// 读取并完整解码一幅图像。
///
/// # Errors
///
/// 文件无法打开或无法识别为受支持的图像格式时，返回包含
/// [`StegoError::UnsupportedCarrierFormat`] 的错误。
pub fn load_raster(path: &Path) -> Result<RasterBuffer, StegoError> {
    let image = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| StegoError::UnsupportedCarrierFormat(e.to_string()))?
        .decode()
        .map_err(|e| StegoError::UnsupportedCarrierFormat(e.to_string()))?;
    debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    Ok(RasterBuffer::from_image(image))
}

/// 将像素缓冲区以 PNG 格式原子地写入 `dest`。
///
/// 无论 `dest` 的扩展名是什么，输出始终是无损的 PNG。
pub fn publish_png(raster: &RasterBuffer, dest: &Path, overwrite: bool) -> Result<()> {
    let is_png = dest
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        warn!(
            "{} does not end in .png, the file is written as PNG anyway",
            dest.display()
        );
    }

    publish_with(dest, overwrite, |file| {
        let mut writer = BufWriter::new(file);
        raster
            .as_image()
            .write_to(&mut writer, ImageFormat::Png)
            .context("Failed to encode the image as PNG")?;
        writer.flush()?;
        Ok(())
    })
}

/// 将字节原子地写入 `dest`。
pub fn publish_bytes(bytes: &[u8], dest: &Path, overwrite: bool) -> Result<()> {
    publish_with(dest, overwrite, |file| {
        file.write_all(bytes)?;
        Ok(())
    })
}

fn publish_with<F>(dest: &Path, overwrite: bool, fill: F) -> Result<()>
where
    F: FnOnce(&mut std::fs::File) -> Result<()>,
{
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staging = NamedTempFile::new_in(dir)
        .with_context(|| format!("Unable to create a temporary file in {}", dir.display()))?;

    fill(staging.as_file_mut())?;
    staging.as_file().sync_all()?;

    if overwrite {
        staging.persist(dest)?;
    } else {
        staging.persist_noclobber(dest)?;
    }
    debug!("Published {}", dest.display());
    Ok(())
}
