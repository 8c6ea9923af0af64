//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::capacity::{max_bytes, max_payload_for_name};
use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{HIDDEN_IMAGE_PREFIX, RECOVERED_FILE_PREFIX};
use crate::decoder::decode;
use crate::encoder::encode;
use crate::storage::{load_raster, publish_bytes, publish_png};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 读取载体图像和待隐藏文件，报告图像容量，调用编码器生成新图像，
/// 最后以 PNG 格式原子地写入目标路径。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取或解码输入的图像，或无法读取待隐藏文件。
/// * 名称不是 ASCII，或图像没有足够的空间。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_hidden_path(&args.image));
    ensure_writable(&dest, args.force)?;

    let carrier = load_raster(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The maximum amount of bytes you can write to {} is {}",
        args.image.to_string_lossy().bold(),
        max_bytes(&carrier).to_string().green().bold()
    );

    let payload = fs::read(&args.payload).with_context(|| {
        format!(
            "Unable to read payload file: {}",
            args.payload.to_string_lossy().red().bold()
        )
    })?;

    let name = match args.name {
        Some(name) => name,
        None => file_name_of(&args.payload)?,
    };

    let hidden = encode(&payload, &name, &carrier).with_context(|| {
        format!(
            "Not enough space or invalid name while hiding {} ({} bytes). \nAt most {} bytes fit with this name.",
            name.red().bold(),
            payload.len().to_string().red().bold(),
            max_payload_for_name(&carrier, name.len()).to_string().green().bold()
        )
    })?;

    publish_png(&hidden, &dest, args.force).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "Successfully hid {} in {}",
        name.green().bold(),
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 读取经过隐写的图像，恢复隐藏的名称和数据，并把数据写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像文件。
/// * 帧头损坏或图像中没有隐藏数据。
/// * 目标文件已存在且未指定 `--force`，或无法写入目标文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let picture = load_raster(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let file = decode(&picture).with_context(|| {
        format!(
            "Failed to recover hidden data from '{}'. \nThe image may not contain a hidden file or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "Found {}... Extracting it from {}...",
        file.name.green().bold(),
        args.image.to_string_lossy().bold()
    );

    let dest = match args.dest {
        Some(dest) => dest,
        None => default_recovered_path(&args.image, &file.name),
    };
    ensure_writable(&dest, args.force)?;

    publish_bytes(&file.payload, &dest, args.force).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "Successfully saved {} bytes to {}",
        file.payload.len().to_string().green().bold(),
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑：显示建议容量与计及帧头的实际容量。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let carrier = load_raster(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let name_len = args.name.as_deref().map_or(0, str::len);
    println!(
        "{}: {}x{} ({} pixels)",
        args.image.to_string_lossy().bold(),
        carrier.width(),
        carrier.height(),
        carrier.pixel_count()
    );
    println!(
        "Maximum payload: {} bytes",
        max_bytes(&carrier).to_string().green().bold()
    );
    println!(
        "Maximum payload with a {}-byte name: {} bytes",
        name_len,
        max_payload_for_name(&carrier, name_len)
            .to_string()
            .green()
            .bold()
    );
    Ok(())
}

fn ensure_writable(dest: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );
    Ok(())
}

fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| {
            format!(
                "Unable to derive a name from {}. \nPass one with --name.",
                path.to_string_lossy().red().bold()
            )
        })
}

/// `<目录>/hidden_<文件名主干>.png`
fn default_hidden_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    image.with_file_name(format!("{HIDDEN_IMAGE_PREFIX}{stem}.png"))
}

/// `<目录>/recovered_<名称>`，名称中的目录部分会被丢弃。
fn default_recovered_path(image: &Path, name: &str) -> PathBuf {
    let leaf = Path::new(name)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "payload.bin".to_owned());
    image.with_file_name(format!("{RECOVERED_FILE_PREFIX}{leaf}"))
}
