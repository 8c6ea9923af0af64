//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// 将任意文件连同文件名隐藏到无损格式图像 (如 PNG, BMP) 的像素最低有效位中，或从中恢复。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "将任意文件连同文件名隐藏到无损格式图像 (如 PNG, BMP) 的像素最低有效位中，或从中恢复。每个像素承载一位数据，结果总是保存为 PNG。"
)]
pub struct Cli {
    /// 输出更多日志 (-v 为 info，-vv 为 debug，-vvv 为 trace)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (查询容量)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 将文件隐藏到图像中。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文件。
    Recover(RecoverArgs),

    /// 显示图像可以容纳的最大字节数。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用作载体的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文件路径。
    #[arg(short, long)]
    pub payload: PathBuf,

    /// 与数据一起保存的名称 (仅限 ASCII)，默认为文件名。
    #[arg(short, long)]
    pub name: Option<String>,

    /// 结果图像的保存路径，默认为载体同目录下的 `hidden_<载体名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 目标文件已存在时覆盖它。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复数据的保存路径，默认为图像同目录下的 `recovered_<隐藏的名称>`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 目标文件已存在时覆盖它。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要查询的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 计及帧头开销时使用的名称。
    #[arg(short, long)]
    pub name: Option<String>,
}
