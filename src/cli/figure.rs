//! # figure 子命令 CLI 定义
//!
//! 按名称绘制论文插图预设，输出到 `<base-dir>/<target-dir>/<name>.<ext>`。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/figure.rs`

use super::{DisplayArgs, SizeArgs};
use clap::Args;
use std::path::PathBuf;

/// figure 子命令参数
#[derive(Args, Debug)]
pub struct FigureArgs {
    /// Preset name (e.g., fig02, fig52, fig53, fig1000)
    #[arg(required_unless_present = "list")]
    pub name: Option<String>,

    /// List the available presets and exit
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Base directory the target directory is resolved against
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Target directory relative to the base directory
    #[arg(long, default_value = "build")]
    pub target_dir: PathBuf,

    /// Output file extension (png, jpg, bmp, svg)
    #[arg(long, default_value = "svg")]
    pub ext: String,

    #[command(flatten)]
    pub size: SizeArgs,

    #[command(flatten)]
    pub display: DisplayArgs,
}
