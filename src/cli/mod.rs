//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `band`: 按给定参数绘制能带图
//! - `figure`: 绘制论文插图预设
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: band, figure

pub mod band;
pub mod figure;

use crate::diagram::FigureSize;
use crate::error::Result;

use clap::{Args, Parser, Subcommand};

/// bandfig - 能带示意图生成工具
#[derive(Parser)]
#[command(name = "bandfig")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Schematic band diagram and Fermi-Dirac occupation figure generator", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Render a band diagram from explicit parameters
    Band(band::BandArgs),

    /// Render one of the publication figure presets
    Figure(figure::FigureArgs),
}

/// 显示相关的公共参数
#[derive(Args, Debug, Clone)]
pub struct DisplayArgs {
    /// Show the figure in a viewer instead of writing it to disk
    #[arg(long, default_value_t = false)]
    pub show: bool,

    /// Viewer command used with --show (default: platform opener)
    #[arg(long, env = "BANDFIG_VIEWER")]
    pub viewer: Option<String>,
}

/// 图幅相关的公共参数
#[derive(Args, Debug, Clone)]
pub struct SizeArgs {
    /// Figure width in inches
    #[arg(long)]
    pub width: Option<f64>,

    /// Figure height in inches
    #[arg(long)]
    pub height: Option<f64>,

    /// Resolution in dots per inch (raster output and stroke widths)
    #[arg(long)]
    pub dpi: Option<f64>,
}

impl SizeArgs {
    /// 用命令行值覆盖基准图幅
    pub fn resolve(&self, base: FigureSize) -> Result<FigureSize> {
        FigureSize::new(
            self.width.unwrap_or(base.width_in),
            self.height.unwrap_or(base.height_in),
            self.dpi.unwrap_or(base.dpi),
        )
    }
}
