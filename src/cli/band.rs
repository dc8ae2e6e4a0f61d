//! # band 子命令 CLI 定义
//!
//! 按命令行给定的物理参数绘制一张能带图。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/band.rs`

use super::{DisplayArgs, SizeArgs};
use crate::diagram::model::DEFAULT_SAMPLE_COUNT;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum BandOutputFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV data file (element, style, x, y)
    Csv,
    /// XY data file (energy, occupation)
    Xy,
}

impl std::fmt::Display for BandOutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BandOutputFormat::Png => write!(f, "png"),
            BandOutputFormat::Svg => write!(f, "svg"),
            BandOutputFormat::Csv => write!(f, "csv"),
            BandOutputFormat::Xy => write!(f, "xy"),
        }
    }
}

/// band 子命令参数
#[derive(Args, Debug)]
pub struct BandArgs {
    /// Temperature, in the same energy units as the levels below
    #[arg(short, long, default_value_t = 1.0)]
    pub temperature: f64,

    /// Fermi level
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub fermi_level: f64,

    /// Quasi-Fermi level (drives the occupation curve when set)
    #[arg(long, allow_negative_numbers = true)]
    pub quasi_fermi_level: Option<f64>,

    /// Valence band maximum
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub vbm: f64,

    /// Conduction band minimum
    #[arg(long, default_value_t = 4.0, allow_negative_numbers = true)]
    pub cbm: f64,

    /// Vacuum level
    #[arg(long, default_value_t = 6.0, allow_negative_numbers = true)]
    pub evac: f64,

    /// Draw a metal (no band edges)
    #[arg(long, default_value_t = false)]
    pub metal: bool,

    /// Number of energy samples for the occupation curve
    #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
    pub samples: usize,

    /// Stroke width of the occupation curve, in points
    #[arg(long, default_value_t = 5)]
    pub curve_width: u32,

    /// Stroke width of the reference lines, in points
    #[arg(long, default_value_t = 1)]
    pub line_width: u32,

    /// Output file path
    #[arg(short, long, default_value = "band_diagram.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<BandOutputFormat>,

    #[command(flatten)]
    pub size: SizeArgs,

    #[command(flatten)]
    pub display: DisplayArgs,

    /// Print a table of the diagram's reference lines
    #[arg(long, default_value_t = false)]
    pub summary: bool,
}
