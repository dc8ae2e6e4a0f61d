//! # 能带图模块
//!
//! 提供能带示意图的计算与渲染。
//!
//! ## 子模块
//! - `fermi`: Fermi–Dirac 占据函数
//! - `model`: 配置与几何描述
//! - `plot`: 图片渲染与显示
//! - `export`: 数据导出
//! - `presets`: 论文插图预设
//!
//! ## 依赖关系
//! - 被 `commands/` 使用

pub mod export;
pub mod fermi;
pub mod model;
pub mod plot;
pub mod presets;

pub use model::{BandDiagram, BandDiagramConfig, BandDiagramLayout, LineKind};
pub use plot::FigureSize;
