//! # 长度单位换算
//!
//! 图幅以物理尺寸给出（英寸或毫米），渲染时按 dpi 换算为像素；
//! 线宽以点（1/72 英寸）给出。
//!
//! ## 依赖关系
//! - 被 `diagram/plot.rs`, `diagram/presets.rs` 使用
//! - 无外部模块依赖

/// 每英寸毫米数
pub const MM_PER_INCH: f64 = 25.4;
/// 每英寸点数
pub const POINTS_PER_INCH: f64 = 72.0;

/// 毫米 -> 英寸
pub fn mm_to_inch(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// 英寸 -> 像素（四舍五入，至少 1）
pub fn inch_to_px(inch: f64, dpi: f64) -> u32 {
    ((inch * dpi).round() as u32).max(1)
}

/// 点 -> 像素（四舍五入，至少 1）
pub fn points_to_px(points: f64, dpi: f64) -> u32 {
    ((points * dpi / POINTS_PER_INCH).round() as u32).max(1)
}
