//! # Fermi–Dirac 占据函数
//!
//! f(E) = 1 / (1 + exp((E - μ) / T))
//!
//! 温度与能量使用同一能量单位，模块本身不做单位换算。
//!
//! ## 依赖关系
//! - 被 `diagram/model.rs` 调用
//! - 无外部模块依赖

/// 单个能量点的占据概率
///
/// `temperature` 不为正（含 NaN）时返回 `NaN`。
pub fn occupation(energy: f64, temperature: f64, level: f64) -> f64 {
    if !(temperature > 0.0) {
        return f64::NAN;
    }
    1.0 / (1.0 + ((energy - level) / temperature).exp())
}

/// 一组能量点的占据概率
pub fn fermi(energies: &[f64], temperature: f64, level: f64) -> Vec<f64> {
    energies
        .iter()
        .map(|&e| occupation(e, temperature, level))
        .collect()
}

/// 在 [start, end] 上等间距取 n 个点（包含两端）
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + i as f64 * step
                    }
                })
                .collect()
        }
    }
}
