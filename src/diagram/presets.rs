//! # 论文插图预设
//!
//! 论文中各张能带示意图的参数。
//!
//! ## 依赖关系
//! - 被 `commands/figure.rs` 使用
//! - 使用 `diagram/model.rs`, `diagram/plot.rs`

use crate::diagram::model::BandDiagramConfig;
use crate::diagram::plot::FigureSize;
use crate::error::{BandfigError, Result};
use crate::utils::units;

/// 插图边长 (mm)
const PAPER_FIG_MM: f64 = 97.015;

/// 单张插图的预设
#[derive(Debug, Clone)]
pub struct FigurePreset {
    pub name: &'static str,
    pub description: &'static str,
    pub config: BandDiagramConfig,
    pub size: FigureSize,
}

/// 全部预设
pub fn all() -> Vec<FigurePreset> {
    let fermi_level = 1.0;

    vec![
        FigurePreset {
            name: "fig02",
            description: "Semiconductor under illumination (quasi-Fermi level above EF)",
            config: BandDiagramConfig::default()
                .with_temperature(1.0)
                .with_fermi_level(fermi_level)
                .with_quasi_fermi_level(Some(3.0)),
            size: FigureSize::default(),
        },
        FigurePreset {
            name: "fig52",
            description: "Metal at low temperature",
            config: BandDiagramConfig::default()
                .with_temperature(1.0)
                .with_fermi_level(fermi_level)
                .metal(true),
            size: FigureSize::default(),
        },
        FigurePreset {
            name: "fig53",
            description: "Metal at elevated temperature",
            config: BandDiagramConfig::default()
                .with_temperature(3.0)
                .with_fermi_level(fermi_level)
                .metal(true),
            size: FigureSize::default(),
        },
        FigurePreset {
            name: "fig1000",
            description: "Semiconductor in equilibrium, vacuum level 5 above EF",
            config: BandDiagramConfig::default()
                .with_temperature(1.0)
                .with_fermi_level(fermi_level)
                .with_vacuum_level(fermi_level + 5.0),
            size: paper_size(),
        },
    ]
}

/// 按名称查找预设（不区分大小写）
pub fn find(name: &str) -> Result<FigurePreset> {
    all()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| BandfigError::UnknownPreset(name.to_string()))
}

fn paper_size() -> FigureSize {
    let default = FigureSize::default();
    FigureSize {
        width_in: units::mm_to_inch(PAPER_FIG_MM),
        height_in: units::mm_to_inch(PAPER_FIG_MM),
        dpi: default.dpi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::model::{BandDiagram, LineKind};

    #[test]
    fn test_all_presets_are_valid() {
        for preset in all() {
            let bd = BandDiagram::new(preset.config.clone()).unwrap();
            let layout = bd.compute_layout();
            assert!(layout.has_line(LineKind::FermiLevel), "{}", preset.name);
            assert!(bd.out_of_window().is_empty(), "{}", preset.name);
        }
    }

    #[test]
    fn test_metal_presets_have_no_band_edges() {
        for name in ["fig52", "fig53"] {
            let layout = BandDiagram::new(find(name).unwrap().config)
                .unwrap()
                .compute_layout();
            assert!(!layout.has_line(LineKind::ConductionBand), "{}", name);
            assert!(!layout.has_line(LineKind::ValenceBand), "{}", name);
        }

        let layout = BandDiagram::new(find("fig1000").unwrap().config)
            .unwrap()
            .compute_layout();
        assert!(layout.has_line(LineKind::ConductionBand));
        assert!(layout.has_line(LineKind::VacuumLevel));
    }

    #[test]
    fn test_find() {
        let fig = find("FIG02").unwrap();
        assert_eq!(fig.config.quasi_fermi_level, Some(3.0));

        let fig = find("fig52").unwrap();
        assert!(fig.config.is_metal);
        assert_eq!(fig.config.temperature, 1.0);
        assert_eq!(fig.size, FigureSize::default());

        let fig = find("fig53").unwrap();
        assert!(fig.config.is_metal);
        assert_eq!(fig.config.temperature, 3.0);
        assert_eq!(fig.size, FigureSize::default());

        let fig = find("fig1000").unwrap();
        assert!(!fig.config.is_metal);
        assert_eq!(fig.config.temperature, 1.0);
        assert_eq!(fig.config.vacuum_level, 6.0);
        assert_eq!(fig.size.pixels(), (382, 382));

        assert!(matches!(find("fig99"), Err(BandfigError::UnknownPreset(_))));
    }
}
