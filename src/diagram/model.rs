//! # 能带图模型
//!
//! 保存一张能带图的配置，并生成与渲染无关的几何描述（`BandDiagramLayout`）。
//!
//! ## 几何约定
//! - 占据曲线以 `x = -f(E)`, `y = E` 绘制，占据概率向左增大
//! - 参考线从表面 `x = 0` 向左延伸到 `x = -LINE_EXTENT`
//! - 能量采样窗口与显示范围均为固定常量，不随参数变化；
//!   超出范围的能级只会被裁剪，不会扩大窗口
//!
//! ## 依赖关系
//! - 被 `diagram/plot.rs`, `diagram/export.rs`, `commands/` 使用
//! - 使用 `diagram/fermi.rs` 计算占据概率

use crate::diagram::fermi::{fermi, linspace};
use crate::error::{BandfigError, Result};

use serde::Serialize;

/// 能量采样窗口
pub const ENERGY_WINDOW: (f64, f64) = (-10.0, 10.0);
/// 参考线水平长度
pub const LINE_EXTENT: f64 = 1.2;
/// 真空能级刻度长度
pub const VACUUM_TICK: f64 = 0.05;
/// 显示范围（x）
pub const X_BOUNDS: (f64, f64) = (-1.2, 0.2);
/// 显示范围（y）
pub const Y_BOUNDS: (f64, f64) = (-2.0, 10.0);
/// 默认能量采样点数
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

// ─────────────────────────────────────────────────────────────
// 配置
// ─────────────────────────────────────────────────────────────

/// 能带图配置
#[derive(Debug, Clone, PartialEq)]
pub struct BandDiagramConfig {
    /// 温度（能量单位）
    pub temperature: f64,
    /// 费米能级
    pub fermi_level: f64,
    /// 准费米能级，设置后取代费米能级作为占据曲线的参考
    pub quasi_fermi_level: Option<f64>,
    /// 价带顶 (vbm)
    pub valence_band_edge: f64,
    /// 导带底 (cbm)
    pub conduction_band_edge: f64,
    /// 真空能级 (evac)
    pub vacuum_level: f64,
    /// 金属（无带隙，不画带边）
    pub is_metal: bool,
    /// 能量采样点数
    pub sample_count: usize,
    /// 占据曲线线宽
    pub curve_width: u32,
    /// 参考线线宽
    pub line_width: u32,
}

impl Default for BandDiagramConfig {
    fn default() -> Self {
        BandDiagramConfig {
            temperature: 1.0,
            fermi_level: 1.0,
            quasi_fermi_level: None,
            valence_band_edge: 0.0,
            conduction_band_edge: 4.0,
            vacuum_level: 6.0,
            is_metal: false,
            sample_count: DEFAULT_SAMPLE_COUNT,
            curve_width: 5,
            line_width: 1,
        }
    }
}

impl BandDiagramConfig {
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_fermi_level(mut self, level: f64) -> Self {
        self.fermi_level = level;
        self
    }

    pub fn with_quasi_fermi_level(mut self, level: Option<f64>) -> Self {
        self.quasi_fermi_level = level;
        self
    }

    /// 设置价带顶与导带底
    pub fn with_band_edges(mut self, vbm: f64, cbm: f64) -> Self {
        self.valence_band_edge = vbm;
        self.conduction_band_edge = cbm;
        self
    }

    pub fn with_vacuum_level(mut self, evac: f64) -> Self {
        self.vacuum_level = evac;
        self
    }

    pub fn metal(mut self, is_metal: bool) -> Self {
        self.is_metal = is_metal;
        self
    }

    pub fn with_sample_count(mut self, n: usize) -> Self {
        self.sample_count = n;
        self
    }

    /// 设置占据曲线与参考线的线宽
    pub fn with_line_widths(mut self, curve_width: u32, line_width: u32) -> Self {
        self.curve_width = curve_width;
        self.line_width = line_width;
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(BandfigError::invalid_config(
                "temperature",
                format!("must be a positive finite number, got {}", self.temperature),
            ));
        }

        if self.sample_count < 2 {
            return Err(BandfigError::invalid_config(
                "sample_count",
                format!("must be at least 2, got {}", self.sample_count),
            ));
        }

        let energies = [
            ("fermi_level", Some(self.fermi_level)),
            ("quasi_fermi_level", self.quasi_fermi_level),
            ("valence_band_edge", Some(self.valence_band_edge)),
            ("conduction_band_edge", Some(self.conduction_band_edge)),
            ("vacuum_level", Some(self.vacuum_level)),
        ];
        for (field, value) in energies {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(BandfigError::invalid_config(
                        field,
                        format!("must be finite, got {}", v),
                    ));
                }
            }
        }

        if self.curve_width == 0 || self.line_width == 0 {
            return Err(BandfigError::invalid_config(
                "line_width",
                "line widths must be at least 1",
            ));
        }

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
// 几何描述
// ─────────────────────────────────────────────────────────────

/// 参考线种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    ConductionBand,
    ValenceBand,
    FermiLevel,
    QuasiFermiLevel,
    VacuumLevel,
    Surface,
}

impl LineKind {
    /// 显示名称
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::ConductionBand => "conduction band",
            LineKind::ValenceBand => "valence band",
            LineKind::FermiLevel => "Fermi level",
            LineKind::QuasiFermiLevel => "quasi-Fermi level",
            LineKind::VacuumLevel => "vacuum level",
            LineKind::Surface => "surface",
        }
    }
}

/// 线型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
}

/// 参考线（两端点）
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub kind: LineKind,
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub style: LineStyle,
    pub width: u32,
}

impl ReferenceLine {
    /// 是否为水平线
    pub fn is_horizontal(&self) -> bool {
        self.start.1 == self.end.1 && self.start.0 != self.end.0
    }
}

/// 占据曲线
#[derive(Debug, Clone, PartialEq)]
pub struct OccupationCurve {
    /// (x = -f(E), y = E)
    pub points: Vec<(f64, f64)>,
    /// 计算占据概率使用的参考能级
    pub reference_level: f64,
    pub width: u32,
}

/// 能带图几何描述
#[derive(Debug, Clone, PartialEq)]
pub struct BandDiagramLayout {
    pub curve: OccupationCurve,
    pub lines: Vec<ReferenceLine>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl BandDiagramLayout {
    /// 指定种类的所有参考线
    pub fn lines_of(&self, kind: LineKind) -> impl Iterator<Item = &ReferenceLine> {
        self.lines.iter().filter(move |l| l.kind == kind)
    }

    pub fn has_line(&self, kind: LineKind) -> bool {
        self.lines_of(kind).next().is_some()
    }

    /// 所有水平参考线
    pub fn horizontal_lines(&self) -> impl Iterator<Item = &ReferenceLine> {
        self.lines.iter().filter(|l| l.is_horizontal())
    }
}

// ─────────────────────────────────────────────────────────────
// 模型
// ─────────────────────────────────────────────────────────────

/// 经过校验的能带图模型
#[derive(Debug, Clone)]
pub struct BandDiagram {
    config: BandDiagramConfig,
}

impl BandDiagram {
    /// 校验配置并创建模型
    pub fn new(config: BandDiagramConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BandDiagramConfig {
        &self.config
    }

    /// 占据曲线的参考能级（准费米能级优先）
    pub fn reference_level(&self) -> f64 {
        self.config
            .quasi_fermi_level
            .unwrap_or(self.config.fermi_level)
    }

    /// 带隙（金属返回 None）
    pub fn band_gap(&self) -> Option<f64> {
        if self.config.is_metal {
            None
        } else {
            Some(self.config.conduction_band_edge - self.config.valence_band_edge)
        }
    }

    /// 落在显示范围 `Y_BOUNDS` 之外的能级名称
    pub fn out_of_window(&self) -> Vec<&'static str> {
        let c = &self.config;
        let mut levels = vec![
            (LineKind::FermiLevel, c.fermi_level),
            (LineKind::VacuumLevel, c.vacuum_level),
        ];
        if let Some(q) = c.quasi_fermi_level {
            levels.push((LineKind::QuasiFermiLevel, q));
        }
        if !c.is_metal {
            levels.push((LineKind::ConductionBand, c.conduction_band_edge));
            levels.push((LineKind::ValenceBand, c.valence_band_edge));
        }

        levels
            .into_iter()
            .filter(|(_, e)| *e < Y_BOUNDS.0 || *e > Y_BOUNDS.1)
            .map(|(kind, _)| kind.label())
            .collect()
    }

    /// 生成几何描述
    pub fn compute_layout(&self) -> BandDiagramLayout {
        let c = &self.config;

        let energies = linspace(ENERGY_WINDOW.0, ENERGY_WINDOW.1, c.sample_count);
        let reference_level = self.reference_level();
        let occupations = fermi(&energies, c.temperature, reference_level);

        let curve = OccupationCurve {
            points: occupations
                .iter()
                .zip(&energies)
                .map(|(f, e)| (-f, *e))
                .collect(),
            reference_level,
            width: c.curve_width,
        };

        let mut lines = Vec::new();

        // 能带与费米能级
        if !c.is_metal {
            lines.push(self.level_line(
                LineKind::ValenceBand,
                c.valence_band_edge,
                LineStyle::Solid,
            ));
            lines.push(self.level_line(
                LineKind::ConductionBand,
                c.conduction_band_edge,
                LineStyle::Solid,
            ));
        }
        lines.push(self.level_line(LineKind::FermiLevel, c.fermi_level, LineStyle::Dashed));
        if let Some(q) = c.quasi_fermi_level {
            lines.push(self.level_line(LineKind::QuasiFermiLevel, q, LineStyle::DashDot));
        }

        // 真空能级
        lines.push(ReferenceLine {
            kind: LineKind::VacuumLevel,
            start: (0.0, c.vacuum_level),
            end: (-VACUUM_TICK, c.vacuum_level),
            style: LineStyle::Solid,
            width: c.line_width,
        });

        // 表面
        lines.push(ReferenceLine {
            kind: LineKind::Surface,
            start: (0.0, Y_BOUNDS.0),
            end: (0.0, Y_BOUNDS.1),
            style: LineStyle::Solid,
            width: c.line_width,
        });

        BandDiagramLayout {
            curve,
            lines,
            x_range: X_BOUNDS,
            y_range: Y_BOUNDS,
        }
    }

    fn level_line(&self, kind: LineKind, energy: f64, style: LineStyle) -> ReferenceLine {
        ReferenceLine {
            kind,
            start: (0.0, energy),
            end: (-LINE_EXTENT, energy),
            style,
            width: self.config.line_width,
        }
    }
}
