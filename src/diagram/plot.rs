//! # 能带图渲染
//!
//! 使用 `plotters` 把 `BandDiagramLayout` 绘制为图片文件，或交给外部查看器显示。
//!
//! ## 功能
//! - 按扩展名选择后端：PNG/JPEG/BMP（位图）或 SVG（矢量）
//! - 示意图风格：无坐标轴、无边框、无刻度
//! - 虚线与点划线按几何方式切分，不依赖后端的虚线支持
//! - 每次渲染都创建独立的画布
//!
//! ## 依赖关系
//! - 被 `commands/band.rs`, `commands/figure.rs` 调用
//! - 使用 `diagram/model.rs` 的几何描述
//! - 使用 `utils/units.rs` 换算图幅与线宽
//! - 使用 `utils/paths.rs` 创建父目录

use crate::diagram::model::{BandDiagramLayout, LineStyle, ReferenceLine};
use crate::error::{BandfigError, Result};
use crate::utils::paths::ensure_parent_dir;
use crate::utils::units;

use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 虚线图案（实段, 空段），数据坐标单位
const DASH_PATTERN: [f64; 2] = [0.06, 0.04];
/// 点划线图案（实段, 空段, 点, 空段）
const DASH_DOT_PATTERN: [f64; 4] = [0.08, 0.03, 0.015, 0.03];

/// 占据曲线颜色
const CURVE_COLOR: RGBColor = RED;
/// 参考线颜色
const LINE_COLOR: RGBColor = BLACK;

// ─────────────────────────────────────────────────────────────
// 图幅与格式
// ─────────────────────────────────────────────────────────────

/// 图幅（英寸 + dpi）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
}

impl Default for FigureSize {
    fn default() -> Self {
        FigureSize {
            width_in: 3.0,
            height_in: 3.0,
            dpi: 100.0,
        }
    }
}

impl FigureSize {
    pub fn new(width_in: f64, height_in: f64, dpi: f64) -> Result<Self> {
        for (name, v) in [("width", width_in), ("height", height_in), ("dpi", dpi)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(BandfigError::InvalidArgument(format!(
                    "figure {} must be positive, got {}",
                    name, v
                )));
            }
        }
        Ok(Self {
            width_in,
            height_in,
            dpi,
        })
    }

    /// 像素尺寸
    pub fn pixels(&self) -> (u32, u32) {
        (
            units::inch_to_px(self.width_in, self.dpi),
            units::inch_to_px(self.height_in, self.dpi),
        )
    }

    /// 线宽（点）-> 像素
    pub fn stroke(&self, width_pt: u32) -> u32 {
        units::points_to_px(width_pt as f64, self.dpi)
    }
}

/// 图片格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl ImageFormat {
    /// 从文件扩展名推断格式
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase());

        match ext.as_deref() {
            Some("png") => Ok(ImageFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(ImageFormat::Jpeg),
            Some("bmp") => Ok(ImageFormat::Bmp),
            Some("svg") => Ok(ImageFormat::Svg),
            Some(other) => Err(BandfigError::UnsupportedFormat(format!(
                "'.{}' ({}); use png, jpg, bmp or svg",
                other,
                path.display()
            ))),
            None => Err(BandfigError::UnsupportedFormat(format!(
                "no file extension on '{}'",
                path.display()
            ))),
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, ImageFormat::Svg)
    }
}

// ─────────────────────────────────────────────────────────────
// 渲染入口
// ─────────────────────────────────────────────────────────────

/// 渲染到文件（自动创建缺失的父目录）
pub fn render_to_file(layout: &BandDiagramLayout, path: &Path, size: FigureSize) -> Result<()> {
    let format = ImageFormat::from_path(path)?;
    ensure_parent_dir(path)?;

    let dims = size.pixels();
    if format.is_vector() {
        let root = SVGBackend::new(path, dims).into_drawing_area();
        draw_layout(&root, layout, &size)?;
        root.present()
            .map_err(|e| BandfigError::PlotError(format!("{}: {}", path.display(), e)))?;
    } else {
        let root = BitMapBackend::new(path, dims).into_drawing_area();
        draw_layout(&root, layout, &size)?;
        root.present()
            .map_err(|e| BandfigError::PlotError(format!("{}: {}", path.display(), e)))?;
    }
    Ok(())
}

/// 渲染到临时 SVG 并用外部查看器打开，返回图片路径
///
/// 等待查看器命令退出。`xdg-open` 一类启动器把文件交给后台程序后立即返回，
/// 因此查看器成功启动后临时图片保留在系统临时目录中，不在此删除。
/// 需要阻塞到窗口关闭时，用 `--viewer` 指定前台运行的程序。
pub fn render_to_display(
    layout: &BandDiagramLayout,
    size: FigureSize,
    viewer: Option<&str>,
) -> Result<PathBuf> {
    let (program, args) = viewer_command(viewer)?;
    let path = temp_figure_path()?;
    render_to_file(layout, &path, size)?;

    let result = Command::new(&program).args(&args).arg(&path).output();

    match result {
        Ok(output) if output.status.success() => Ok(path),
        Ok(output) => {
            let _ = fs::remove_file(&path);
            Err(BandfigError::CommandFailed {
                command: program,
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        }
        Err(_) => {
            let _ = fs::remove_file(&path);
            Err(BandfigError::CommandNotFound { command: program })
        }
    }
}

/// 在系统临时目录中创建不会自动删除的 `bandfig-*.svg`
fn temp_figure_path() -> Result<PathBuf> {
    tempfile::Builder::new()
        .prefix("bandfig-")
        .suffix(".svg")
        .tempfile()
        .and_then(|file| file.into_temp_path().keep().map_err(|e| e.error))
        .map_err(|e| BandfigError::FileWriteError {
            path: std::env::temp_dir().display().to_string(),
            source: e,
        })
}

/// 查看器命令：用户指定的命令行，或平台默认打开方式
fn viewer_command(viewer: Option<&str>) -> Result<(String, Vec<String>)> {
    if let Some(cmdline) = viewer {
        let mut parts = cmdline.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| BandfigError::InvalidArgument("empty viewer command".to_string()))?;
        return Ok((program, parts.collect()));
    }

    let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
        ("open", &["-W"][..])
    } else if cfg!(windows) {
        ("cmd", &["/C", "start", "/WAIT", ""][..])
    } else {
        ("xdg-open", &[][..])
    };
    Ok((
        program.to_string(),
        args.iter().map(|s| s.to_string()).collect(),
    ))
}

// ─────────────────────────────────────────────────────────────
// 绘制
// ─────────────────────────────────────────────────────────────

/// 绘制能带图的核心逻辑
fn draw_layout<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    layout: &BandDiagramLayout,
    size: &FigureSize,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| BandfigError::PlotError(format!("{:?}", e)))?;

    let (x_lo, x_hi) = layout.x_range;
    let (y_lo, y_hi) = layout.y_range;

    // 不配置 mesh：示意图不显示坐标轴
    let mut chart = ChartBuilder::on(root)
        .margin(0)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(|e| BandfigError::PlotError(format!("{:?}", e)))?;

    // Fermi 分布
    chart
        .draw_series(LineSeries::new(
            layout.curve.points.iter().copied(),
            CURVE_COLOR.stroke_width(size.stroke(layout.curve.width)),
        ))
        .map_err(|e| BandfigError::PlotError(format!("{:?}", e)))?;

    // 能带、费米能级、真空能级与表面
    for line in &layout.lines {
        let style = LINE_COLOR.stroke_width(size.stroke(line.width));
        chart
            .draw_series(
                line_segments(line)
                    .into_iter()
                    .map(|[a, b]| PathElement::new(vec![a, b], style)),
            )
            .map_err(|e| BandfigError::PlotError(format!("{:?}", e)))?;
    }

    Ok(())
}

/// 按线型把参考线切分为实线段
fn line_segments(line: &ReferenceLine) -> Vec<[(f64, f64); 2]> {
    match line.style {
        LineStyle::Solid => vec![[line.start, line.end]],
        LineStyle::Dashed => dash_segments(line.start, line.end, &DASH_PATTERN),
        LineStyle::DashDot => dash_segments(line.start, line.end, &DASH_DOT_PATTERN),
    }
}

/// 沿线段按图案（实段/空段交替）切分
///
/// `pattern` 的偶数位为实段长度，奇数位为空段长度。图案无效或线段长度为零时返回整条线段。
pub fn dash_segments(
    start: (f64, f64),
    end: (f64, f64),
    pattern: &[f64],
) -> Vec<[(f64, f64); 2]> {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = (dx * dx + dy * dy).sqrt();
    let period: f64 = pattern.iter().sum();

    if pattern.is_empty()
        || pattern.iter().any(|&p| p < 0.0)
        || period <= 0.0
        || length == 0.0
        || !length.is_finite()
    {
        return vec![[start, end]];
    }

    let at = |s: f64| (start.0 + dx * s / length, start.1 + dy * s / length);

    // 累积误差容限
    let eps = length * 1e-9;

    let mut segments = Vec::new();
    let mut pos = 0.0;
    let mut i = 0;
    while pos < length - eps {
        let step = pattern[i % pattern.len()];
        let next = (pos + step).min(length);
        if i % 2 == 0 && next - pos > eps {
            segments.push([at(pos), at(next)]);
        }
        pos = next;
        i += 1;
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::model::{BandDiagram, BandDiagramConfig};

    fn quasi_layout() -> BandDiagramLayout {
        BandDiagram::new(BandDiagramConfig::default().with_quasi_fermi_level(Some(3.0)))
            .unwrap()
            .compute_layout()
    }

    #[test]
    fn test_figure_size() {
        let size = FigureSize::default();
        assert_eq!(size.pixels(), (300, 300));

        let side = units::mm_to_inch(97.015);
        let size = FigureSize::new(side, side, 100.0).unwrap();
        assert_eq!(size.pixels(), (382, 382));

        assert!(FigureSize::new(0.0, 3.0, 100.0).is_err());
        assert!(FigureSize::new(3.0, 3.0, f64::NAN).is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("a.png")).unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("a.SVG")).unwrap(), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("a.jpeg")).unwrap(), ImageFormat::Jpeg);
        assert!(matches!(
            ImageFormat::from_path(Path::new("a.eps")),
            Err(BandfigError::UnsupportedFormat(_))
        ));
        assert!(ImageFormat::from_path(Path::new("figure")).is_err());
    }

    #[test]
    fn test_dash_segments_cover_line() {
        let segs = dash_segments((0.0, 1.0), (-1.2, 1.0), &DASH_PATTERN);
        // 1.2 / 0.1 = 12 个周期
        assert_eq!(segs.len(), 12);
        assert!(segs.iter().all(|[a, b]| a.1 == 1.0 && b.1 == 1.0));
        assert_eq!(segs[0][0], (0.0, 1.0));
        assert!(segs.iter().all(|[a, b]| a.0 >= -1.2 - 1e-12 && b.0 >= -1.2 - 1e-12));

        let dash_dot = dash_segments((0.0, 3.0), (-1.2, 3.0), &DASH_DOT_PATTERN);
        assert!(dash_dot.len() > segs.len());

        assert_eq!(dash_segments((0.0, 0.0), (1.0, 0.0), &[]), vec![[(0.0, 0.0), (1.0, 0.0)]]);
    }

    #[test]
    fn test_render_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build").join("nested").join("fig02.png");

        render_to_file(&quasi_layout(), &path, FigureSize::default()).unwrap();

        assert!(path.exists());
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_render_svg_is_vector() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fig02.svg");

        render_to_file(&quasi_layout(), &path, FigureSize::default()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("polyline") || content.contains("path"));
    }

    #[test]
    fn test_render_png_signature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fig53.png");
        let layout = BandDiagram::new(BandDiagramConfig::default().metal(true))
            .unwrap()
            .compute_layout();

        render_to_file(&layout, &path, FigureSize::default()).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_render_parent_is_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("build");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("fig02.svg");

        match render_to_file(&quasi_layout(), &path, FigureSize::default()) {
            Err(err @ BandfigError::FileWriteError { .. }) => {
                assert!(err.to_string().contains(&path.display().to_string()), "{}", err);
            }
            other => panic!("expected FileWriteError, got {:?}", other),
        }
    }

    #[test]
    fn test_render_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("fig.eps");
        let err = render_to_file(&quasi_layout(), &path, FigureSize::default());
        assert!(matches!(err, Err(BandfigError::UnsupportedFormat(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_viewer_command() {
        let (program, args) = viewer_command(Some("feh --scale-down")).unwrap();
        assert_eq!(program, "feh");
        assert_eq!(args, vec!["--scale-down".to_string()]);

        assert!(viewer_command(Some("   ")).is_err());
        assert!(viewer_command(None).is_ok());
    }

    #[test]
    fn test_display_with_missing_viewer() {
        let err = render_to_display(
            &quasi_layout(),
            FigureSize::default(),
            Some("bandfig-no-such-viewer-xyz"),
        );
        assert!(matches!(err, Err(BandfigError::CommandNotFound { .. })));
    }

    #[test]
    fn test_display_with_empty_viewer() {
        let err = render_to_display(&quasi_layout(), FigureSize::default(), Some(" "));
        assert!(matches!(err, Err(BandfigError::InvalidArgument(_))));
    }

    /// 启动器在后台交给查看程序后立即退出，图片必须仍然存在
    #[cfg(unix)]
    #[test]
    fn test_display_figure_outlives_detached_viewer() {
        use std::time::{Duration, Instant};

        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("marker");
        let script = dir.path().join("viewer.sh");
        fs::write(
            &script,
            "( sleep 0.5; if [ -f \"$2\" ]; then echo opened > \"$1\"; \
             else echo missing > \"$1\"; fi ) </dev/null >/dev/null 2>&1 &\nexit 0\n",
        )
        .unwrap();

        let viewer = format!("sh {} {}", script.display(), marker.display());
        let figure =
            render_to_display(&quasi_layout(), FigureSize::default(), Some(&viewer)).unwrap();

        let deadline = Instant::now() + Duration::from_secs(10);
        let mut seen = String::new();
        while seen.trim().is_empty() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(50));
            seen = fs::read_to_string(&marker).unwrap_or_default();
        }

        assert_eq!(seen.trim(), "opened");
        assert!(figure.exists());
        assert!(fs::read_to_string(&figure).unwrap().contains("<svg"));
        fs::remove_file(&figure).unwrap();
    }
}
