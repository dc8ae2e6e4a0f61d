//! # band 命令实现
//!
//! 由命令行参数构造能带图模型，计算几何描述，并输出为图片或数据文件。
//!
//! ## 依赖关系
//! - 使用 `cli/band.rs` 定义的 BandArgs
//! - 使用 `diagram/` 模块进行计算、渲染与导出

use crate::cli::band::{BandArgs, BandOutputFormat};
use crate::diagram::plot::ImageFormat;
use crate::diagram::{
    self, BandDiagram, BandDiagramConfig, BandDiagramLayout, FigureSize, LineKind,
};
use crate::error::Result;
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 执行 band 命令
pub fn execute(args: BandArgs) -> Result<()> {
    output::print_header("Band Diagram");

    let config = BandDiagramConfig::default()
        .with_temperature(args.temperature)
        .with_fermi_level(args.fermi_level)
        .with_quasi_fermi_level(args.quasi_fermi_level)
        .with_band_edges(args.vbm, args.cbm)
        .with_vacuum_level(args.evac)
        .metal(args.metal)
        .with_sample_count(args.samples)
        .with_line_widths(args.curve_width, args.line_width);

    let model = BandDiagram::new(config)?;
    let size = args.size.resolve(FigureSize::default())?;

    print_diagram_info(&model);
    let layout = model.compute_layout();
    if layout.has_line(LineKind::QuasiFermiLevel) {
        output::print_info("Occupation curve follows the quasi-Fermi level");
    }

    if args.summary {
        print_line_table(&layout);
    }

    if args.display.show {
        output::print_info("Opening viewer");
        let shown =
            diagram::plot::render_to_display(&layout, size, args.display.viewer.as_deref())?;
        output::print_done(&format!("Viewer exited, figure kept at '{}'", shown.display()));
        return Ok(());
    }

    let format = args
        .format
        .unwrap_or_else(|| guess_format_from_extension(&args.output));

    match format {
        BandOutputFormat::Png | BandOutputFormat::Svg => {
            let path = image_output_path(&args.output, args.format);
            if path != args.output {
                output::print_warning(&format!(
                    "Output extension does not match format {}, writing '{}'",
                    format,
                    path.display()
                ));
            }
            diagram::plot::render_to_file(&layout, &path, size)?;
            let (w, h) = size.pixels();
            output::print_success(&format!(
                "Band diagram saved to '{}' ({}x{} px)",
                path.display(),
                w,
                h
            ));
        }
        BandOutputFormat::Csv => {
            diagram::export::to_csv(&layout, &args.output)?;
            output::print_success(&format!("Layout data saved to '{}'", args.output.display()));
        }
        BandOutputFormat::Xy => {
            diagram::export::to_xy(&layout, &args.output)?;
            output::print_success(&format!(
                "Occupation curve saved to '{}'",
                args.output.display()
            ));
        }
    }

    Ok(())
}

/// 打印模型参数与提示
pub fn print_diagram_info(model: &BandDiagram) {
    let c = model.config();

    output::print_info(&format!(
        "T = {}, EF = {}, reference level = {}",
        c.temperature,
        c.fermi_level,
        model.reference_level()
    ));
    match model.band_gap() {
        Some(gap) => output::print_info(&format!(
            "VBM = {}, CBM = {}, gap = {}",
            c.valence_band_edge, c.conduction_band_edge, gap
        )),
        None => output::print_info("Metal: band edges are not drawn"),
    }

    let outside = model.out_of_window();
    if !outside.is_empty() {
        output::print_warning(&format!(
            "Outside the visible energy range and clipped: {}",
            outside.join(", ")
        ));
    }
}

/// 打印参考线表格
fn print_line_table(layout: &BandDiagramLayout) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct LineRow {
        #[tabled(rename = "Element")]
        element: String,
        #[tabled(rename = "Style")]
        style: String,
        #[tabled(rename = "From (x, y)")]
        start: String,
        #[tabled(rename = "To (x, y)")]
        end: String,
    }

    let rows: Vec<LineRow> = layout
        .lines
        .iter()
        .map(|l| LineRow {
            element: l.kind.label().to_string(),
            style: format!("{:?}", l.style),
            start: format!("({:.2}, {:.2})", l.start.0, l.start.1),
            end: format!("({:.2}, {:.2})", l.end.0, l.end.1),
        })
        .collect();

    output::print_header(&format!(
        "Reference Lines ({} horizontal, {} curve points)",
        layout.horizontal_lines().count(),
        layout.curve.points.len()
    ));
    println!("{}", Table::new(&rows));
}

/// 图片输出路径：显式格式优先，否则保留可识别的图片扩展名
fn image_output_path(output: &Path, explicit: Option<BandOutputFormat>) -> PathBuf {
    match explicit {
        Some(format) => output.with_extension(format.to_string()),
        None if ImageFormat::from_path(output).is_ok() => output.to_path_buf(),
        None => output.with_extension("png"),
    }
}

/// 从文件扩展名推断输出格式
fn guess_format_from_extension(path: &Path) -> BandOutputFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("svg") => BandOutputFormat::Svg,
        Some("csv") => BandOutputFormat::Csv,
        Some("xy") | Some("dat") | Some("txt") => BandOutputFormat::Xy,
        _ => BandOutputFormat::Png,
    }
}
