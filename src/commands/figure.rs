//! # figure 命令实现
//!
//! 绘制论文插图预设。输出路径由 `utils::paths::target_fig_path` 解析。
//!
//! ## 依赖关系
//! - 使用 `cli/figure.rs` 定义的 FigureArgs
//! - 使用 `diagram/presets.rs` 获取预设参数
//! - 使用 `diagram/plot.rs` 渲染

use crate::cli::figure::FigureArgs;
use crate::commands::band::print_diagram_info;
use crate::diagram::{self, presets, BandDiagram};
use crate::error::{BandfigError, Result};
use crate::utils::{output, paths};

/// 执行 figure 命令
pub fn execute(args: FigureArgs) -> Result<()> {
    if args.list {
        print_preset_table();
        return Ok(());
    }

    let name = args
        .name
        .as_deref()
        .ok_or_else(|| BandfigError::InvalidArgument("missing preset name".to_string()))?;
    let preset = presets::find(name)?;

    output::print_header(&format!("Figure {}", preset.name));
    output::print_info(preset.description);

    let model = BandDiagram::new(preset.config.clone())?;
    let size = args.size.resolve(preset.size)?;

    print_diagram_info(&model);
    let layout = model.compute_layout();

    if args.display.show {
        output::print_info("Opening viewer");
        let shown =
            diagram::plot::render_to_display(&layout, size, args.display.viewer.as_deref())?;
        output::print_done(&format!("Viewer exited, figure kept at '{}'", shown.display()));
        return Ok(());
    }

    let target =
        paths::target_fig_path(&args.base_dir, &args.target_dir, preset.name, &args.ext)?;
    diagram::plot::render_to_file(&layout, &target, size)?;
    output::print_success(&format!("Figure saved to '{}'", target.display()));

    Ok(())
}

/// 打印预设列表
fn print_preset_table() {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct PresetRow {
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "T")]
        temperature: String,
        #[tabled(rename = "EF")]
        fermi_level: String,
        #[tabled(rename = "Quasi-EF")]
        quasi_fermi_level: String,
        #[tabled(rename = "Metal")]
        metal: String,
        #[tabled(rename = "Size (in)")]
        size: String,
        #[tabled(rename = "Description")]
        description: String,
    }

    let rows: Vec<PresetRow> = presets::all()
        .iter()
        .map(|p| PresetRow {
            name: p.name.to_string(),
            temperature: format!("{}", p.config.temperature),
            fermi_level: format!("{}", p.config.fermi_level),
            quasi_fermi_level: p
                .config
                .quasi_fermi_level
                .map(|q| q.to_string())
                .unwrap_or_else(|| "-".to_string()),
            metal: if p.config.is_metal { "yes" } else { "no" }.to_string(),
            size: format!("{:.2} x {:.2}", p.size.width_in, p.size.height_in),
            description: p.description.to_string(),
        })
        .collect();

    output::print_header("Figure Presets");
    println!("{}", Table::new(&rows));
}
