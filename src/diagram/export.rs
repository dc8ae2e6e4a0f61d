//! # 能带图数据导出
//!
//! 把几何描述导出为数据文件，便于用其他绘图工具复现。
//!
//! ## 支持格式
//! - CSV: 所有图元的顶点（element, style, x, y）
//! - XY: 占据曲线（energy, occupation 两列）
//!
//! ## 依赖关系
//! - 被 `commands/band.rs` 调用
//! - 使用 `diagram/model.rs` 的几何描述
//! - 使用 `utils/paths.rs` 创建父目录
//! - 使用 `csv` + `serde` 写入 CSV 文件

use crate::diagram::model::{BandDiagramLayout, LineKind, LineStyle};
use crate::error::{BandfigError, Result};
use crate::utils::paths::ensure_parent_dir;

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV 行
#[derive(Debug, Serialize)]
struct VertexRow {
    element: &'static str,
    style: LineStyle,
    x: f64,
    y: f64,
}

/// 导出所有图元顶点为 CSV
pub fn to_csv(layout: &BandDiagramLayout, output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let file = File::create(output_path).map_err(|e| BandfigError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    let mut wtr = csv::Writer::from_writer(file);

    for &(x, y) in &layout.curve.points {
        wtr.serialize(VertexRow {
            element: "occupation",
            style: LineStyle::Solid,
            x,
            y,
        })?;
    }

    for line in &layout.lines {
        for (x, y) in [line.start, line.end] {
            wtr.serialize(VertexRow {
                element: element_name(line.kind),
                style: line.style,
                x,
                y,
            })?;
        }
    }

    wtr.flush().map_err(|e| BandfigError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出占据曲线为 XY 格式
pub fn to_xy(layout: &BandDiagramLayout, output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let write_err = |e| BandfigError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "# Fermi-Dirac occupation").map_err(write_err)?;
    writeln!(out, "# Reference level: {:.6}", layout.curve.reference_level).map_err(write_err)?;
    writeln!(out, "# Columns: energy, occupation").map_err(write_err)?;
    writeln!(out, "#").map_err(write_err)?;

    for &(x, y) in &layout.curve.points {
        writeln!(out, "{:.6}\t{:.8}", y, -x).map_err(write_err)?;
    }

    out.flush().map_err(write_err)?;
    Ok(())
}

fn element_name(kind: LineKind) -> &'static str {
    match kind {
        LineKind::ConductionBand => "conduction_band",
        LineKind::ValenceBand => "valence_band",
        LineKind::FermiLevel => "fermi_level",
        LineKind::QuasiFermiLevel => "quasi_fermi_level",
        LineKind::VacuumLevel => "vacuum_level",
        LineKind::Surface => "surface",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::model::{BandDiagram, BandDiagramConfig};
    use std::fs;

    fn layout() -> BandDiagramLayout {
        BandDiagram::new(
            BandDiagramConfig::default()
                .with_quasi_fermi_level(Some(3.0))
                .with_sample_count(5),
        )
        .unwrap()
        .compute_layout()
    }

    #[test]
    fn test_csv_contains_every_element() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("layout.csv");
        to_csv(&layout(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("element,style,x,y"));

        // 5 个曲线点 + 6 条参考线 * 2 个端点
        assert_eq!(content.lines().count(), 1 + 5 + 12);
        assert!(content.contains("quasi_fermi_level,dash_dot,0.0,3.0"));
        assert!(content.contains("fermi_level,dashed,0.0,1.0"));
        assert!(content.contains("surface,solid,0.0,10.0"));
    }

    #[test]
    fn test_xy_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.xy");
        to_xy(&layout(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let data: Vec<(f64, f64)> = content
            .lines()
            .filter(|l| !l.starts_with('#'))
            .map(|l| {
                let cols: Vec<f64> = l.split_whitespace().map(|c| c.parse().unwrap()).collect();
                (cols[0], cols[1])
            })
            .collect();

        assert_eq!(data.len(), 5);
        assert_eq!(data[0].0, -10.0);
        assert_eq!(data[4].0, 10.0);
        assert!(data.iter().all(|(_, f)| (0.0..=1.0).contains(f)));
        assert!(content.contains("# Reference level: 3.000000"));
    }

    /// 父路径是普通文件时，错误应指明输出文件
    fn assert_write_error_names(result: Result<()>, path: &Path) {
        let expected = path.display().to_string();
        match result {
            Err(err @ BandfigError::FileWriteError { .. }) => {
                assert!(err.to_string().contains(&expected), "{}", err);
            }
            other => panic!("expected FileWriteError for {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_csv_parent_is_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("layout.csv");

        assert_write_error_names(to_csv(&layout(), &path), &path);
    }

    #[test]
    fn test_csv_target_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.csv");
        fs::create_dir(&path).unwrap();

        assert_write_error_names(to_csv(&layout(), &path), &path);
    }

    #[test]
    fn test_xy_parent_is_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("curve.xy");

        assert_write_error_names(to_xy(&layout(), &path), &path);
    }
}
