//! # 输出路径解析
//!
//! 由基准目录、相对目标目录、图名与扩展名组合出图片的绝对路径：
//! `<base_dir>/<target_rel_dir>/<name>.<ext>`
//!
//! 写文件前由 `ensure_parent_dir` 创建缺失的父目录。
//!
//! ## 依赖关系
//! - 被 `commands/figure.rs`, `diagram/plot.rs`, `diagram/export.rs` 使用
//! - 使用 `error.rs`

use crate::error::{BandfigError, Result};

use std::fs;
use std::path::{Component, Path, PathBuf};

/// 解析目标图片的绝对路径
///
/// `base_dir` 为相对路径时以当前工作目录为基准；`.` 与 `..` 按字面规整，不访问文件系统。
pub fn target_fig_path(
    base_dir: &Path,
    target_rel_dir: &Path,
    name: &str,
    ext: &str,
) -> Result<PathBuf> {
    let base = if base_dir.is_absolute() {
        base_dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| BandfigError::CurrentDirError {
                path: base_dir.display().to_string(),
                source: e,
            })?
            .join(base_dir)
    };

    let ext = ext.trim_start_matches('.');
    let filename = if ext.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", name, ext)
    };

    Ok(normalize(&base.join(target_rel_dir).join(filename)))
}

/// 创建 `path` 的父目录（已存在时不做任何事）
///
/// 父路径被普通文件占用时返回 `FileWriteError`，错误中带有 `path`。
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| BandfigError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })
        }
        _ => Ok(()),
    }
}

/// 按字面规整路径中的 `.` 与 `..`
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // 根目录之上不再回退
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
