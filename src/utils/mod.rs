//! # 工具函数模块
//!
//! 提供美化输出、输出路径解析、父目录创建与长度单位换算。
//!
//! ## 依赖关系
//! - 被 `commands/`, `diagram/` 模块使用
//! - 子模块: output, paths, units

pub mod output;
pub mod paths;
pub mod units;
