//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `diagram/`, `utils/`
//! - 子模块: band, figure

pub mod band;
pub mod figure;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Band(args) => band::execute(args),
        Commands::Figure(args) => figure::execute(args),
    }
}
