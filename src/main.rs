//! # bandfig - 能带示意图生成工具
//!
//! 为论文插图生成能带图：Fermi–Dirac 占据曲线、带边、费米/准费米能级、
//! 真空能级与表面。
//!
//! ## 子命令
//! - `band`   - 按给定参数绘制能带图（PNG/SVG/CSV/XY）
//! - `figure` - 绘制论文插图预设
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── diagram/   (占据函数、模型、渲染、导出、预设)
//!   ├── utils/      (输出、路径、单位)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod diagram;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
