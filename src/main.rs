//! # Imgcopy - 表格驱动的图片批量复制/重命名/转换工具
//!
//! 读取电子表格中的图片文件名，在基准目录中按文件名主干检索图片，
//! 按配置复制、重命名或转换到输出目录。
//!
//! ## 子命令
//! - `run`    - 执行批量复制/转换
//! - `index`  - 构建文件索引并显示统计信息
//! - `config` - 查看/重置持久化配置
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   ├── engine/     (索引、解析、分配、复制/转换、批量运行核心)
//!   ├── dataset/    (CSV 数据集)
//!   ├── config/     (持久化配置)
//!   ├── utils/      (工具函数)
//!   ├── update.rs   (版本检查)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod config;
mod dataset;
mod engine;
mod error;
mod update;
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
