//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `engine/`, `dataset/`, `config/`, `utils/`
//! - 子模块: run, index, config

pub mod config;
pub mod index;
pub mod run;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Run(args) => run::execute(args),
        Commands::Index(args) => index::execute(args),
        Commands::Config(args) => config::execute(args),
    }
}
