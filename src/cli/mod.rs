//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `run`: 批量复制/重命名/转换
//! - `index`: 构建索引并显示统计
//! - `config`: 配置管理
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: run, index, config

pub mod config;
pub mod index;
pub mod run;

use clap::{Parser, Subcommand};

/// Imgcopy - 表格驱动的图片批量处理工具
#[derive(Parser)]
#[command(name = "imgcopy")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "A spreadsheet-driven batch image copy, rename and convert tool", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Copy, rename or convert images listed in a spreadsheet
    Run(run::RunArgs),

    /// Build the stem index of a base folder and show statistics
    Index(index::IndexArgs),

    /// Show or reset the persisted configuration
    Config(config::ConfigArgs),
}
