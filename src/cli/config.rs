//! # config 子命令 CLI 定义
//!
//! 查看、重置持久化配置，或打印配置文件路径。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/config.rs`

use clap::{Args, Subcommand};

/// config 子命令参数
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// 配置管理动作
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the current persisted configuration
    Show,

    /// Reset the configuration to defaults
    Reset,

    /// Print the path of the configuration file
    Path,
}
