//! # index 子命令 CLI 定义
//!
//! 构建基准目录的文件名主干索引并显示统计信息，
//! 可选地对单个主干执行一次解析探测。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/index.rs`

use clap::Args;
use std::path::PathBuf;

use crate::engine::ImageType;

/// index 子命令参数
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Base folder to index recursively
    #[arg(short, long)]
    pub base: PathBuf,

    /// Resolve this stem against the index and show the result
    #[arg(long)]
    pub stem: Option<String>,

    /// Preferred image type used by the --stem probe
    #[arg(short, long, value_enum, default_value = "jpg")]
    pub prefer: ImageType,

    /// Number of duplicate-stem groups to list
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}
