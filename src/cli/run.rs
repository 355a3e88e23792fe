//! # run 子命令 CLI 定义
//!
//! 批量复制/重命名/转换电子表格引用的图片。
//! 未提供的参数回退到持久化配置中的上次取值。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use clap::Args;
use std::path::PathBuf;

use crate::engine::{FallbackPolicy, ImageType};

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// CSV spreadsheet listing the images to process
    #[arg(short, long)]
    pub spreadsheet: Option<PathBuf>,

    /// Base folder searched recursively for source images
    #[arg(short, long)]
    pub base: Option<PathBuf>,

    /// Output folder for copied/converted images
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Column holding the image path or file name
    #[arg(long)]
    pub image_column: Option<String>,

    /// Optional column holding the new file name
    #[arg(long)]
    pub rename_column: Option<String>,

    /// Optional column holding the vendor name
    #[arg(long)]
    pub vendor_column: Option<String>,

    /// Vendor to process ("all" processes every row)
    #[arg(long)]
    pub vendor: Option<String>,

    /// Preferred output image type
    #[arg(short, long, value_enum)]
    pub prefer: Option<ImageType>,

    /// Behavior when only a non-preferred file exists
    #[arg(short, long, value_enum)]
    pub fallback: Option<FallbackPolicy>,

    /// Convert fallbacks without asking (non-interactive)
    #[arg(short, long, default_value_t = false)]
    pub yes: bool,

    /// Disable the per-file preview prompt for this run
    #[arg(long, default_value_t = false)]
    pub no_preview: bool,

    /// Do not remember this run's inputs in the config file
    #[arg(long, default_value_t = false)]
    pub no_remember: bool,

    /// Skip the update check at the start of the run
    #[arg(long, default_value_t = false)]
    pub no_update_check: bool,
}
