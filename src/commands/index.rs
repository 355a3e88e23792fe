//! # index 命令实现
//!
//! 构建基准目录的主干索引，显示统计信息与重复主干分组，
//! 可选执行单主干解析探测。
//!
//! ## 依赖关系
//! - 使用 `cli/index.rs` 定义的参数
//! - 使用 `engine/index.rs`, `engine/resolve.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use tabled::{Table, Tabled};

use crate::cli::index::IndexArgs;
use crate::engine::{resolve, ImageIndex};
use crate::error::Result;
use crate::utils::{output, progress};

/// 重复主干表行
#[derive(Tabled)]
struct DupRow {
    #[tabled(rename = "Stem")]
    stem: String,
    #[tabled(rename = "Files")]
    files: usize,
}

/// 执行 index 命令
pub fn execute(args: IndexArgs) -> Result<()> {
    output::print_header(&format!("Indexing '{}'", args.base.display()));

    let spinner = progress::create_spinner("Indexing images...");
    let index = ImageIndex::build(&args.base);
    spinner.finish_and_clear();
    let index = index?;

    if index.is_empty() {
        output::print_warning("Base folder contains no files");
        return Ok(());
    }

    output::print_info(&format!(
        "Index ready: {} stems, {} files",
        index.len(),
        index.total_files()
    ));

    // 同主干多文件的分组，候选数降序
    let mut dups: Vec<DupRow> = index
        .iter()
        .filter(|(_, candidates)| candidates.len() > 1)
        .map(|(stem, candidates)| DupRow {
            stem: stem.to_string(),
            files: candidates.len(),
        })
        .collect();
    dups.sort_by(|a, b| b.files.cmp(&a.files).then(a.stem.cmp(&b.stem)));

    if dups.is_empty() {
        output::print_info("No duplicate stems found");
    } else {
        output::print_info(&format!(
            "{} stem(s) with multiple files (top {}):",
            dups.len(),
            args.top.min(dups.len())
        ));
        dups.truncate(args.top);
        println!("{}", Table::new(dups));
    }

    if let Some(stem) = &args.stem {
        let stem = stem.to_lowercase();
        match resolve(&index, &stem, args.prefer.extension()) {
            Some(res) if !res.fallback => {
                output::print_success(&format!(
                    "'{}' resolves to preferred match: {}",
                    stem,
                    res.path.display()
                ));
            }
            Some(res) => {
                output::print_warning(&format!(
                    "'{}' resolves to fallback: {}",
                    stem,
                    res.path.display()
                ));
            }
            None => {
                output::print_warning(&format!("'{}' not found in index", stem));
            }
        }
    }

    Ok(())
}
