//! # run 命令实现
//!
//! 合并命令行参数与持久化配置，加载数据集、构建索引，
//! 驱动批量运行引擎并输出汇总。
//!
//! ## 功能
//! - 参数优先于配置，remember 开启时回填上次输入
//! - 供应商过滤
//! - 交互式回退转换决定（dialoguer），--yes 时自动转换
//! - 未匹配行写出 CSV 报表，计数器以表格显示
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `engine/`, `dataset/`, `config/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use std::fs;
use std::path::{Path, PathBuf};

use dialoguer::Select;
use tabled::{Table, Tabled};

use crate::cli::run::RunArgs;
use crate::config::AppConfig;
use crate::dataset::Dataset;
use crate::engine::{
    BatchRunner, Decision, FallbackDecider, FallbackPolicy, FixedDecider, ImageIndex, ImageType,
    RowJob, RunConfiguration, RunLog, RunOutcome,
};
use crate::error::{ImgcopyError, Result};
use crate::utils::{output, progress};

/// 运行日志文件名
const LOG_FILE: &str = "process_log.txt";
/// 未匹配行报表文件名
const REPORT_FILE: &str = "not_found_images.csv";

/// 汇总表行
#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Outcome")]
    outcome: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
}

/// 交互式回退转换决定器
struct PromptDecider;

impl FallbackDecider for PromptDecider {
    fn decide(&mut self, src: &Path, dest: &Path) -> Decision {
        let size_kb = fs::metadata(src).map(|m| m.len() as f64 / 1024.0).unwrap_or(0.0);

        output::print_separator();
        output::print_info(&format!("Source file found: {}", src.display()));
        output::print_info(&format!("File size: {:.1} KB", size_kb));
        output::print_info(&format!(
            "Destination file: {}",
            dest.file_name().and_then(|n| n.to_str()).unwrap_or("?")
        ));

        let choice = Select::new()
            .with_prompt("This image is not the preferred file type. Convert it?")
            .items(&["Convert", "Convert All", "Skip", "Cancel All"])
            .default(0)
            .interact();

        match choice {
            Ok(0) => Decision::Convert,
            Ok(1) => Decision::ConvertAll,
            Ok(2) => Decision::Skip,
            // 提示失败（如非终端）按取消处理
            _ => Decision::CancelAll,
        }
    }
}

/// 执行 run 命令
pub fn execute(args: RunArgs) -> Result<()> {
    if !args.no_update_check {
        // 更新检查失败时静默跳过
        if let Some(latest) = crate::update::check_for_updates() {
            output::print_info(&format!(
                "A new version ({}) is available. You are running {}.",
                latest,
                env!("CARGO_PKG_VERSION")
            ));
        }
    }

    let mut cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            output::print_warning(&format!("{}", e));
            AppConfig::default()
        }
    };

    // 命令行参数优先；remember 关闭时不回填上次输入
    let remembered = |v: &Option<PathBuf>| if cfg.remember { v.clone() } else { None };
    let remembered_s = |v: &Option<String>| if cfg.remember { v.clone() } else { None };

    let spreadsheet = args
        .spreadsheet
        .clone()
        .or_else(|| remembered(&cfg.spreadsheet))
        .ok_or_else(|| {
            ImgcopyError::ValidationError("Please provide a spreadsheet (--spreadsheet)".into())
        })?;
    let base = args
        .base
        .clone()
        .or_else(|| remembered(&cfg.base))
        .ok_or_else(|| {
            ImgcopyError::ValidationError("Base image folder is required (--base)".into())
        })?;
    let out_dir = args
        .output
        .clone()
        .or_else(|| remembered(&cfg.output))
        .ok_or_else(|| {
            ImgcopyError::ValidationError("Please provide an output folder (--output)".into())
        })?;
    let image_column = args
        .image_column
        .clone()
        .or_else(|| remembered_s(&cfg.image_column))
        .ok_or_else(|| {
            ImgcopyError::ValidationError("Image path column is required (--image-column)".into())
        })?;

    let rename_column = args
        .rename_column
        .clone()
        .or_else(|| remembered_s(&cfg.rename_column));
    let vendor_column = args
        .vendor_column
        .clone()
        .or_else(|| remembered_s(&cfg.vendor_column));
    let vendor = args.vendor.clone().or_else(|| remembered_s(&cfg.vendor));

    let preferred: ImageType = args.prefer.unwrap_or(cfg.preferred);
    let fallback: FallbackPolicy = args.fallback.unwrap_or(cfg.fallback);
    let preview = cfg.preview && !args.no_preview && !args.yes;

    output::print_header("Batch Image Copy & Convert");

    // ── 数据集 ──
    let dataset = Dataset::load(&spreadsheet)?;
    output::print_info(&format!(
        "Loaded {} rows from '{}'",
        dataset.len(),
        spreadsheet.display()
    ));

    let img_col = dataset.column_index(&image_column).ok_or_else(|| {
        ImgcopyError::ValidationError(format!(
            "Column '{}' not found in spreadsheet",
            image_column
        ))
    })?;
    let rename_col = match &rename_column {
        Some(name) => Some(dataset.column_index(name).ok_or_else(|| {
            ImgcopyError::ValidationError(format!("Column '{}' not found in spreadsheet", name))
        })?),
        None => None,
    };
    let vendor_col = match &vendor_column {
        Some(name) => Some(dataset.column_index(name).ok_or_else(|| {
            ImgcopyError::ValidationError(format!("Column '{}' not found in spreadsheet", name))
        })?),
        None => None,
    };
    validate_vendor_filter(vendor_col, vendor.as_deref())?;

    // ── 索引 ──
    let spinner = progress::create_spinner("Indexing images...");
    let index = ImageIndex::build(&base);
    spinner.finish_and_clear();
    let index = index?;
    output::print_info(&format!(
        "Index ready: {} stems, {} files",
        index.len(),
        index.total_files()
    ));

    if dataset.is_empty() {
        output::print_warning("Spreadsheet has no data rows");
    }

    // ── 行任务 ──
    if let Some(c) = vendor_col {
        if vendor.is_none() {
            output::print_info(&format!(
                "Vendors found: {}",
                dataset.vendors(c).join(", ")
            ));
        }
    }
    let row_indices = dataset.filter_rows(vendor_col, vendor.as_deref());
    if let (Some(_), Some(v)) = (vendor_col, vendor.as_deref()) {
        if !v.trim().eq_ignore_ascii_case("all") {
            output::print_info(&format!(
                "Vendor filter '{}': {} of {} rows selected",
                v.trim(),
                row_indices.len(),
                dataset.len()
            ));
        }
    }

    let jobs: Vec<RowJob> = row_indices
        .iter()
        .map(|&i| RowJob {
            row: i,
            image_path: dataset.value(i, img_col).map(str::to_string),
            new_name: rename_col.and_then(|c| dataset.value(i, c)).map(str::to_string),
        })
        .collect();

    // ── 运行 ──
    fs::create_dir_all(&out_dir).map_err(|e| ImgcopyError::FileWriteError {
        path: out_dir.display().to_string(),
        source: e,
    })?;
    let mut log = RunLog::create(&out_dir.join(LOG_FILE))?;

    let run_cfg = RunConfiguration {
        preferred,
        fallback,
        preview,
        rename_enabled: rename_col.is_some(),
    };

    let mut decider: Box<dyn FallbackDecider> = if preview {
        Box::new(PromptDecider)
    } else {
        Box::new(FixedDecider(Decision::Convert))
    };

    let runner = BatchRunner::new(&index, &run_cfg, &out_dir);
    let outcome = runner.run(&jobs, decider.as_mut(), &mut log)?;

    finalize(&dataset, &out_dir, &outcome, jobs.len(), &mut log)?;

    // ── 保存配置 ──
    if cfg.remember && !args.no_remember {
        cfg.spreadsheet = Some(spreadsheet);
        cfg.base = Some(base);
        cfg.output = Some(out_dir);
        cfg.image_column = Some(image_column);
        cfg.rename_column = rename_column;
        cfg.vendor_column = vendor_column;
        cfg.vendor = vendor;
        cfg.preferred = preferred;
        cfg.fallback = fallback;
        if let Err(e) = cfg.save() {
            output::print_warning(&format!("{}", e));
        }
    }

    Ok(())
}

/// 校验供应商过滤参数的组合
///
/// 只给供应商取值而未指定供应商列时无法过滤，立即报错而非静默处理全部行。
fn validate_vendor_filter(vendor_col: Option<usize>, vendor: Option<&str>) -> Result<()> {
    if vendor_col.is_none() && vendor.is_some() {
        return Err(ImgcopyError::ValidationError(
            "Vendor filter requires a vendor column (--vendor-column)".into(),
        ));
    }
    Ok(())
}

/// 写出报表并打印汇总
fn finalize(
    dataset: &Dataset,
    out_dir: &Path,
    outcome: &RunOutcome,
    total: usize,
    log: &mut RunLog,
) -> Result<()> {
    if !outcome.not_found.is_empty() {
        let report = out_dir.join(REPORT_FILE);
        dataset.write_report(&report, &outcome.not_found)?;
        log.info(&format!("Missing rows exported to {}", REPORT_FILE));
        output::print_warning(&format!(
            "{} row(s) not matched; report written to '{}'",
            outcome.not_found.len(),
            report.display()
        ));
    }

    let c = &outcome.counters;
    let table = Table::new(vec![
        SummaryRow {
            outcome: "Copied (original name)",
            count: c.copied_original,
        },
        SummaryRow {
            outcome: "Copied (renamed)",
            count: c.copied_renamed,
        },
        SummaryRow {
            outcome: "Converted (original name)",
            count: c.converted_original,
        },
        SummaryRow {
            outcome: "Converted (renamed)",
            count: c.converted_renamed,
        },
        SummaryRow {
            outcome: "Not found",
            count: outcome.not_found.len(),
        },
    ]);
    println!("{}", table);

    if outcome.cancelled {
        output::print_warning(&format!(
            "Run cancelled; {} file(s) already written were kept",
            c.total_written()
        ));
    } else {
        output::print_done(&format!(
            "Processed {} row(s), wrote {} file(s) to '{}'",
            total,
            c.total_written(),
            out_dir.display()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_without_column_is_rejected() {
        let result = validate_vendor_filter(None, Some("Acme"));
        assert!(matches!(result, Err(ImgcopyError::ValidationError(_))));
    }

    #[test]
    fn test_vendor_filter_valid_combinations() {
        assert!(validate_vendor_filter(None, None).is_ok());
        assert!(validate_vendor_filter(Some(2), None).is_ok());
        assert!(validate_vendor_filter(Some(2), Some("Acme")).is_ok());
        assert!(validate_vendor_filter(Some(2), Some("all")).is_ok());
    }
}
