//! # 批量运行引擎
//!
//! 顺序遍历数据集行，逐行完成解析、路径分配与复制/转换，
//! 统计计数并收集未匹配行。
//!
//! ## 功能
//! - 运行配置显式注入，引擎不依赖环境状态
//! - 回退转换前可经 `FallbackDecider` 征询逐项决定
//! - 单行复制/转换失败被捕获记录，批处理继续
//! - 取消在行边界生效，保留已写文件与计数
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `engine/` 各子模块与 `utils/progress.rs`

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};

use crate::engine::allocate::allocate_output_path;
use crate::engine::convert::{convert_image, copy_image, ImageType};
use crate::engine::index::ImageIndex;
use crate::engine::log::RunLog;
use crate::engine::resolve::resolve;
use crate::engine::sanitize::sanitize_filename;
use crate::error::{ImgcopyError, Result};
use crate::utils::progress;

/// 首选类型缺失时的回退策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Mark the row as not found, write nothing
    None,
    /// Copy the fallback file as-is
    Copy,
    /// Convert the fallback file to the preferred type
    Convert,
}

impl std::fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackPolicy::None => write!(f, "none"),
            FallbackPolicy::Copy => write!(f, "copy"),
            FallbackPolicy::Convert => write!(f, "convert"),
        }
    }
}

/// 逐项回退转换决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// 转换当前项
    Convert,
    /// 转换当前及之后全部项，本次运行内不再询问
    ConvertAll,
    /// 跳过当前项
    Skip,
    /// 取消剩余全部行
    CancelAll,
}

/// 回退转换决定端口
///
/// 交互调用方弹出提示，非交互调用方（批处理/测试）注入固定策略。
pub trait FallbackDecider {
    fn decide(&mut self, src: &Path, dest: &Path) -> Decision;
}

/// 始终返回固定决定的决定器
pub struct FixedDecider(pub Decision);

impl FallbackDecider for FixedDecider {
    fn decide(&mut self, _src: &Path, _dest: &Path) -> Decision {
        self.0
    }
}

/// 单次运行的不可变配置
#[derive(Debug, Clone)]
pub struct RunConfiguration {
    /// 首选输出类型
    pub preferred: ImageType,
    /// 回退策略
    pub fallback: FallbackPolicy,
    /// 转换前是否征询逐项决定
    pub preview: bool,
    /// 是否启用重命名列
    pub rename_enabled: bool,
}

/// 一行待处理任务
#[derive(Debug, Clone)]
pub struct RowJob {
    /// 数据集中的行下标（用于未匹配报表）
    pub row: usize,
    /// 图片路径单元格原始内容
    pub image_path: Option<String>,
    /// 重命名单元格原始内容
    pub new_name: Option<String>,
}

/// 运行计数器
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunCounters {
    pub copied_original: usize,
    pub copied_renamed: usize,
    pub converted_original: usize,
    pub converted_renamed: usize,
}

impl RunCounters {
    /// 写出的文件总数
    pub fn total_written(&self) -> usize {
        self.copied_original + self.copied_renamed + self.converted_original + self.converted_renamed
    }
}

/// 运行结果
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// 计数器
    pub counters: RunCounters,
    /// 未匹配行的下标，按源顺序
    pub not_found: Vec<usize>,
    /// 是否被用户取消
    pub cancelled: bool,
}

enum RowStatus {
    Done,
    Cancelled,
}

/// 批量运行引擎
///
/// 单线程、严格顺序；索引与计数器为运行独占，无需加锁。
pub struct BatchRunner<'a> {
    index: &'a ImageIndex,
    config: &'a RunConfiguration,
    out_dir: &'a Path,
}

impl<'a> BatchRunner<'a> {
    /// 创建批量运行引擎
    pub fn new(index: &'a ImageIndex, config: &'a RunConfiguration, out_dir: &'a Path) -> Self {
        Self {
            index,
            config,
            out_dir,
        }
    }

    /// 执行批量运行
    ///
    /// 行内复制/转换失败被记录为未匹配行后继续；
    /// `CancelAll` 在下一行边界终止运行，已写文件不回滚。
    pub fn run(
        &self,
        jobs: &[RowJob],
        decider: &mut dyn FallbackDecider,
        log: &mut RunLog,
    ) -> Result<RunOutcome> {
        fs::create_dir_all(self.out_dir).map_err(|e| ImgcopyError::FileWriteError {
            path: self.out_dir.display().to_string(),
            source: e,
        })?;

        log.info("===== New Processing Run =====");
        log.info(&format!("Total rows to process: {}", jobs.len()));
        log.info(&format!("Preferred extension: {}", self.config.preferred));
        log.info(&format!("Rename enabled: {}", self.config.rename_enabled));
        log.info(&format!("Fallback mode: {}", self.config.fallback));

        let pb = progress::create_progress_bar(jobs.len() as u64, "Starting...");

        let mut outcome = RunOutcome::default();
        // "Convert All" 仅在本次运行内生效
        let mut convert_all = false;

        for job in jobs {
            let status = self.process_row(job, decider, log, &mut convert_all, &mut outcome, &pb);
            pb.inc(1);
            if let RowStatus::Cancelled = status {
                outcome.cancelled = true;
                break;
            }
        }

        pb.finish_with_message("Finished");

        log.info("===== Run Complete =====");
        log.info(&format!(
            "Copied (original name): {}",
            outcome.counters.copied_original
        ));
        log.info(&format!(
            "Copied (renamed): {}",
            outcome.counters.copied_renamed
        ));
        log.info(&format!(
            "Converted (original name): {}",
            outcome.counters.converted_original
        ));
        log.info(&format!(
            "Converted (renamed): {}",
            outcome.counters.converted_renamed
        ));
        log.info(&format!("Not found: {}", outcome.not_found.len()));

        Ok(outcome)
    }

    fn process_row(
        &self,
        job: &RowJob,
        decider: &mut dyn FallbackDecider,
        log: &mut RunLog,
        convert_all: &mut bool,
        outcome: &mut RunOutcome,
        pb: &ProgressBar,
    ) -> RowStatus {
        let raw_path = job.image_path.as_deref().map(str::trim).unwrap_or("");

        if raw_path.is_empty() {
            log.warn("Row has empty image path - marked not found");
            outcome.not_found.push(job.row);
            return RowStatus::Done;
        }

        // 单元格可能含完整路径，只取文件名部分
        let filename = match Path::new(raw_path).file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                log.warn(&format!("Row has unusable image path: {}", raw_path));
                outcome.not_found.push(job.row);
                return RowStatus::Done;
            }
        };
        let original_stem = Path::new(&filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&filename)
            .to_lowercase();

        // 是否对本行应用了重命名，决定计数落入哪个桶
        let rename_value = if self.config.rename_enabled {
            job.new_name
                .as_deref()
                .map(sanitize_filename)
                .filter(|v| !v.is_empty())
        } else {
            None
        };
        let renamed = rename_value.is_some();
        // 输出主干一律清理；来源文件系统允许的字符目标文件系统未必允许
        let output_stem = rename_value.unwrap_or_else(|| {
            let cleaned = sanitize_filename(&original_stem);
            if cleaned.is_empty() {
                original_stem.clone()
            } else {
                cleaned
            }
        });

        let resolution = match resolve(self.index, &original_stem, self.config.preferred.extension())
        {
            Some(r) => r,
            None => {
                pb.set_message(format!("Not found: {}", filename));
                log.warn(&format!("NOT FOUND in index: {}", filename));
                outcome.not_found.push(job.row);
                return RowStatus::Done;
            }
        };

        let dest = allocate_output_path(
            self.out_dir,
            &output_stem,
            self.config.preferred.extension(),
        );

        if !resolution.fallback {
            pb.set_message(format!("Copying: {}", display_name(&dest)));
            log.info(&format!(
                "COPY preferred: {} -> {}",
                resolution.path.display(),
                dest.display()
            ));
            if let Err(e) = copy_image(&resolution.path, &dest) {
                log.error(&format!("{}", e));
                outcome.not_found.push(job.row);
                return RowStatus::Done;
            }
            self.count_copy(outcome, renamed);
            return RowStatus::Done;
        }

        log.info(&format!("Fallback found: {}", resolution.path.display()));

        match self.config.fallback {
            FallbackPolicy::None => {
                pb.set_message(format!("Not found: {}", filename));
                log.warn(&format!("NOT FOUND in index: {}", filename));
                outcome.not_found.push(job.row);
            }
            FallbackPolicy::Copy => {
                pb.set_message(format!("Copying (fallback): {}", display_name(&dest)));
                log.info(&format!(
                    "COPY fallback as-is: {} -> {}",
                    resolution.path.display(),
                    dest.display()
                ));
                if let Err(e) = copy_image(&resolution.path, &dest) {
                    log.error(&format!("{}", e));
                    outcome.not_found.push(job.row);
                    return RowStatus::Done;
                }
                self.count_copy(outcome, renamed);
            }
            FallbackPolicy::Convert => {
                if self.config.preview && !*convert_all {
                    let decision =
                        pb.suspend(|| decider.decide(&resolution.path, &dest));
                    match decision {
                        Decision::CancelAll => {
                            log.warn("User cancelled processing");
                            return RowStatus::Cancelled;
                        }
                        Decision::Skip => {
                            log.info("User skipped this image");
                            return RowStatus::Done;
                        }
                        Decision::ConvertAll => {
                            log.info("User selected Convert All");
                            *convert_all = true;
                        }
                        Decision::Convert => {}
                    }
                }

                pb.set_message(format!(
                    "Converting: {} -> {}",
                    display_name(&resolution.path),
                    display_name(&dest)
                ));
                log.info(&format!(
                    "CONVERT fallback: {} -> {}",
                    resolution.path.display(),
                    dest.display()
                ));
                if let Err(e) = convert_image(&resolution.path, &dest) {
                    log.error(&format!("{}", e));
                    outcome.not_found.push(job.row);
                    return RowStatus::Done;
                }
                if renamed {
                    outcome.counters.converted_renamed += 1;
                } else {
                    outcome.counters.converted_original += 1;
                }
            }
        }

        RowStatus::Done
    }

    fn count_copy(&self, outcome: &mut RunOutcome, renamed: bool) {
        if renamed {
            outcome.counters.copied_renamed += 1;
        } else {
            outcome.counters.copied_original += 1;
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("?")
        .to_string()
}
