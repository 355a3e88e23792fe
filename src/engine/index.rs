//! # 文件索引构建
//!
//! 递归扫描基准目录一次，按小写文件名主干分组全部普通文件。
//!
//! ## 功能
//! - 仅访问普通文件，跳过目录与符号链接目标以外的条目
//! - 主干小写化作为键，组内按文件名排序保证确定性
//! - 基准目录不存在时返回 `DirectoryNotFound`
//!
//! ## 依赖关系
//! - 被 `engine/resolve.rs` 和 `commands/` 使用
//! - 使用 `walkdir` 遍历目录

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{ImgcopyError, Result};

/// 小写主干 -> 同主干文件路径列表
///
/// 每次运行前重新构建，运行期间不可变。
#[derive(Debug, Default)]
pub struct ImageIndex {
    entries: HashMap<String, Vec<PathBuf>>,
    total_files: usize,
}

impl ImageIndex {
    /// 递归扫描 `base`，构建主干索引
    pub fn build(base: &Path) -> Result<Self> {
        if !base.exists() {
            return Err(ImgcopyError::DirectoryNotFound {
                path: base.display().to_string(),
            });
        }

        // 绝对化基准路径，使索引中的路径均为绝对路径
        let base = base.canonicalize().map_err(|e| ImgcopyError::FileReadError {
            path: base.display().to_string(),
            source: e,
        })?;

        let mut entries: HashMap<String, Vec<PathBuf>> = HashMap::new();
        let mut total_files = 0;

        // sort_by_file_name 固定组内枚举顺序，便于稳定的平局判定
        for entry in WalkDir::new(&base)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
                entries
                    .entry(stem.to_lowercase())
                    .or_default()
                    .push(entry.path().to_path_buf());
                total_files += 1;
            }
        }

        Ok(Self {
            entries,
            total_files,
        })
    }

    /// 查询主干对应的候选文件列表
    pub fn get(&self, stem: &str) -> Option<&[PathBuf]> {
        self.entries.get(stem).map(|v| v.as_slice())
    }

    /// 索引中的主干数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 索引是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 索引覆盖的文件总数
    pub fn total_files(&self) -> usize {
        self.total_files
    }

    /// 遍历全部 (主干, 候选列表)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
