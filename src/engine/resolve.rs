//! # 主干解析
//!
//! 在索引中为单个主干选取来源文件：优先匹配首选扩展名，
//! 否则回退到体积最大的候选文件。
//!
//! ## 依赖关系
//! - 被 `engine/run.rs` 和 `commands/index.rs` 调用
//! - 使用 `engine/index.rs` 的 ImageIndex

use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::index::ImageIndex;

/// 单个主干的解析结果
#[derive(Debug, Clone)]
pub struct Resolution {
    /// 选中的来源文件
    pub path: PathBuf,
    /// 是否为回退文件（非首选类型）
    pub fallback: bool,
}

/// 解析主干
///
/// 1. 主干不在索引中 -> `None`
/// 2. 候选中存在扩展名（大小写不敏感）等于 `preferred_ext` 的文件
///    -> 返回枚举顺序中的第一个，`fallback = false`
/// 3. 否则返回体积最大的候选（平局取先出现者），`fallback = true`
///
/// `preferred_ext` 不含点号，如 `"jpg"`。
pub fn resolve(index: &ImageIndex, stem: &str, preferred_ext: &str) -> Option<Resolution> {
    let candidates = index.get(stem)?;

    for p in candidates {
        if extension_matches(p, preferred_ext) {
            return Some(Resolution {
                path: p.clone(),
                fallback: false,
            });
        }
    }

    // 最大文件即信息量最多的替代来源；严格大于保证平局取先出现者
    let mut best: Option<(&PathBuf, u64)> = None;
    for p in candidates {
        let size = fs::metadata(p).map(|m| m.len()).unwrap_or(0);
        match best {
            Some((_, best_size)) if size <= best_size => {}
            _ => best = Some((p, size)),
        }
    }

    best.map(|(p, _)| Resolution {
        path: p.clone(),
        fallback: true,
    })
}

fn extension_matches(path: &Path, preferred_ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(preferred_ext))
        .unwrap_or(false)
}
