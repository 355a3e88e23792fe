//! # 输出路径分配
//!
//! 为目标目录/主干/扩展名计算调用时刻不存在的输出路径，
//! 被占用时追加 `_1, _2, ...` 后缀。
//!
//! ## 依赖关系
//! - 被 `engine/run.rs` 调用

use std::path::{Path, PathBuf};

/// 返回无冲突的输出路径
///
/// 先尝试 `name.ext`，被占用则依次尝试 `name_1.ext`, `name_2.ext`, ...
/// 与外部并发写入者之间不具原子性，运行引擎为单线程顺序执行。
/// `ext` 不含点号。
pub fn allocate_output_path(out_dir: &Path, base_name: &str, ext: &str) -> PathBuf {
    let candidate = out_dir.join(format!("{}.{}", base_name, ext));
    if !candidate.exists() {
        return candidate;
    }

    let mut i = 1;
    loop {
        let candidate = out_dir.join(format!("{}_{}.{}", base_name, i, ext));
        if !candidate.exists() {
            return candidate;
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_free_name_returned_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let p = allocate_output_path(dir.path(), "widget", "jpg");
        assert_eq!(p, dir.path().join("widget.jpg"));
        assert!(!p.exists());
    }

    #[test]
    fn test_idempotent_when_nothing_written() {
        let dir = tempfile::tempdir().unwrap();
        let first = allocate_output_path(dir.path(), "widget", "jpg");
        let second = allocate_output_path(dir.path(), "widget", "jpg");
        assert_eq!(first, second);
    }

    #[test]
    fn test_suffix_increments_past_occupied() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("widget.jpg"), b"a").unwrap();

        let p = allocate_output_path(dir.path(), "widget", "jpg");
        assert_eq!(p, dir.path().join("widget_1.jpg"));

        fs::write(&p, b"b").unwrap();
        let p2 = allocate_output_path(dir.path(), "widget", "jpg");
        assert_eq!(p2, dir.path().join("widget_2.jpg"));
    }
}
