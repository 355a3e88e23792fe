//! # 数据集模块
//!
//! 加载 CSV 电子表格为表头 + 字符串记录，提供列查找、
//! 供应商过滤与未匹配行报表写出。
//!
//! ## 功能
//! - 表头按名称查列，大小写敏感
//! - 供应商列去空白后等值过滤，"all" 不过滤
//! - 报表保留原始行的全部列
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 使用 `csv` crate

use std::collections::BTreeSet;
use std::path::Path;

use csv::StringRecord;

use crate::error::{ImgcopyError, Result};

/// 已加载的表格数据集，只读
#[derive(Debug)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl Dataset {
    /// 从 CSV 文件加载
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| ImgcopyError::DatasetLoadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let headers = reader
            .headers()
            .map_err(|e| ImgcopyError::DatasetLoadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ImgcopyError::DatasetLoadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            rows.push(record);
        }

        Ok(Self { headers, rows })
    }

    /// 列名列表
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 是否无数据行
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按名称查找列下标
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 读取单元格，行越界或列越界返回 None
    pub fn value(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// 供应商列的去重取值，去空白、按字典序
    pub fn vendors(&self, vendor_col: usize) -> Vec<String> {
        let set: BTreeSet<String> = self
            .rows
            .iter()
            .filter_map(|r| r.get(vendor_col))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        set.into_iter().collect()
    }

    /// 按供应商过滤行下标
    ///
    /// `vendor_col` 为 None 或取值为 "all"（不区分大小写）时返回全部行。
    pub fn filter_rows(&self, vendor_col: Option<usize>, vendor: Option<&str>) -> Vec<usize> {
        let all: Vec<usize> = (0..self.rows.len()).collect();

        let (col, wanted) = match (vendor_col, vendor) {
            (Some(c), Some(v)) if !v.trim().eq_ignore_ascii_case("all") => (c, v.trim()),
            _ => return all,
        };

        all.into_iter()
            .filter(|&i| {
                self.value(i, col)
                    .map(|v| v.trim() == wanted)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// 将指定行写为 CSV 报表，保留全部原始列
    pub fn write_report(&self, path: &Path, row_indices: &[usize]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;

        wtr.write_record(&self.headers)?;
        for &i in row_indices {
            if let Some(record) = self.rows.get(i) {
                wtr.write_record(record)?;
            }
        }

        wtr.flush().map_err(|e| ImgcopyError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_csv(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("items.csv");
        fs::write(
            &path,
            "image,new_name,vendor\n\
             photos/sku1.jpg,Widget A, Acme \n\
             sku2,,Globex\n\
             sku3,Widget C,Acme\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_load_headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::load(&sample_csv(dir.path())).unwrap();

        assert_eq!(ds.headers(), &["image", "new_name", "vendor"]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column_index("new_name"), Some(1));
        assert_eq!(ds.column_index("missing"), None);
        assert_eq!(ds.value(0, 0), Some("photos/sku1.jpg"));
        assert_eq!(ds.value(1, 1), Some(""));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Dataset::load(Path::new("/nonexistent/items.csv"));
        assert!(matches!(result, Err(ImgcopyError::DatasetLoadError { .. })));
    }

    #[test]
    fn test_vendor_values_trimmed_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::load(&sample_csv(dir.path())).unwrap();

        assert_eq!(ds.vendors(2), vec!["Acme", "Globex"]);
    }

    #[test]
    fn test_filter_rows_by_vendor() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::load(&sample_csv(dir.path())).unwrap();

        assert_eq!(ds.filter_rows(Some(2), Some("Acme")), vec![0, 2]);
        assert_eq!(ds.filter_rows(Some(2), Some("all")), vec![0, 1, 2]);
        assert_eq!(ds.filter_rows(Some(2), Some("All")), vec![0, 1, 2]);
        assert_eq!(ds.filter_rows(None, None), vec![0, 1, 2]);
    }

    #[test]
    fn test_report_preserves_all_columns() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::load(&sample_csv(dir.path())).unwrap();

        let report = dir.path().join("not_found_images.csv");
        ds.write_report(&report, &[2, 0]).unwrap();

        let reread = Dataset::load(&report).unwrap();
        assert_eq!(reread.headers(), ds.headers());
        assert_eq!(reread.len(), 2);
        assert_eq!(reread.value(0, 1), Some("Widget C"));
        assert_eq!(reread.value(1, 0), Some("photos/sku1.jpg"));
    }
}
