//! # 统一错误处理模块
//!
//! 定义 Imgcopy 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// Imgcopy 统一错误类型
#[derive(Error, Debug)]
pub enum ImgcopyError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 复制与转换错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to copy file: {src} -> {dest}")]
    CopyError {
        src: String,
        dest: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Conversion failed: {src} -> {dest}\nReason: {reason}")]
    ConversionError {
        src: String,
        dest: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 数据集错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to load dataset: {path}\nReason: {reason}")]
    DatasetLoadError { path: String, reason: String },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 参数与配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    ValidationError(String),

    #[error("Failed to load config: {path}\nReason: {reason}")]
    ConfigError { path: String, reason: String },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ImgcopyError>;
