//! # 运行日志
//!
//! 每次运行在输出目录写入纯文本、带时间戳的 `process_log.txt`，
//! 覆盖上一次运行的内容。日志句柄由调用方创建并注入引擎，
//! 随运行结束（含提前取消）一并释放。
//!
//! ## 依赖关系
//! - 被 `engine/run.rs` 和 `commands/run.rs` 使用
//! - 使用 `chrono` 生成时间戳

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::error::{ImgcopyError, Result};

/// 单次运行的日志句柄
pub struct RunLog {
    writer: BufWriter<File>,
}

impl RunLog {
    /// 在 `path` 创建（截断）日志文件
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| ImgcopyError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// 记录一条 INFO 行
    pub fn info(&mut self, msg: &str) {
        self.write_line("INFO", msg);
    }

    /// 记录一条 WARNING 行
    pub fn warn(&mut self, msg: &str) {
        self.write_line("WARNING", msg);
    }

    /// 记录一条 ERROR 行
    pub fn error(&mut self, msg: &str) {
        self.write_line("ERROR", msg);
    }

    // 日志写入失败不应中断批处理，静默忽略
    fn write_line(&mut self, level: &str, msg: &str) {
        let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(self.writer, "{} - {} - {}", ts, level, msg);
    }
}

impl Drop for RunLog {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
