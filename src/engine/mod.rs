//! # 核心引擎模块
//!
//! 文件解析与回退转换引擎：索引构建、主干解析、输出路径分配、
//! 复制/转换执行与批量运行。
//!
//! ## 功能
//! - 递归扫描基准目录，按小写文件名主干建立索引
//! - 按首选类型解析，缺失时选取最大回退文件
//! - 无覆盖的输出路径分配 (_1, _2, ...)
//! - 逐字节复制或经 `image` 重新编码
//! - 顺序批量执行，计数并记录未匹配行
//!
//! ## 依赖关系
//! - 被 `commands/` 模块调用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `image` 进行编解码
//! - 使用 `chrono` 写入运行日志时间戳

pub mod allocate;
pub mod convert;
pub mod index;
pub mod log;
pub mod resolve;
pub mod run;
pub mod sanitize;

pub use convert::ImageType;
pub use index::ImageIndex;
pub use log::RunLog;
pub use resolve::resolve;
pub use run::{
    BatchRunner, Decision, FallbackDecider, FallbackPolicy, FixedDecider, RowJob,
    RunConfiguration, RunOutcome,
};
