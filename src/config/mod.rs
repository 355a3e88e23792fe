//! # 持久化配置模块
//!
//! 记住上次运行的路径、列映射与转换偏好，TOML 序列化到
//! 平台配置目录，启动时加载、运行正常结束时保存。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `serde` + `toml` 序列化
//! - 使用 `dirs` 定位配置目录

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::{FallbackPolicy, ImageType};
use crate::error::{ImgcopyError, Result};

/// 持久化应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 是否记住输入
    pub remember: bool,
    /// 上次使用的电子表格
    pub spreadsheet: Option<PathBuf>,
    /// 上次使用的基准目录
    pub base: Option<PathBuf>,
    /// 上次使用的输出目录
    pub output: Option<PathBuf>,
    /// 图片路径列
    pub image_column: Option<String>,
    /// 重命名列
    pub rename_column: Option<String>,
    /// 供应商列
    pub vendor_column: Option<String>,
    /// 选中的供应商
    pub vendor: Option<String>,
    /// 首选输出类型
    pub preferred: ImageType,
    /// 回退策略
    pub fallback: FallbackPolicy,
    /// 转换前是否预览征询
    pub preview: bool,
    /// 冲突时自动重命名（运行路径始终自动加后缀，此键仅为兼容保留）
    pub auto_rename: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remember: true,
            spreadsheet: None,
            base: None,
            output: None,
            image_column: None,
            rename_column: None,
            vendor_column: None,
            vendor: None,
            preferred: ImageType::Jpg,
            fallback: FallbackPolicy::Convert,
            preview: true,
            auto_rename: true,
        }
    }
}

impl AppConfig {
    /// 默认配置文件路径
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("imgcopy")
            .join("config.toml")
    }

    /// 从 `path` 加载；文件不存在时返回默认配置
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ImgcopyError::ConfigError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ImgcopyError::ConfigError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// 保存到 `path`，按需创建父目录
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ImgcopyError::FileWriteError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ImgcopyError::ConfigError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        fs::write(path, content).map_err(|e| ImgcopyError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// 从默认路径加载
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// 保存到默认路径
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }
}
