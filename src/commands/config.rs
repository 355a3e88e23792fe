//! # config 命令实现
//!
//! 查看、重置持久化配置，或打印配置文件路径。
//!
//! ## 依赖关系
//! - 使用 `cli/config.rs` 定义的参数
//! - 使用 `config/mod.rs`
//! - 使用 `utils/output.rs`

use crate::cli::config::{ConfigAction, ConfigArgs};
use crate::config::AppConfig;
use crate::error::{ImgcopyError, Result};
use crate::utils::output;

/// 执行 config 命令
pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let cfg = AppConfig::load()?;
            let content = toml::to_string_pretty(&cfg).map_err(|e| ImgcopyError::ConfigError {
                path: AppConfig::default_path().display().to_string(),
                reason: e.to_string(),
            })?;
            print!("{}", content);
            Ok(())
        }
        ConfigAction::Reset => {
            AppConfig::default().save()?;
            output::print_done("Configuration reset to defaults");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", AppConfig::default_path().display());
            Ok(())
        }
    }
}
