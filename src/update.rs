//! # 版本检查
//!
//! 拉取发布端点上的裸版本字符串并与当前版本比较。
//! 任何失败均静默跳过，绝不阻塞或中断命令。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `reqwest` 阻塞客户端

use std::time::Duration;

const VERSION_URL: &str = "https://raw.githubusercontent.com/Darkatse/Imgcopy/main/version.txt";

/// 检查是否有新版本
///
/// 端点返回的版本字符串与当前版本不等时返回该字符串，
/// 网络或解析失败时返回 None。
pub fn check_for_updates() -> Option<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .ok()?;

    let body = client
        .get(VERSION_URL)
        .send()
        .ok()?
        .error_for_status()
        .ok()?
        .text()
        .ok()?;

    newer_version(&body, env!("CARGO_PKG_VERSION"))
}

/// 端点版本与当前版本的不等比较
///
/// 去除首尾空白；空响应或相同版本视为无更新。
fn newer_version(latest: &str, current: &str) -> Option<String> {
    let latest = latest.trim();
    if !latest.is_empty() && latest != current {
        Some(latest.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_different_version_is_reported() {
        assert_eq!(newer_version("2.0.0", "1.0.0"), Some("2.0.0".to_string()));
    }

    #[test]
    fn test_same_version_is_silent() {
        assert_eq!(newer_version("1.0.0", "1.0.0"), None);
    }

    #[test]
    fn test_response_is_trimmed() {
        assert_eq!(newer_version("  2.0.0\n", "1.0.0"), Some("2.0.0".to_string()));
        assert_eq!(newer_version("1.0.0\n", "1.0.0"), None);
    }

    #[test]
    fn test_empty_response_is_silent() {
        assert_eq!(newer_version("", "1.0.0"), None);
        assert_eq!(newer_version("   \n", "1.0.0"), None);
    }
}
