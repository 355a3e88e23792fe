//! # 文件名清理
//!
//! 去除目标文件名中的非法字符。
//!
//! ## 依赖关系
//! - 被 `engine/run.rs` 和 `commands/run.rs` 使用
//! - 使用 `regex` crate

use regex::Regex;
use std::sync::OnceLock;

static ILLEGAL_CHARS: OnceLock<Regex> = OnceLock::new();

/// 去除 `<>:"/\|?*` 并修剪首尾空白
///
/// 纯函数，永不失败。空白输入产生空字符串，
/// 调用方需自行防止生成空文件名。
pub fn sanitize_filename(name: &str) -> String {
    let re = ILLEGAL_CHARS.get_or_init(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());
    re.replace_all(name, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_illegal_chars() {
        assert_eq!(sanitize_filename(r#"a<b>c:d"e/f\g|h?i*j"#), "abcdefghij");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize_filename("  widget 01  "), "widget 01");
    }

    #[test]
    fn test_idempotent() {
        let samples = [r#"SKU:123/ A*"#, "plain", "  spaced  ", r#"<<>>??"#, ""];
        for s in samples {
            let once = sanitize_filename(s);
            assert_eq!(sanitize_filename(&once), once);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_filename(""), "");
        assert_eq!(sanitize_filename("   "), "");
        assert_eq!(sanitize_filename(r#"<>:"/\|?*"#), "");
    }
}
