//! 檔名產生模組
//!
//! 清理標題中的非法字元、限制長度，並在目標資料夾中找出不衝突的檔名

use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

/// 標題無法產生有效檔名時使用的名稱
pub const DEFAULT_TITLE: &str = "Untitled Manual";

pub const PDF_EXTENSION: &str = "pdf";

static REGEX_ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/:*?"<>|]"#).expect("Invalid regex"));

/// 檔名產生器
#[derive(Debug, Clone)]
pub struct FilenameResolver {
    max_length: usize,
    regex_illegal_chars: &'static Regex,
}

impl FilenameResolver {
    /// `max_length` 為 0 時視為 1
    ///
    /// 小於預設名稱長度時，截斷依然照 `max_length`，但回退名稱 `DEFAULT_TITLE` 維持完整
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length: max_length.max(1),
            regex_illegal_chars: &REGEX_ILLEGAL_CHARS,
        }
    }

    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// 將標題轉為檔名主體（不含副檔名），結果不會是空字串
    #[must_use]
    pub fn sanitize(&self, raw_title: &str) -> String {
        if raw_title.is_empty() {
            return DEFAULT_TITLE.to_string();
        }

        let without_illegal = self.regex_illegal_chars.replace_all(raw_title, "");
        let mut result = without_illegal
            .trim_matches(|c: char| c == ' ' || c == '.')
            .to_string();

        if result.chars().count() > self.max_length {
            let truncated: String = result.chars().take(self.max_length).collect();
            result = truncated.trim_end().to_string();
        }

        if result.is_empty() {
            return DEFAULT_TITLE.to_string();
        }

        result
    }

    /// 找出目標資料夾中可用的檔名
    ///
    /// 已存在於磁碟（且不是 `source` 本身）或本次執行已指派過的名稱視為佔用，
    /// 依序嘗試 `base (1).pdf`、`base (2).pdf`…，取第一個可用的
    #[must_use]
    pub fn resolve(
        &self,
        base: &str,
        target_dir: &Path,
        assigned: &HashSet<String>,
        source: Option<&Path>,
    ) -> String {
        let is_taken = |name: &str| {
            if assigned.contains(name) {
                return true;
            }
            let candidate = target_dir.join(name);
            candidate.exists() && source.is_none_or(|source| source != candidate)
        };

        let mut name = format!("{base}.{PDF_EXTENSION}");
        let mut counter = 1;

        while is_taken(&name) {
            name = format!("{base} ({counter}).{PDF_EXTENSION}");
            counter += 1;
        }

        name
    }
}
