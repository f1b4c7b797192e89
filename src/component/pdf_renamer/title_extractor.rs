//! 標題擷取模組
//!
//! 在第一頁文字中找出 "Title" 標籤行，取其後第一個非空白行作為標題

/// 標籤行內容（比對時不分大小寫）
pub const TITLE_LABEL: &str = "title";

/// 從第一頁文字擷取標題
///
/// 只使用第一個標籤行；標籤之後沒有非空白行時回傳 `None`
#[must_use]
pub fn extract_title(page_text: &str) -> Option<String> {
    let mut lines = page_text.lines().map(str::trim);

    lines.find(|line| line.to_lowercase() == TITLE_LABEL)?;

    lines.find(|line| !line.is_empty()).map(str::to_string)
}
