//! PDF 文字擷取
//!
//! 以 lopdf 讀取第一頁純文字，解析失敗與「沒有文字」明確區分

use lopdf::content::{Content, Operation};
use lopdf::{Document, ObjectId};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfTextError {
    #[error("cannot load PDF: {0}")]
    Load(String),

    #[error("PDF is encrypted")]
    Encrypted,

    #[error("cannot extract first page text: {0}")]
    Extract(String),
}

/// 第一頁文字來源
pub trait FirstPageText {
    /// 回傳第一頁純文字；沒有頁面時回傳空字串
    fn first_page_text(&self, path: &Path) -> Result<String, PdfTextError>;
}

/// 以 lopdf 實作的文字擷取器
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfReader;

impl FirstPageText for LopdfReader {
    fn first_page_text(&self, path: &Path) -> Result<String, PdfTextError> {
        let mut doc = Document::load(path).map_err(|e| PdfTextError::Load(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(PdfTextError::Encrypted);
        }

        let Some((&page_number, &page_id)) = doc.get_pages().iter().next() else {
            return Ok(String::new());
        };

        split_text_lines(&mut doc, page_id)?;

        doc.extract_text(&[page_number])
            .map_err(|e| PdfTextError::Extract(e.to_string()))
    }
}

/// 把同一個 `BT`/`ET` 區塊內的換行操作拆成獨立區塊
///
/// `extract_text` 只在 `ET` 輸出換行，`Td`、`T*` 等換行操作會讓相鄰兩行黏在一起
fn split_text_lines(doc: &mut Document, page_id: ObjectId) -> Result<(), PdfTextError> {
    let content = doc
        .get_and_decode_page_content(page_id)
        .map_err(|e| PdfTextError::Extract(e.to_string()))?;

    let mut operations = Vec::with_capacity(content.operations.len());
    let mut in_text = false;
    let mut has_text = false;
    let mut matrix_y = None;

    for operation in content.operations {
        let operator = operation.operator.as_str();

        if in_text && has_text && starts_new_line(&operation, matrix_y) {
            operations.push(Operation::new("ET", vec![]));
            operations.push(Operation::new("BT", vec![]));
            has_text = false;
        }

        match operator {
            "BT" => {
                in_text = true;
                has_text = false;
                matrix_y = None;
            }
            "ET" => in_text = false,
            "Tj" | "TJ" | "'" | "\"" => has_text = true,
            "Tm" => matrix_y = operand_value(&operation, 5),
            _ => {}
        }

        operations.push(operation);
    }

    let encoded = Content { operations }
        .encode()
        .map_err(|e| PdfTextError::Extract(e.to_string()))?;
    doc.change_page_content(page_id, encoded)
        .map_err(|e| PdfTextError::Extract(e.to_string()))
}

fn starts_new_line(operation: &Operation, matrix_y: Option<f32>) -> bool {
    match operation.operator.as_str() {
        "T*" | "'" | "\"" => true,
        "Td" | "TD" => operand_value(operation, 1).is_some_and(|ty| ty != 0.0),
        "Tm" => operand_value(operation, 5) != matrix_y,
        _ => false,
    }
}

fn operand_value(operation: &Operation, index: usize) -> Option<f32> {
    operation
        .operands
        .get(index)
        .and_then(|operand| operand.as_float().ok())
}
