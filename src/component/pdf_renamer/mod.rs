//! PDF 依標題重新命名元件
//!
//! 讀取第一頁的 "Title" 標籤，以下一行文字作為新檔名

mod batch_renamer;
mod filename_resolver;
mod main;
mod observer;
mod title_extractor;

pub use batch_renamer::{
    BatchRenamer, FileAction, FileError, FileOutcome, RenameJob, RunError, RunMode, RunReport,
};
pub use filename_resolver::{DEFAULT_TITLE, FilenameResolver, PDF_EXTENSION};
pub use main::PdfRenamer;
pub use observer::{FileReport, NullObserver, RenameObserver, RunSummary};
pub use title_extractor::{TITLE_LABEL, extract_title};
