mod file_tools;
mod path_validator;
mod pdf_scanner;
mod pdf_text;

pub use file_tools::copy_with_metadata;
pub use path_validator::{
    PathError, ensure_directory_exists, is_same_directory, validate_directory_exists,
};
pub use pdf_scanner::{SourceFile, is_pdf_file, scan_pdf_files};
pub use pdf_text::{FirstPageText, LopdfReader, PdfTextError};
