use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 待處理的 PDF 檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
}

#[must_use]
pub fn is_pdf_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// 掃描資料夾第一層的 PDF 檔案（不遞迴），依檔名排序
pub fn scan_pdf_files(directory: &Path) -> io::Result<Vec<SourceFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // 無法讀取資料夾本身時整個掃描失敗，個別項目錯誤則略過
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(_) => continue,
        };

        if !entry.file_type().is_file() || !is_pdf_file(entry.path()) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        files.push(SourceFile {
            path: entry.into_path(),
            file_name,
        });
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_pdf_file_case_insensitive() {
        assert!(is_pdf_file(Path::new("/a/manual.pdf")));
        assert!(is_pdf_file(Path::new("/a/manual.PDF")));
        assert!(is_pdf_file(Path::new("/a/manual.Pdf")));
        assert!(!is_pdf_file(Path::new("/a/manual.pdf.txt")));
        assert!(!is_pdf_file(Path::new("/a/pdf")));
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.pdf"), b"b").unwrap();
        fs::write(temp_dir.path().join("a.PDF"), b"a").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), b"n").unwrap();
        fs::create_dir(temp_dir.path().join("folder.pdf")).unwrap();

        let files = scan_pdf_files(temp_dir.path()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_scan_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("deep.pdf"), b"d").unwrap();
        fs::write(temp_dir.path().join("top.pdf"), b"t").unwrap();

        let files = scan_pdf_files(temp_dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "top.pdf");
    }

    #[test]
    fn test_scan_missing_directory_is_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(scan_pdf_files(&temp_dir.path().join("missing")).is_err());
    }
}
