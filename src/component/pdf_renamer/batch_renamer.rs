//! 批次重新命名流程
//!
//! 掃描輸入資料夾 → 擷取標題 → 產生檔名 → 重新命名或複製 → 統計結果。
//! 每個檔案的錯誤只影響該檔案，只有資料夾層級的錯誤會中止整個執行。

use super::filename_resolver::FilenameResolver;
use super::observer::{FileReport, RenameObserver, RunSummary};
use super::title_extractor::extract_title;
use crate::tools::{
    FirstPageText, PathError, PdfTextError, SourceFile, copy_with_metadata,
    ensure_directory_exists, is_same_directory, scan_pdf_files, validate_directory_exists,
};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// 一次執行的參數
#[derive(Debug, Clone)]
pub struct RenameJob {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub in_place: bool,
}

impl RenameJob {
    #[must_use]
    pub fn in_place(input_dir: impl Into<PathBuf>) -> Self {
        let input_dir = input_dir.into();
        Self {
            output_dir: input_dir.clone(),
            input_dir,
            in_place: true,
        }
    }

    #[must_use]
    pub fn copy_to(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            in_place: false,
        }
    }

    /// 使用者選擇原地模式，或輸出資料夾其實就是輸入資料夾
    #[must_use]
    pub fn resolves_in_place(&self) -> bool {
        self.in_place || is_same_directory(&self.input_dir, &self.output_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// 在原資料夾中重新命名
    InPlace { directory: PathBuf },
    /// 複製到另一個資料夾，原檔不變
    CopyTo { output_dir: PathBuf },
}

impl RunMode {
    #[must_use]
    pub fn target_dir(&self) -> &Path {
        match self {
            Self::InPlace { directory } => directory,
            Self::CopyTo { output_dir } => output_dir,
        }
    }

    #[must_use]
    pub const fn is_in_place(&self) -> bool {
        matches!(self, Self::InPlace { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Rename,
    Copy,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rename => write!(f, "rename"),
            Self::Copy => write!(f, "copy"),
        }
    }
}

/// 單一檔案的錯誤，不會中止整個執行
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Parse(#[from] PdfTextError),

    #[error("permission denied: cannot {action}")]
    PermissionDenied { action: FileAction },

    #[error("cannot {action}: {source}")]
    Filesystem {
        action: FileAction,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    fn from_io(action: FileAction, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { action }
        } else {
            Self::Filesystem { action, source }
        }
    }
}

/// 中止整個執行的錯誤
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid input folder: {0}")]
    InputDirectoryInvalid(#[from] PathError),

    #[error("cannot create output folder {}: {source}", .path.display())]
    OutputDirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot list input folder {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
pub enum FileOutcome {
    Renamed { new_name: String },
    Copied { new_name: String },
    SkippedNoTitle,
    SkippedAlreadyCorrect,
    Error(FileError),
}

impl FileOutcome {
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Renamed { .. } => "renamed",
            Self::Copied { .. } => "copied",
            Self::SkippedNoTitle => "skipped_no_title",
            Self::SkippedAlreadyCorrect => "skipped_already_correct",
            Self::Error(_) => "error",
        }
    }

    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Renamed { new_name } | Self::Copied { new_name } => new_name.clone(),
            Self::SkippedNoTitle => "could not find 'Title' line on page 1".to_string(),
            Self::SkippedAlreadyCorrect => "already correctly named".to_string(),
            Self::Error(e) => e.to_string(),
        }
    }
}

/// 一次執行的完整結果
#[derive(Debug)]
pub struct RunReport {
    pub mode: RunMode,
    pub summary: RunSummary,
    pub files: Vec<FileReport>,
}

/// PDF 批次重新命名器
pub struct BatchRenamer<R> {
    reader: R,
    resolver: FilenameResolver,
    shutdown_signal: Arc<AtomicBool>,
}

impl<R: FirstPageText> BatchRenamer<R> {
    pub const fn new(
        reader: R,
        resolver: FilenameResolver,
        shutdown_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            reader,
            resolver,
            shutdown_signal,
        }
    }

    /// 執行一次批次處理
    ///
    /// 檔案清單在開始時固定，依檔名順序逐一處理；中斷訊號只在檔案之間檢查
    pub fn run(
        &self,
        job: &RenameJob,
        observer: &mut dyn RenameObserver,
    ) -> Result<RunReport, RunError> {
        validate_directory_exists(&job.input_dir)?;
        let mode = Self::prepare_mode(job)?;

        info!(
            "開始處理: {} -> {} ({})",
            job.input_dir.display(),
            mode.target_dir().display(),
            if mode.is_in_place() { "in-place" } else { "copy" }
        );

        let files = scan_pdf_files(&job.input_dir).map_err(|source| RunError::Scan {
            path: job.input_dir.clone(),
            source,
        })?;
        let total = files.len();
        info!("找到 {total} 個 PDF 檔案");

        let mut summary = RunSummary::new(total);
        let mut assigned: HashSet<String> = HashSet::new();
        let mut reports = Vec::with_capacity(total);

        for (index, file) in files.iter().enumerate() {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷訊號，停止處理剩餘 {} 個檔案", total - index);
                summary.cancelled = true;
                break;
            }

            let outcome = self
                .process_file(file, &mode, &mut assigned)
                .unwrap_or_else(FileOutcome::Error);
            summary.record(&outcome);

            let report = FileReport {
                file_name: file.file_name.clone(),
                outcome,
            };
            log_report(&report);

            observer.on_file(&report);
            observer.on_progress(index + 1, total);
            reports.push(report);
        }

        info!(
            "處理完成 - 成功: {}, 跳過: {}, 失敗: {}",
            summary.processed, summary.skipped, summary.errors
        );
        observer.on_summary(&summary);

        Ok(RunReport {
            mode,
            summary,
            files: reports,
        })
    }

    fn prepare_mode(job: &RenameJob) -> Result<RunMode, RunError> {
        if job.resolves_in_place() {
            return Ok(RunMode::InPlace {
                directory: job.input_dir.clone(),
            });
        }

        ensure_directory_exists(&job.output_dir).map_err(|source| {
            error!("無法建立輸出資料夾 {}: {source}", job.output_dir.display());
            RunError::OutputDirectoryCreation {
                path: job.output_dir.clone(),
                source,
            }
        })?;

        Ok(RunMode::CopyTo {
            output_dir: job.output_dir.clone(),
        })
    }

    fn process_file(
        &self,
        file: &SourceFile,
        mode: &RunMode,
        assigned: &mut HashSet<String>,
    ) -> Result<FileOutcome, FileError> {
        let page_text = self.reader.first_page_text(&file.path)?;

        let Some(title) = extract_title(&page_text) else {
            return Ok(FileOutcome::SkippedNoTitle);
        };
        debug!("{} 的標題: {title}", file.file_name);

        let base = self.resolver.sanitize(&title);
        let target_dir = mode.target_dir();
        let source = mode.is_in_place().then_some(file.path.as_path());
        let new_name = self.resolver.resolve(&base, target_dir, assigned, source);
        let target = target_dir.join(&new_name);

        match mode {
            RunMode::InPlace { .. } => {
                if target == file.path {
                    assigned.insert(new_name);
                    return Ok(FileOutcome::SkippedAlreadyCorrect);
                }

                fs::rename(&file.path, &target)
                    .map_err(|e| FileError::from_io(FileAction::Rename, e))?;
                assigned.insert(new_name.clone());
                Ok(FileOutcome::Renamed { new_name })
            }
            RunMode::CopyTo { .. } => {
                copy_with_metadata(&file.path, &target)
                    .map_err(|e| FileError::from_io(FileAction::Copy, e))?;
                assigned.insert(new_name.clone());
                Ok(FileOutcome::Copied { new_name })
            }
        }
    }
}

fn log_report(report: &FileReport) {
    match &report.outcome {
        FileOutcome::Renamed { .. } | FileOutcome::Copied { .. } => {
            info!("[{}] {}", report.tag(), report.detail());
        }
        FileOutcome::SkippedNoTitle | FileOutcome::SkippedAlreadyCorrect => {
            info!("[{}] {}: {}", report.tag(), report.file_name, report.detail());
        }
        FileOutcome::Error(e) => {
            warn!("[{}] {}: {e}", report.tag(), report.file_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::pdf_renamer::observer::NullObserver;
    use tempfile::TempDir;

    /// 以純文字檔模擬 PDF；內容以 `%CORRUPT` 開頭時視為解析失敗
    struct TextReader;

    impl FirstPageText for TextReader {
        fn first_page_text(&self, path: &Path) -> Result<String, PdfTextError> {
            let content =
                fs::read_to_string(path).map_err(|e| PdfTextError::Load(e.to_string()))?;
            if content.starts_with("%CORRUPT") {
                return Err(PdfTextError::Load("invalid file header".to_string()));
            }
            Ok(content)
        }
    }

    fn renamer() -> BatchRenamer<TextReader> {
        BatchRenamer::new(
            TextReader,
            FilenameResolver::new(255),
            Arc::new(AtomicBool::new(false)),
        )
    }

    #[derive(Default)]
    struct RecordingObserver {
        files: Vec<(String, &'static str)>,
        progress: Vec<(usize, usize)>,
        summaries: Vec<RunSummary>,
    }

    impl RenameObserver for RecordingObserver {
        fn on_file(&mut self, report: &FileReport) {
            self.files.push((report.file_name.clone(), report.tag()));
        }

        fn on_progress(&mut self, current: usize, total: usize) {
            self.progress.push((current, total));
        }

        fn on_summary(&mut self, summary: &RunSummary) {
            self.summaries.push(*summary);
        }
    }

    #[test]
    fn test_output_equal_to_input_resolves_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("scans");
        fs::create_dir(&input).unwrap();
        let same_via_parent = input.join("..").join("scans");

        assert!(RenameJob::copy_to(&input, &same_via_parent).resolves_in_place());
        assert!(RenameJob::in_place(&input).resolves_in_place());
        assert!(!RenameJob::copy_to(&input, temp_dir.path().join("out")).resolves_in_place());
    }

    #[test]
    fn test_in_place_rename() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("scan_001.pdf"), "Title\nAlpha").unwrap();

        let report = renamer()
            .run(&RenameJob::in_place(temp_dir.path()), &mut NullObserver)
            .unwrap();

        assert!(report.mode.is_in_place());
        assert_eq!(report.summary.processed, 1);
        assert!(temp_dir.path().join("Alpha.pdf").exists());
        assert!(!temp_dir.path().join("scan_001.pdf").exists());
    }

    #[test]
    fn test_already_correct_name_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Alpha.pdf");
        fs::write(&path, "Title\nAlpha").unwrap();
        let modified_before = fs::metadata(&path).unwrap().modified().unwrap();

        let report = renamer()
            .run(&RenameJob::in_place(temp_dir.path()), &mut NullObserver)
            .unwrap();

        assert!(matches!(
            report.files[0].outcome,
            FileOutcome::SkippedAlreadyCorrect
        ));
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "Title\nAlpha");
        assert_eq!(
            fs::metadata(&path).unwrap().modified().unwrap(),
            modified_before
        );
        assert!(!temp_dir.path().join("Alpha (1).pdf").exists());
    }

    #[test]
    fn test_collisions_follow_enumeration_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.pdf"), "Title\nReport").unwrap();
        fs::write(temp_dir.path().join("b.pdf"), "Title\nReport").unwrap();

        let report = renamer()
            .run(&RenameJob::in_place(temp_dir.path()), &mut NullObserver)
            .unwrap();

        let names: Vec<String> = report.files.iter().map(FileReport::detail).collect();
        assert_eq!(names, vec!["a.pdf -> Report.pdf", "b.pdf -> Report (1).pdf"]);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("Report (1).pdf")).unwrap(),
            "Title\nReport"
        );
    }

    #[test]
    fn test_copy_mode_creates_output_and_keeps_source() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out").join("nested");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("doc.pdf"), "Title\nBeta").unwrap();

        let report = renamer()
            .run(&RenameJob::copy_to(&input, &output), &mut NullObserver)
            .unwrap();

        assert!(!report.mode.is_in_place());
        assert!(matches!(report.files[0].outcome, FileOutcome::Copied { .. }));
        assert_eq!(
            fs::read_to_string(output.join("Beta.pdf")).unwrap(),
            "Title\nBeta"
        );
        assert_eq!(
            fs::read_to_string(input.join("doc.pdf")).unwrap(),
            "Title\nBeta"
        );
    }

    #[test]
    fn test_copy_mode_same_directory_is_in_place() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("doc.pdf"), "Title\nGamma").unwrap();

        let job = RenameJob::copy_to(temp_dir.path(), temp_dir.path().join("."));
        let report = renamer().run(&job, &mut NullObserver).unwrap();

        assert!(report.mode.is_in_place());
        assert!(temp_dir.path().join("Gamma.pdf").exists());
        assert!(!temp_dir.path().join("doc.pdf").exists());
    }

    #[test]
    fn test_parse_error_is_per_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.pdf"), "%CORRUPT").unwrap();
        fs::write(temp_dir.path().join("b.pdf"), "Title\nDelta").unwrap();

        let report = renamer()
            .run(&RenameJob::in_place(temp_dir.path()), &mut NullObserver)
            .unwrap();

        assert!(matches!(
            report.files[0].outcome,
            FileOutcome::Error(FileError::Parse(_))
        ));
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.summary.processed, 1);
        assert!(temp_dir.path().join("a.pdf").exists());
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let result = renamer().run(
            &RenameJob::in_place(temp_dir.path().join("missing")),
            &mut NullObserver,
        );
        assert!(matches!(result, Err(RunError::InputDirectoryInvalid(_))));
    }

    #[test]
    fn test_output_creation_failure_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("doc.pdf"), "Title\nEpsilon").unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"file, not folder").unwrap();

        let mut observer = RecordingObserver::default();
        let result = renamer().run(
            &RenameJob::copy_to(temp_dir.path(), blocker.join("out")),
            &mut observer,
        );

        assert!(matches!(
            result,
            Err(RunError::OutputDirectoryCreation { .. })
        ));
        assert!(observer.files.is_empty());
        assert!(observer.summaries.is_empty());
        assert!(temp_dir.path().join("doc.pdf").exists());
    }

    #[test]
    fn test_observer_receives_events_in_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.pdf"), "Title\nOne").unwrap();
        fs::write(temp_dir.path().join("b.pdf"), "no label here").unwrap();

        let mut observer = RecordingObserver::default();
        renamer()
            .run(&RenameJob::in_place(temp_dir.path()), &mut observer)
            .unwrap();

        assert_eq!(
            observer.files,
            vec![
                ("a.pdf".to_string(), "renamed"),
                ("b.pdf".to_string(), "skipped_no_title")
            ]
        );
        assert_eq!(observer.progress, vec![(1, 2), (2, 2)]);
        assert_eq!(observer.summaries.len(), 1);
        assert_eq!(observer.summaries[0].processed, 1);
        assert_eq!(observer.summaries[0].skipped, 1);
    }

    #[test]
    fn test_shutdown_signal_stops_before_next_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.pdf"), "Title\nOne").unwrap();

        let shutdown_signal = Arc::new(AtomicBool::new(true));
        let renamer = BatchRenamer::new(
            TextReader,
            FilenameResolver::new(255),
            Arc::clone(&shutdown_signal),
        );
        let report = renamer
            .run(&RenameJob::in_place(temp_dir.path()), &mut NullObserver)
            .unwrap();

        assert!(report.summary.cancelled);
        assert_eq!(report.summary.attempted(), 0);
        assert_eq!(report.summary.total, 1);
        assert!(temp_dir.path().join("a.pdf").exists());
    }

    #[test]
    fn test_file_error_permission_mapping() {
        let error = FileError::from_io(
            FileAction::Copy,
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert_eq!(error.to_string(), "permission denied: cannot copy");

        let error = FileError::from_io(FileAction::Rename, io::Error::other("disk full"));
        assert_eq!(error.to_string(), "cannot rename: disk full");
    }
}
