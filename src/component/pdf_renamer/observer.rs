//! 執行事件回報
//!
//! 核心流程只透過 [`RenameObserver`] 回報事件，顯示方式由呼叫端決定

use super::batch_renamer::FileOutcome;

/// 單一檔案的處理結果
#[derive(Debug)]
pub struct FileReport {
    pub file_name: String,
    pub outcome: FileOutcome,
}

impl FileReport {
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.outcome.tag()
    }

    /// 顯示用的詳細說明，成功時為 `舊檔名 -> 新檔名`
    #[must_use]
    pub fn detail(&self) -> String {
        match &self.outcome {
            FileOutcome::Renamed { new_name } | FileOutcome::Copied { new_name } => {
                format!("{} -> {}", self.file_name, new_name)
            }
            other => other.detail(),
        }
    }
}

/// 執行結果統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    /// 成功重新命名或複製的檔案數
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// 是否因中斷訊號提前結束
    pub cancelled: bool,
}

impl RunSummary {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Renamed { .. } | FileOutcome::Copied { .. } => self.processed += 1,
            FileOutcome::SkippedNoTitle | FileOutcome::SkippedAlreadyCorrect => self.skipped += 1,
            FileOutcome::Error(_) => self.errors += 1,
        }
    }

    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.processed + self.skipped + self.errors
    }
}

pub trait RenameObserver {
    fn on_file(&mut self, report: &FileReport);

    /// 每個檔案處理完成後呼叫
    fn on_progress(&mut self, current: usize, total: usize);

    fn on_summary(&mut self, summary: &RunSummary);
}

/// 不做任何事的觀察者
#[derive(Debug, Default)]
pub struct NullObserver;

impl RenameObserver for NullObserver {
    fn on_file(&mut self, _report: &FileReport) {}

    fn on_progress(&mut self, _current: usize, _total: usize) {}

    fn on_summary(&mut self, _summary: &RunSummary) {}
}
