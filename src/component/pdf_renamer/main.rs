//! PDF 重新命名主模組
//!
//! 互動式詢問資料夾與模式，執行批次處理並顯示進度與結果

use super::batch_renamer::{BatchRenamer, FileOutcome, RenameJob, RunReport};
use super::filename_resolver::FilenameResolver;
use super::observer::{FileReport, RenameObserver, RunSummary};
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::tools::{LopdfReader, scan_pdf_files, validate_directory_exists};
use anyhow::{Result, bail};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// PDF 依標題重新命名元件
pub struct PdfRenamer {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl PdfRenamer {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    #[must_use]
    pub fn into_config(self) -> Config {
        self.config
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{}", style(t!("renamer.title")).cyan().bold());

        let Some(input_path) = self.prompt_input_path()? else {
            return Ok(());
        };
        let input_dir = PathBuf::from(&input_path);
        validate_directory_exists(&input_dir)?;

        let in_place = Confirm::new()
            .with_prompt(t!("renamer.prompt_in_place"))
            .default(false)
            .interact()?;

        let output_dir = if in_place {
            input_dir.clone()
        } else {
            let output_path = self.prompt_output_path()?;
            if output_path.is_empty() {
                bail!(t!("renamer.output_required").to_string());
            }
            self.config.settings.last_output_path = Some(output_path.clone());
            PathBuf::from(output_path)
        };

        add_recent_path(&mut self.config.settings, &input_path);
        if let Err(e) = save_settings(&self.config.settings) {
            warn!("無法儲存路徑歷史: {e}");
        }

        let pdf_count = scan_pdf_files(&input_dir)?.len();
        if pdf_count == 0 {
            println!("{}", style(t!("renamer.no_pdf_found")).yellow());
            return Ok(());
        }
        println!(
            "{}",
            style(t!("renamer.pdf_found", count = pdf_count)).green()
        );
        let job = RenameJob {
            input_dir,
            output_dir,
            in_place,
        };
        self.print_plan(&job);

        let confirmed = Confirm::new()
            .with_prompt(t!("renamer.confirm"))
            .default(true)
            .interact()?;
        if !confirmed {
            println!("{}", style(t!("common.cancelled")).yellow());
            return Ok(());
        }

        self.shutdown_signal.store(false, Ordering::SeqCst);

        let renamer = BatchRenamer::new(
            LopdfReader,
            FilenameResolver::new(self.config.settings.max_filename_length),
            Arc::clone(&self.shutdown_signal),
        );

        let mut reporter = ConsoleReporter::new(pdf_count);
        let report = renamer.run(&job, &mut reporter)?;
        print_summary(&report);

        Ok(())
    }

    fn prompt_input_path(&self) -> Result<Option<String>> {
        let recent_paths = &self.config.settings.recent_paths;

        if recent_paths.is_empty() {
            return Ok(Some(prompt_path(&t!("renamer.prompt_input"), None)?));
        }

        let mut options: Vec<String> = recent_paths
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let indicator = if Path::new(p).is_dir() { "✓" } else { "✗" };
                format!("{} [{}] {}", i + 1, indicator, p)
            })
            .collect();
        options.push(t!("renamer.new_path").to_string());

        println!("{}", style(t!("common.esc_hint")).dim());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("renamer.select_path"))
            .items(&options)
            .default(0)
            .interact_opt()?;

        match selection {
            None => Ok(None),
            Some(idx) if idx < recent_paths.len() => Ok(Some(recent_paths[idx].clone())),
            Some(_) => Ok(Some(prompt_path(&t!("renamer.prompt_input"), None)?)),
        }
    }

    fn prompt_output_path(&self) -> Result<String> {
        prompt_path(
            &t!("renamer.prompt_output"),
            self.config.settings.last_output_path.as_deref(),
        )
    }

    fn print_plan(&self, job: &RenameJob) {
        let mode = if job.resolves_in_place() {
            t!("renamer.mode_in_place")
        } else {
            t!("renamer.mode_copy")
        };

        println!();
        println!("  {} {}", style(t!("renamer.label_input")).dim(), job.input_dir.display());
        println!("  {} {}", style(t!("renamer.label_output")).dim(), job.output_dir.display());
        println!("  {} {}", style(t!("renamer.label_mode")).dim(), style(mode).cyan());
        println!(
            "  {} {}",
            style(t!("renamer.label_max_length")).dim(),
            self.config.settings.max_filename_length
        );
        println!();
    }
}

fn prompt_path(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    let path = input.interact_text()?;
    Ok(path.trim().to_string())
}

/// 以進度條顯示執行事件
struct ConsoleReporter {
    progress_bar: ProgressBar,
}

impl ConsoleReporter {
    fn new(total: usize) -> Self {
        let progress_bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        progress_bar.set_style(style);
        progress_bar.set_message(t!("renamer.processing").to_string());

        Self { progress_bar }
    }
}

impl RenameObserver for ConsoleReporter {
    fn on_file(&mut self, report: &FileReport) {
        let line = match &report.outcome {
            FileOutcome::Renamed { .. } => format!(
                "  {} {}",
                style("✔").green(),
                t!("renamer.renamed", detail = report.detail())
            ),
            FileOutcome::Copied { .. } => format!(
                "  {} {}",
                style("✔").green(),
                t!("renamer.copied", detail = report.detail())
            ),
            FileOutcome::SkippedNoTitle => format!(
                "  {} {}",
                style("⚠").yellow(),
                t!("renamer.skipped_no_title", file = &report.file_name)
            ),
            FileOutcome::SkippedAlreadyCorrect => format!(
                "  {} {}",
                style("✓").dim(),
                t!("renamer.skipped_already_correct", file = &report.file_name)
            ),
            FileOutcome::Error(_) => format!(
                "  {} {}",
                style("✘").red(),
                style(t!(
                    "renamer.file_error",
                    file = &report.file_name,
                    detail = report.detail()
                ))
                .red()
            ),
        };
        self.progress_bar.println(line);
    }

    fn on_progress(&mut self, current: usize, total: usize) {
        self.progress_bar.set_length(total as u64);
        self.progress_bar.set_position(current as u64);
    }

    fn on_summary(&mut self, summary: &RunSummary) {
        if summary.cancelled {
            self.progress_bar
                .abandon_with_message(t!("common.interrupted").to_string());
        } else {
            self.progress_bar
                .finish_with_message(t!("common.done").to_string());
        }
    }
}

fn print_summary(report: &RunReport) {
    let summary = &report.summary;

    println!();
    println!("{}", style(t!("renamer.summary_title")).cyan().bold());
    println!(
        "  {} {}",
        t!("renamer.summary_processed"),
        style(summary.processed).green()
    );
    println!(
        "  {} {}",
        t!("renamer.summary_skipped"),
        style(summary.skipped).yellow()
    );
    if summary.errors > 0 {
        println!(
            "  {} {}",
            t!("renamer.summary_errors"),
            style(summary.errors).red()
        );
    }
    if summary.cancelled {
        println!(
            "  {}",
            style(t!(
                "renamer.summary_cancelled",
                remaining = summary.total - summary.attempted()
            ))
            .yellow()
        );
    }
    println!(
        "  {} {}",
        style(t!("renamer.label_output")).dim(),
        report.mode.target_dir().display()
    );
}
