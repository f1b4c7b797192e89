use crate::component::PdfRenamer;
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use log::error;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_pdf_renamer(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let mut renamer = PdfRenamer::new(config.clone(), Arc::clone(shutdown_signal));

    if let Err(e) = renamer.run() {
        error!("執行失敗: {e:#}");
        eprintln!("{} {:#}", style(t!("common.error_prefix")).red().bold(), e);
    }

    // 路徑歷史由元件更新，同步回目前設定
    *config = renamer.into_config();

    pause(term)?;
    Ok(())
}
