use anyhow::Result;
use console::{Term, style};
use log::{info, warn};
use pdf_title_renamer::config::load::SETTINGS_FILE;
use pdf_title_renamer::config::types::Config;
use pdf_title_renamer::init;
use pdf_title_renamer::menu::show_main_menu;
use pdf_title_renamer::signal::setup_shutdown_signal;
use rust_i18n::t;
use std::path::Path;

#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en-US");

fn main() -> Result<()> {
    // Load config first so logging and locale follow user settings
    let (mut config, load_error) = Config::load_or_default(Path::new(SETTINGS_FILE));
    init::init(&config.settings)?;
    rust_i18n::set_locale(config.settings.language.as_str());
    if let Some(e) = load_error {
        warn!("Failed to load settings, using defaults: {e:#}");
        eprintln!("{} {e:#}", style(t!("common.settings_load_failed")).yellow());
    }

    let term = Term::stdout();
    let shutdown_signal = setup_shutdown_signal()?;
    info!("Program started");

    loop {
        // We pass the config to show_main_menu so it can update settings
        match show_main_menu(&term, &shutdown_signal, &mut config) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style(t!("main_menu.goodbye")).green().bold());
                info!("Program exited normally");
                break;
            }
            Err(e) => {
                warn!("Program error: {e}");
                eprintln!("{} {}", style(t!("main_menu.error_prefix")).red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}
