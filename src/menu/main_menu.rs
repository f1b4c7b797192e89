use crate::config::save::save_settings;
use crate::config::types::{Config, DEFAULT_MAX_FILENAME_LENGTH, Language, LogLevel};
use crate::component::pdf_renamer::DEFAULT_TITLE;
use crate::menu::handlers::run_pdf_renamer;
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_renamer"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_pdf_renamer(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(2) | None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let options = vec![
            t!("settings.opt_max_length"),
            t!("settings.opt_logging"),
            t!("settings.opt_language"),
            t!("settings.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_max_length_menu(term, config)?,
            Some(1) => show_logging_menu(term, config)?,
            Some(2) => show_language_menu(term, config)?,
            Some(3) | None => break, // ESC or back
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// 檔名長度上限設定
fn show_max_length_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.max_length.title")).cyan().bold());
    println!(
        "\n{} {}",
        style(t!("settings.max_length.current")).dim(),
        config.settings.max_filename_length
    );
    println!();

    let min_length = DEFAULT_TITLE.chars().count();
    let value: usize = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.max_length.prompt", min = min_length))
        .default(config.settings.max_filename_length)
        .validate_with(|input: &usize| -> Result<(), String> {
            if (min_length..=DEFAULT_MAX_FILENAME_LENGTH).contains(input) {
                Ok(())
            } else {
                Err(t!(
                    "settings.max_length.invalid",
                    min = min_length,
                    max = DEFAULT_MAX_FILENAME_LENGTH
                )
                .to_string())
            }
        })
        .interact_text()?;

    if value != config.settings.max_filename_length {
        config.settings.max_filename_length = value;
        save_settings(&config.settings)?;
        println!("\n{} {}", style(t!("settings.saved")).green(), value);
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}

/// 日誌設定選單（下次啟動時生效）
fn show_logging_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.logging.title")).cyan().bold());
    println!("{}", style(t!("settings.logging.restart_hint")).dim());
    println!(
        "\n{} {} / {}",
        style(t!("settings.logging.current")).dim(),
        config.settings.log_level,
        config.settings.log_to_file
    );
    println!();

    let levels = LogLevel::all();
    let items: Vec<String> = levels.iter().map(ToString::to_string).collect();
    let default_index = levels
        .iter()
        .position(|&l| l == config.settings.log_level)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.logging.level_prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without saving
    let Some(selection) = selection else {
        return Ok(());
    };

    let log_to_file = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.logging.file_prompt"))
        .default(config.settings.log_to_file)
        .interact()?;

    let selected_level = levels[selection];
    if selected_level != config.settings.log_level || log_to_file != config.settings.log_to_file
    {
        config.settings.log_level = selected_level;
        config.settings.log_to_file = log_to_file;
        save_settings(&config.settings)?;
        println!(
            "\n{} {} / {}",
            style(t!("settings.saved")).green(),
            selected_level,
            log_to_file
        );
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}

/// 語言設定選單
fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let languages = [Language::EnUs, Language::ZhTw];

    let items: Vec<String> = languages.iter().map(|l: &Language| l.to_string()).collect();

    let default_index = languages
        .iter()
        .position(|&l| l == config.settings.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without saving
    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_lang = languages[selection];

    if selected_lang != config.settings.language {
        config.settings.language = selected_lang;
        rust_i18n::set_locale(selected_lang.as_str());
        save_settings(&config.settings)?;
        println!(
            "\n{} {}",
            style(t!("settings.saved")).green(),
            selected_lang
        );
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}
