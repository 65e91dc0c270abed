use anyhow::Result;
use colored::Colorize;

use crate::cli::SettingsCmd;
use crate::models::{Language, Theme, WeightUnit};
use crate::state::AppState;

const KEYS: &str = "theme, notifications, auto-suggest, unit, language";

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

pub async fn handle(cmd: SettingsCmd, state: &mut AppState) -> Result<()> {
    match cmd {
        SettingsCmd::Show => {
            let s = state.settings();
            println!("{}", "Settings:".cyan().bold());
            println!("  {} = {:?}", "theme".green(), s.theme);
            println!("  {} = {}", "notifications".green(), s.notifications);
            println!("  {} = {}", "auto-suggest".green(), s.auto_suggest_weight);
            println!("  {} = {:?}", "unit".green(), s.weight_unit);
            println!("  {} = {:?}", "language".green(), s.language);
        }

        SettingsCmd::Set { key, value } => {
            let mut next = state.settings().clone();

            match key.to_ascii_lowercase().as_str() {
                "theme" => match value.to_ascii_lowercase().as_str() {
                    "light" => next.theme = Theme::Light,
                    "dark" => next.theme = Theme::Dark,
                    _ => {
                        println!("{} theme must be `light` or `dark`", "error:".red().bold());
                        return Ok(());
                    }
                },

                "notifications" => match parse_bool(&value) {
                    Some(v) => next.notifications = v,
                    None => {
                        println!("{} notifications must be `on` or `off`", "error:".red().bold());
                        return Ok(());
                    }
                },

                "auto-suggest" => match parse_bool(&value) {
                    Some(v) => next.auto_suggest_weight = v,
                    None => {
                        println!("{} auto-suggest must be `on` or `off`", "error:".red().bold());
                        return Ok(());
                    }
                },

                "unit" => match value.to_ascii_lowercase().as_str() {
                    "kg" => next.weight_unit = WeightUnit::Kg,
                    "lbs" => next.weight_unit = WeightUnit::Lbs,
                    _ => {
                        println!("{} unit must be `kg` or `lbs`", "error:".red().bold());
                        return Ok(());
                    }
                },

                "language" => match value.to_ascii_lowercase().as_str() {
                    "pl" => next.language = Language::Pl,
                    "en" => next.language = Language::En,
                    _ => {
                        println!("{} language must be `pl` or `en`", "error:".red().bold());
                        return Ok(());
                    }
                },

                _ => {
                    println!(
                        "{} unknown key `{}` — available: {}",
                        "warning:".yellow().bold(),
                        key,
                        KEYS
                    );
                    return Ok(());
                }
            }

            state.update_settings(next).await?;
            println!("{} set `{}` = `{}`", "info:".blue().bold(), key.green(), value);
        }
    }

    Ok(())
}
