//! Config command handler

use crate::args::ConfigSubcommand;
use std::io::{self, BufRead, Write};
use timetabler::config::Config;

/// Keys accepted by `config get/set/unset`
const KEYS: [&str; 9] = [
    "level",
    "file",
    "verbose",
    "count",
    "strategy",
    "limit",
    "parallel",
    "offerings_file",
    "out_dir",
];

/// Dispatch config subcommands
///
/// # Errors
/// Returns a printable message for unknown keys, invalid values or failed writes
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => {
            let value = config.get(&key).ok_or_else(|| unknown_key(&key))?;
            println!("{value}");
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => {
            config.set(&key, &value).map_err(|e| format!("✗ {e}"))?;
            save(config)?;
            println!("✓ Set {key} = {value}");
            Ok(())
        }
        Some(ConfigSubcommand::Unset { key }) => {
            config
                .unset(&key, defaults)
                .map_err(|_| unknown_key(&key))?;
            save(config)?;
            println!("✓ Reset {key} to default");
            Ok(())
        }
        Some(ConfigSubcommand::Reset) => reset(&mut io::stdin().lock()),
    }
}

fn show_all(config: &Config) {
    println!("\n=== Configuration ===\n");
    print!("{config}");
    println!("\n(file: {})", Config::get_config_file_path().display());
}

fn unknown_key(key: &str) -> String {
    format!(
        "✗ Unknown config key: '{key}' (expected one of: {})",
        KEYS.join(", ")
    )
}

fn save(config: &Config) -> Result<(), String> {
    config
        .save()
        .map_err(|e| format!("✗ Failed to save config: {e}"))
}

/// Delete the config file after a y/n confirmation read from `input`
fn reset(input: &mut impl BufRead) -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    input.read_line(&mut response).ok();

    if is_confirmation(&response) {
        Config::reset().map_err(|e| format!("✗ Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

fn is_confirmation(response: &str) -> bool {
    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_key_is_readable() {
        let config = Config::from_defaults();
        for key in KEYS {
            assert!(config.get(key).is_some(), "key '{key}' not readable");
        }
    }

    #[test]
    fn test_confirmation_answers() {
        assert!(is_confirmation("y\n"));
        assert!(is_confirmation(" YES "));
        assert!(!is_confirmation("n"));
        assert!(!is_confirmation(""));
    }

    #[test]
    fn test_unknown_key_lists_valid_keys() {
        let message = unknown_key("colour");
        assert!(message.contains("colour"));
        assert!(message.contains("strategy"));
    }
}
