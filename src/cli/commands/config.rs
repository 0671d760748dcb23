//! Config command handler

use super::fail;
use crate::args::ConfigSubcommand;
use campus_graph::config::Config;
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => show_all(config),
        Some(ConfigSubcommand::Get { key: Some(key) }) => show_key(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => {
            let edit = config.set(&key, &value);
            update(config, edit, &format!("Set {key} = {value}"));
        }
        Some(ConfigSubcommand::Unset { key }) => {
            let edit = config.unset(&key, defaults);
            update(config, edit, &format!("Reset {key} to default"));
        }
        Some(ConfigSubcommand::Reset) => reset(),
    }
}

fn show_all(config: &Config) {
    println!("\n=== Configuration ===");
    println!("File: {}\n", Config::get_config_file_path().display());
    print!("{config}");
}

fn show_key(config: &Config, key: &str) {
    match config.get(key) {
        Some(value) => println!("{value}"),
        None => fail(&format!("✗ Unknown config key: '{key}'")),
    }
}

/// Persist a successful edit, or exit with the edit's error
fn update(config: &Config, edit: Result<(), String>, done: &str) {
    if let Err(e) = edit {
        fail(&format!("✗ {e}"));
    }
    if let Err(e) = config.save() {
        fail(&format!("✗ Failed to save config: {e}"));
    }
    println!("✓ {done}");
}

fn reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        if let Err(e) = Config::reset() {
            fail(&format!("✗ Failed to remove config file: {e}"));
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}
