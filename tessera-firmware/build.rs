//! Build script for tessera-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates reader.toml and turns it into constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Generated constants, included by `src/config.rs`
const GENERATED_CONFIG: &str = "reader_config.rs";

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated reader settings
struct ReaderSettings {
    baud: u32,
    poll_interval_ms: u64,
    repeat_window_ms: u64,
}

/// Validate reader.toml and emit it as Rust constants
fn generate_config() {
    println!("cargo:rerun-if-changed=reader.toml");

    let config_path = Path::new("reader.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: reader.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a reader.toml configuration file.         ║\n\
            ║  Please create one in the tessera-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read reader.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in reader.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let settings = match validate(&config) {
        Ok(settings) => settings,
        Err(errors) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid reader configuration                             ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                errors
                    .iter()
                    .map(|e| format!("║  • {:<62} ║", e))
                    .collect::<Vec<_>>()
                    .join("\n")
            );
        }
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let generated = format!(
        "/// UART baud rate of the reader module\n\
         pub const UART_BAUD: u32 = {};\n\
         /// Interval between reader polls\n\
         pub const POLL_INTERVAL_MS: u64 = {};\n\
         /// Window within which repeated scans of one tag are dropped\n\
         pub const REPEAT_WINDOW_MS: u64 = {};\n",
        settings.baud, settings.poll_interval_ms, settings.repeat_window_ms
    );
    fs::write(out_dir.join(GENERATED_CONFIG), generated).unwrap();

    println!("cargo:warning=reader.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read an integer field and check its range
fn integer_in_range(
    section: &toml::value::Table,
    section_name: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match section.get(key) {
        Some(toml::Value::Integer(value)) if (min..=max).contains(value) => Some(*value),
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section_name, key, min, max));
            None
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section_name, key));
            None
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section_name, key));
            None
        }
    }
}

/// Validate required sections and their fields
fn validate(config: &toml::Value) -> Result<ReaderSettings, Vec<String>> {
    let mut errors = Vec::new();
    let empty = toml::value::Table::new();

    let uart = match config.get("uart") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[uart] must be a table".to_string());
            &empty
        }
        None => {
            errors.push("Missing [uart] section".to_string());
            &empty
        }
    };

    let reader = match config.get("reader") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[reader] must be a table".to_string());
            &empty
        }
        None => {
            errors.push("Missing [reader] section".to_string());
            &empty
        }
    };

    let baud = integer_in_range(uart, "uart", "baud", 1200, 921_600, &mut errors);
    let poll = integer_in_range(reader, "reader", "poll_interval_ms", 1, 1000, &mut errors);
    let window = integer_in_range(reader, "reader", "repeat_window_ms", 0, 60_000, &mut errors);

    match (baud, poll, window) {
        (Some(baud), Some(poll), Some(window)) if errors.is_empty() => Ok(ReaderSettings {
            baud: baud as u32,
            poll_interval_ms: poll as u64,
            repeat_window_ms: window as u64,
        }),
        _ => Err(errors),
    }
}
