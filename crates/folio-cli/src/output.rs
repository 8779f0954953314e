//! Output formatting helpers.
//!
//! Data goes to stdout; progress, hints and errors go to stderr.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// A green check and `msg` on stderr.
pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

/// A red cross and `msg` on stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// A dimmed line on stderr, for progress and hints.
pub fn hint(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a labeled field, or nothing when the value is absent.
pub fn optional_field(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        field(label, value);
    }
}

/// Print a value as compact JSON on stdout.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as indented JSON on stdout.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// One record per line, or one pretty block per record.
pub fn records<T: Serialize>(items: &[T], pretty: bool) -> Result<()> {
    if items.is_empty() {
        hint("No records found.");
        return Ok(());
    }
    for item in items {
        if pretty {
            json_pretty(item)?;
        } else {
            json(item)?;
        }
    }
    Ok(())
}
