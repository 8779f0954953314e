//! Reading JSON payloads from a file or stdin.

use std::io::{self, Read};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Parse JSON from `path`, or from stdin when `path` is `-`.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let content = if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
    };
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Entry;
    use folio_core::resources::SkillInput;

    #[test]
    fn reads_entries_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skills.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "Rust", "proficiency": 5, "createdAt": "2024-01-01T00:00:00Z"},
                {"name": "Zig", "proficiency": 2}]"#,
        )
        .unwrap();

        let entries: Vec<Entry<SkillInput>> = read_json(path.to_str().unwrap()).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].id.is_some());
        assert!(entries[1].id.is_none());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_json::<serde_json::Value>("/nonexistent/folio.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/folio.json"));
    }
}
