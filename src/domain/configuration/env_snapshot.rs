//! Read-only view of a previously written `.env` file.

use std::collections::BTreeMap;

/// Variable name to raw value, parsed from an existing `.env` document.
///
/// Only used to seed prompt defaults; discarded once collection finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    values: BTreeMap<String, String>,
}

impl EnvSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse `.env` content.
    ///
    /// Blank lines and `#` comments are skipped. Lines that are not `KEY=VALUE` with an
    /// identifier-shaped key are ignored. One layer of matching quotes is stripped.
    pub fn parse(content: &str) -> Self {
        let values = content.lines().filter_map(parse_line).collect();
        Self { values }
    }

    /// Raw value for `key`. Present-but-empty keys return `Some("")`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value for `key` only when it is non-empty.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Fill keys missing here from `other`; existing keys win.
    pub fn merge_missing(&mut self, other: EnvSnapshot) {
        for (key, value) in other.values {
            self.values.entry(key).or_insert(value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if !is_valid_key(key) {
        return None;
    }

    Some((key.to_string(), unquote(value.trim()).to_string()))
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
