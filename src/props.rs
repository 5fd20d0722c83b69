//! Line-oriented property tables.
//!
//! The format is the familiar `name=value` per line. A name ends at the first `=`, `:`,
//! space or tab; the run of separator characters after it is swallowed, and the rest of the
//! line, right-trimmed, is the value. Lines starting with `#` or `!` are comments; blank
//! lines and lines without any separator are skipped.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::Result;

/// Characters that end a property name and are swallowed before its value.
const SEPARATORS: &[char] = &['=', ':', ' ', '\t'];

/// A string-to-string property table.
///
/// # Examples
///
/// ```rust
/// use syncommon::props::Properties;
///
/// let props = Properties::load_from_str("port = 7400\n# tuning\nttl: 16\n");
/// assert_eq!(props.get("port"), Some("7400"));
/// assert_eq!(props.get_or("iface", "0.0.0.0"), "0.0.0.0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Properties {
    values: HashMap<String, String>,
}

impl Properties {
    /// Creates an empty table.
    pub fn new() -> Properties {
        Properties {
            values: HashMap::new(),
        }
    }

    /// Loads a table from a file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Properties> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let properties = Self::load_from_str(&text);
        debug!(path = %path.display(), count = properties.len(), "properties loaded");
        Ok(properties)
    }

    /// Parses a table out of already loaded text.
    pub fn load_from_str(text: &str) -> Properties {
        let mut properties = Properties::new();
        for line in text.lines() {
            if let Some((name, value)) = parse_line(line) {
                properties.values.insert(name, value);
            }
        }
        properties
    }

    /// Looks up a property.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Looks up a property, falling back to `default` when it is absent.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// Stores a property, returning the previous value if one was set.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    /// Whether a property with this name is set.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterates over the set property names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Copies every property of `other` into this table, overwriting on collision.
    pub fn put_all(&mut self, other: &Properties) {
        for (name, value) in &other.values {
            self.values.insert(name.clone(), value.clone());
        }
    }

    /// Removes every property.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// The number of set properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
        return None;
    }
    let separator = line.find(SEPARATORS)?;
    let name = &line[..separator];
    let value = line[separator..].trim_start_matches(SEPARATORS).trim_end();
    Some((name.to_string(), value.to_string()))
}
