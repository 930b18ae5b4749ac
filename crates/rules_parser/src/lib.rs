//! Parser for Field Rules Engine rulesets (YAML/TOML formats).
//!
//! This module provides functionality to parse rulesets from YAML and TOML
//! files into the strongly-typed `Ruleset` structure. Each field may declare
//! its constraints either as a structured list or as a compact tag string
//! (see [`parse_tags`]).
//!
//! # Example
//!
//! ```rust
//! use rules_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: borrow_book
//! fields:
//!   - name: Borb_Day
//!     tags: "required~Borrow day must be today, present~Borrow day must be today"
//!   - name: Book_Frequency
//!     constraints:
//!       - kind: required
//!         message: Book frequency must be between 1 and 1000
//!       - kind: range
//!         min: 1
//!         max: 1000
//!         message: Book frequency must be between 1 and 1000
//! "#;
//!
//! let ruleset = parse_yaml(yaml).expect("Failed to parse ruleset");
//! assert_eq!(ruleset.name, "borrow_book");
//! assert_eq!(ruleset.constraint_count(), 4);
//! ```

mod tags;

pub use tags::{parse_field_tags, parse_tags};

use rules_core::{FieldRule, RuleConstraint, Ruleset};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during ruleset parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// Malformed tag entry
    #[error("Invalid tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },

    /// Field declares both structured constraints and tags
    #[error("Field '{0}' declares both 'constraints' and 'tags'")]
    ConflictingConstraints(String),
}

impl ParserError {
    /// Creates a new invalid tag error.
    pub fn invalid_tag(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported ruleset file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesetFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// On-disk shape of a ruleset, before tag strings are expanded.
#[derive(Debug, Deserialize)]
struct RawRuleset {
    name: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    fields: Vec<RawFieldRule>,
}

#[derive(Debug, Deserialize)]
struct RawFieldRule {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    constraints: Option<Vec<RuleConstraint>>,
    #[serde(default)]
    tags: Option<String>,
}

impl RawRuleset {
    fn into_ruleset(self) -> Result<Ruleset> {
        let fields = self
            .fields
            .into_iter()
            .map(RawFieldRule::into_field_rule)
            .collect::<Result<Vec<_>>>()?;

        Ok(Ruleset {
            name: self.name,
            version: self.version.unwrap_or_else(|| "1.0.0".to_string()),
            description: self.description,
            fields,
        })
    }
}

impl RawFieldRule {
    fn into_field_rule(self) -> Result<FieldRule> {
        let constraints = match (self.constraints, self.tags) {
            (Some(_), Some(_)) => return Err(ParserError::ConflictingConstraints(self.name)),
            (Some(constraints), None) => constraints,
            (None, Some(tags)) => parse_tags(&tags)?,
            (None, None) => Vec::new(),
        };

        Ok(FieldRule {
            name: self.name,
            description: self.description,
            constraints,
        })
    }
}

/// Parse a ruleset from a YAML string.
///
/// # Example
///
/// ```rust
/// use rules_parser::parse_yaml;
///
/// let yaml = r#"
/// name: member
/// version: "2.0.0"
/// fields: []
/// "#;
///
/// let ruleset = parse_yaml(yaml).unwrap();
/// assert_eq!(ruleset.version, "2.0.0");
/// ```
pub fn parse_yaml(content: &str) -> Result<Ruleset> {
    let raw: RawRuleset = serde_yaml_ng::from_str(content)?;
    raw.into_ruleset()
}

/// Parse a ruleset from a TOML string.
///
/// # Example
///
/// ```rust
/// use rules_parser::parse_toml;
///
/// let toml = r#"
/// name = "borrow_book"
///
/// [[fields]]
/// name = "Book_Frequency"
/// tags = "required~need 1-1000, range(1|1000)~need 1-1000"
/// "#;
///
/// let ruleset = parse_toml(toml).unwrap();
/// assert_eq!(ruleset.fields[0].constraints.len(), 2);
/// ```
pub fn parse_toml(content: &str) -> Result<Ruleset> {
    let raw: RawRuleset =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    raw.into_ruleset()
}

/// Detect the ruleset format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `RulesetFormat::Yaml`
/// * `.toml` → `RulesetFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<RulesetFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(RulesetFormat::Yaml),
        "toml" => Ok(RulesetFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a ruleset from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use rules_parser::parse_file;
/// use std::path::Path;
///
/// let ruleset = parse_file(Path::new("rulesets/borrow_book.yml")).unwrap();
/// println!("Loaded ruleset: {}", ruleset.name);
/// ```
pub fn parse_file(path: &Path) -> Result<Ruleset> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        RulesetFormat::Yaml => parse_yaml(&content),
        RulesetFormat::Toml => parse_toml(&content),
    }
}
