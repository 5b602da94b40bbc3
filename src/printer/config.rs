//! # Printer Configuration
//!
//! Paper geometry and generator settings.
//!
//! ## Paper Profiles
//!
//! | Paper | Printable width (dots) | Font A columns | Font B columns |
//! |-------|------------------------|----------------|----------------|
//! | 58mm | 372 | 32 | 42 |
//! | 80mm | 558 | 48 | 64 |
//!
//! ## Usage
//!
//! ```
//! use escpos_generator::printer::{PaperSize, column_capacity};
//! use escpos_generator::protocol::text::Font;
//!
//! assert_eq!(column_capacity(PaperSize::Mm80, Font::B), 64);
//! assert_eq!(PaperSize::Mm58.width_dots(), 372);
//! ```

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::PosError;
use crate::protocol::text::Font;

/// Supported paper roll widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaperSize {
    /// 58mm roll
    #[default]
    Mm58,
    /// 80mm roll
    Mm80,
}

impl PaperSize {
    /// Printable width in device dots.
    pub const fn width_dots(self) -> u16 {
        match self {
            PaperSize::Mm58 => 372,
            PaperSize::Mm80 => 558,
        }
    }

    /// Parse `58`, `58mm`, `80` or `80mm`.
    pub fn parse(s: &str) -> Result<Self, PosError> {
        match s.trim().to_ascii_lowercase().trim_end_matches("mm") {
            "58" => Ok(PaperSize::Mm58),
            "80" => Ok(PaperSize::Mm80),
            _ => Err(PosError::Config(format!(
                "Unknown paper size '{}'. Use '58mm' or '80mm'",
                s
            ))),
        }
    }
}

impl FromStr for PaperSize {
    type Err = PosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaperSize::parse(s)
    }
}

impl<'de> Deserialize<'de> for PaperSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PaperSize::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Characters per line for a paper size and font.
///
/// Font B is the narrow 9x17 font.
pub const fn column_capacity(paper: PaperSize, font: Font) -> usize {
    match (paper, font) {
        (PaperSize::Mm58, Font::A) => 32,
        (PaperSize::Mm58, Font::B) => 42,
        (PaperSize::Mm80, Font::A) => 48,
        (PaperSize::Mm80, Font::B) => 64,
    }
}

// ============================================================================
// GENERATOR CONFIGURATION
// ============================================================================

/// Default number of reopen attempts after a failed probe.
pub const DEFAULT_REOPEN_ATTEMPTS: u32 = 2;

/// Default pause between reopen attempts.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(5);

fn default_reopen_attempts() -> u32 {
    DEFAULT_REOPEN_ATTEMPTS
}

fn default_backoff() -> Duration {
    DEFAULT_BACKOFF
}

fn deserialize_backoff_ms<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// Settings for a [`crate::Generator`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub paper: PaperSize,

    /// Reopen attempts after a failed liveness probe.
    #[serde(default = "default_reopen_attempts")]
    pub reopen_attempts: u32,

    /// Pause between reopen attempts (`backoff_ms` in JSON).
    #[serde(
        default = "default_backoff",
        rename = "backoff_ms",
        deserialize_with = "deserialize_backoff_ms"
    )]
    pub backoff: Duration,

    /// Report an unreachable device as an error instead of skipping.
    #[serde(default)]
    pub strict: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            paper: PaperSize::default(),
            reopen_attempts: DEFAULT_REOPEN_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
            strict: false,
        }
    }
}

impl GeneratorConfig {
    pub fn with_paper(paper: PaperSize) -> Self {
        Self {
            paper,
            ..Self::default()
        }
    }

    /// Read overrides from the environment.
    ///
    /// | Variable | Meaning |
    /// |----------|---------|
    /// | `POS_PAPER` | `58` / `80` |
    /// | `POS_REOPEN_ATTEMPTS` | reopen attempts |
    /// | `POS_BACKOFF_MS` | pause between attempts |
    /// | `POS_STRICT` | `1` / `true` for strict mode |
    pub fn from_env() -> Result<Self, PosError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PosError> {
        let mut config = Self::default();

        if let Some(paper) = lookup("POS_PAPER") {
            config.paper = PaperSize::parse(&paper)?;
        }
        if let Some(attempts) = lookup("POS_REOPEN_ATTEMPTS") {
            config.reopen_attempts = attempts.trim().parse().map_err(|_| {
                PosError::Config(format!("Invalid POS_REOPEN_ATTEMPTS: {}", attempts))
            })?;
        }
        if let Some(ms) = lookup("POS_BACKOFF_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .map_err(|_| PosError::Config(format!("Invalid POS_BACKOFF_MS: {}", ms)))?;
            config.backoff = Duration::from_millis(ms);
        }
        if let Some(strict) = lookup("POS_STRICT") {
            config.strict = matches!(
                strict.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        Ok(config)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_capacity_table() {
        assert_eq!(column_capacity(PaperSize::Mm58, Font::A), 32);
        assert_eq!(column_capacity(PaperSize::Mm58, Font::B), 42);
        assert_eq!(column_capacity(PaperSize::Mm80, Font::A), 48);
        assert_eq!(column_capacity(PaperSize::Mm80, Font::B), 64);
    }

    #[test]
    fn test_printable_width() {
        assert_eq!(PaperSize::Mm58.width_dots(), 372);
        assert_eq!(PaperSize::Mm80.width_dots(), 558);
    }

    #[test]
    fn test_paper_sizes_are_distinct() {
        assert_ne!(PaperSize::Mm58, PaperSize::Mm80);
    }

    #[test]
    fn test_parse_paper() {
        assert_eq!(PaperSize::parse("58").unwrap(), PaperSize::Mm58);
        assert_eq!(PaperSize::parse("58mm").unwrap(), PaperSize::Mm58);
        assert_eq!(PaperSize::parse(" 80MM ").unwrap(), PaperSize::Mm80);
        assert!(PaperSize::parse("110").is_err());
        assert_eq!("80".parse::<PaperSize>().unwrap(), PaperSize::Mm80);
    }

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.paper, PaperSize::Mm58);
        assert_eq!(config.reopen_attempts, 2);
        assert_eq!(config.backoff, Duration::from_secs(5));
        assert!(!config.strict);
    }

    #[test]
    fn test_config_from_json() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"paper": "80mm", "backoff_ms": 250, "strict": true}"#)
                .unwrap();
        assert_eq!(config.paper, PaperSize::Mm80);
        assert_eq!(config.backoff, Duration::from_millis(250));
        assert_eq!(config.reopen_attempts, 2);
        assert!(config.strict);
    }

    #[test]
    fn test_config_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("POS_PAPER", "80"),
            ("POS_REOPEN_ATTEMPTS", "4"),
            ("POS_BACKOFF_MS", "10"),
            ("POS_STRICT", "true"),
        ]
        .into_iter()
        .collect();

        let config =
            GeneratorConfig::from_lookup(|key| env.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.paper, PaperSize::Mm80);
        assert_eq!(config.reopen_attempts, 4);
        assert_eq!(config.backoff, Duration::from_millis(10));
        assert!(config.strict);
    }

    #[test]
    fn test_config_from_lookup_rejects_garbage() {
        let result = GeneratorConfig::from_lookup(|key| {
            (key == "POS_BACKOFF_MS").then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(PosError::Config(_))));
    }
}
