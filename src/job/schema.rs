//! JSON schema types for print jobs.

use std::path::PathBuf;

use serde::Deserialize;

fn default_true() -> bool {
    true
}

fn default_one() -> u8 {
    1
}

/// Top-level JSON print job.
#[derive(Debug, Clone, Deserialize)]
pub struct PrintJob {
    /// Instructions, run in order.
    pub instructions: Vec<JsonInstruction>,
    /// Whether to cut paper after the last instruction (default: true).
    #[serde(default = "default_true")]
    pub cut: bool,
}

/// A single instruction in the job.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonInstruction {
    Text(JsonText),
    Rule(JsonRule),
    Qr(JsonQr),
    Barcode(JsonBarcode),
    Image(JsonImage),
    Feed(JsonFeed),
    Cut,
    /// Persistent style change, fields inline.
    Style(JsonStyle),
    TestPage,
}

/// Style override. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonStyle {
    #[serde(default)]
    pub bold: Option<bool>,
    #[serde(default)]
    pub underline: Option<bool>,
    #[serde(default)]
    pub double_width: Option<bool>,
    #[serde(default)]
    pub double_height: Option<bool>,
    /// Size multiplier: a single number for both axes, or `[width, height]`.
    #[serde(default, deserialize_with = "deserialize_size")]
    pub size: Option<[u8; 2]>,
    /// "left", "center", "right".
    #[serde(default)]
    pub align: Option<String>,
    /// "A" or "B".
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub italic: Option<bool>,
    #[serde(default)]
    pub upside_down: Option<bool>,
    /// Degrees, 0 or 90.
    #[serde(default)]
    pub rotation: Option<u16>,
    #[serde(default)]
    pub inverted: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonText {
    pub content: String,
    /// Blank lines fed after the text (default: 1).
    #[serde(default = "default_one")]
    pub lines_after: u8,
    #[serde(default)]
    pub style: Option<JsonStyle>,
    /// Keep the style for later instructions.
    #[serde(default)]
    pub persist: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonRule {
    #[serde(default)]
    pub half: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonQr {
    pub data: String,
    /// Module size 1-16 (default: 4).
    #[serde(default)]
    pub size: Option<u8>,
    /// "L", "M", "Q" or "H" (default: "L").
    #[serde(default)]
    pub correction: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonBarcode {
    /// "code39" or "code128".
    pub format: String,
    pub data: String,
    #[serde(default)]
    pub height: Option<u16>,
    #[serde(default)]
    pub width: Option<u8>,
    /// CODE128 code set: "A", "B" or "C" (default: "B").
    #[serde(default)]
    pub code_set: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonImage {
    pub path: PathBuf,
    /// Justification (default: "center").
    #[serde(default)]
    pub align: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonFeed {
    #[serde(default = "default_one")]
    pub lines: u8,
}

fn deserialize_size<'de, D>(deserializer: D) -> Result<Option<[u8; 2]>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SizeValue {
        Uniform(u8),
        Pair([u8; 2]),
    }

    let opt: Option<SizeValue> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(SizeValue::Uniform(n)) => Ok(Some([n, n])),
        Some(SizeValue::Pair(pair)) => Ok(Some(pair)),
    }
}
