//! Conversion from JSON schema types to validated instructions.

use std::path::PathBuf;

use crate::codes::{Barcode, Code128Set, DEFAULT_QR_SIZE, QrCode, QrCorrection};
use crate::error::ValidationError;
use crate::protocol::text::{Alignment, Font, Rotation};
use crate::style::{Field, Style, TextSize};

use super::schema::*;

/// A job instruction with every parameter validated.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Text {
        content: String,
        lines_after: u8,
        style: Option<Style>,
        persist: bool,
    },
    Rule {
        half: bool,
    },
    Qr(QrCode),
    Barcode(Barcode),
    Image {
        path: PathBuf,
        align: Alignment,
    },
    Feed(u8),
    Cut,
    SetStyle(Style),
    TestPage,
}

impl PrintJob {
    /// Validate every instruction, failing on the first bad one.
    pub fn validate(&self) -> Result<Vec<Instruction>, ValidationError> {
        self.instructions.iter().map(JsonInstruction::validate).collect()
    }
}

impl JsonInstruction {
    fn validate(&self) -> Result<Instruction, ValidationError> {
        Ok(match self {
            JsonInstruction::Text(t) => Instruction::Text {
                content: t.content.clone(),
                lines_after: t.lines_after,
                style: t.style.as_ref().map(JsonStyle::to_style).transpose()?,
                persist: t.persist,
            },
            JsonInstruction::Rule(r) => Instruction::Rule { half: r.half },
            JsonInstruction::Qr(q) => Instruction::Qr(q.to_code()?),
            JsonInstruction::Barcode(b) => Instruction::Barcode(b.to_code()?),
            JsonInstruction::Image(i) => Instruction::Image {
                path: i.path.clone(),
                align: match i.align.as_deref() {
                    Some(align) => parse_alignment(align)?,
                    None => Alignment::Center,
                },
            },
            JsonInstruction::Feed(f) => Instruction::Feed(f.lines),
            JsonInstruction::Cut => Instruction::Cut,
            JsonInstruction::Style(s) => Instruction::SetStyle(s.to_style()?),
            JsonInstruction::TestPage => Instruction::TestPage,
        })
    }
}

impl JsonStyle {
    pub fn to_style(&self) -> Result<Style, ValidationError> {
        let mut style = Style {
            bold: self.bold.into(),
            underline: self.underline.into(),
            double_width: self.double_width.into(),
            double_height: self.double_height.into(),
            italic: self.italic.into(),
            upside_down: self.upside_down.into(),
            inverted: self.inverted.into(),
            ..Style::new()
        };
        if let Some([width, height]) = self.size {
            style = style.size(TextSize::new(width)?, TextSize::new(height)?);
        }
        if let Some(ref align) = self.align {
            style.align = Field::Set(parse_alignment(align)?);
        }
        if let Some(ref font) = self.font {
            style.font = Field::Set(Font::parse(font).ok_or_else(|| unknown("font", font))?);
        }
        if let Some(degrees) = self.rotation {
            style.rotation = Field::Set(match degrees {
                0 => Rotation::R0,
                90 => Rotation::R90,
                other => return Err(unknown("rotation", &other.to_string())),
            });
        }
        Ok(style)
    }
}

impl JsonQr {
    fn to_code(&self) -> Result<QrCode, ValidationError> {
        let correction = match self.correction.as_deref() {
            Some(level) => {
                QrCorrection::parse(level).ok_or_else(|| unknown("QR correction", level))?
            }
            None => QrCorrection::default(),
        };
        QrCode::new(&self.data, self.size.unwrap_or(DEFAULT_QR_SIZE), correction)
    }
}

impl JsonBarcode {
    fn to_code(&self) -> Result<Barcode, ValidationError> {
        let mut code = match self.format.to_ascii_lowercase().as_str() {
            "code39" => Barcode::code39(&self.data)?,
            "code128" => {
                let set = match self.code_set.as_deref().map(str::to_ascii_uppercase) {
                    None => Code128Set::default(),
                    Some(s) if s == "A" => Code128Set::A,
                    Some(s) if s == "B" => Code128Set::B,
                    Some(s) if s == "C" => Code128Set::C,
                    Some(other) => return Err(unknown("CODE128 code set", &other)),
                };
                Barcode::code128_with_set(&self.data, set)?
            }
            other => return Err(unknown("barcode format", other)),
        };
        if let Some(height) = self.height {
            code = code.with_height(height)?;
        }
        if let Some(width) = self.width {
            code = code.with_width(width)?;
        }
        Ok(code)
    }
}

fn parse_alignment(align: &str) -> Result<Alignment, ValidationError> {
    Alignment::parse(align).ok_or_else(|| unknown("alignment", align))
}

fn unknown(what: &'static str, value: &str) -> ValidationError {
    ValidationError::UnknownValue {
        what,
        value: value.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
