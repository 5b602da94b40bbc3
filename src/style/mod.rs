//! # Style Model
//!
//! The formatting attributes a printer can be put into, each of which may be
//! left unspecified.
//!
//! ## Three-Valued Fields
//!
//! Every attribute is a [`Field`]: either [`Field::Unset`] ("do not change
//! this aspect") or [`Field::Set`] with a concrete value. A `Field<bool>` is
//! therefore unset / false / true, which keeps "not provided" apart from
//! "provided but off".
//!
//! ```
//! use escpos_generator::style::{Field, Style};
//! use escpos_generator::protocol::text::Alignment;
//!
//! let heading = Style::new().bold(true).align(Alignment::Center);
//! assert_eq!(heading.bold, Field::Set(true));
//! assert_eq!(heading.underline, Field::Unset);
//!
//! // The baseline has nothing left unset.
//! assert!(Style::defaults().is_concrete());
//! ```
//!
//! Styles are combined with [`merge`], see that module for the rules.

pub mod merge;

pub use merge::{MergeMode, merge};

use crate::error::ValidationError;
use crate::protocol::text::{Alignment, Font, Rotation};

/// A style attribute that is either unset or carries a concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field<T> {
    Unset,
    Set(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unset
    }
}

impl<T: Copy> Field<T> {
    #[inline]
    pub fn is_set(&self) -> bool {
        matches!(self, Field::Set(_))
    }

    #[inline]
    pub fn get(&self) -> Option<T> {
        match self {
            Field::Set(v) => Some(*v),
            Field::Unset => None,
        }
    }

    /// This field if set, otherwise `other`.
    #[inline]
    pub fn or(self, other: Field<T>) -> Field<T> {
        match self {
            Field::Set(_) => self,
            Field::Unset => other,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Set(v),
            None => Field::Unset,
        }
    }
}

/// Character size multiplier, 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextSize(u8);

impl TextSize {
    pub const NORMAL: TextSize = TextSize(1);

    /// Validate a multiplier.
    ///
    /// ```
    /// use escpos_generator::style::TextSize;
    ///
    /// assert_eq!(TextSize::new(3).unwrap().get(), 3);
    /// assert!(TextSize::new(0).is_err());
    /// assert!(TextSize::new(9).is_err());
    /// ```
    pub fn new(n: u8) -> Result<Self, ValidationError> {
        if (1..=8).contains(&n) {
            Ok(TextSize(n))
        } else {
            Err(ValidationError::TextSize(n))
        }
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for TextSize {
    type Error = ValidationError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        TextSize::new(n)
    }
}

/// Printer formatting state, every attribute optional.
///
/// A `Style` is a small `Copy` value; builder methods return a new style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub bold: Field<bool>,
    pub double_height: Field<bool>,
    pub double_width: Field<bool>,
    pub height: Field<TextSize>,
    pub width: Field<TextSize>,
    pub underline: Field<bool>,
    pub align: Field<Alignment>,
    pub font: Field<Font>,
    pub italic: Field<bool>,
    pub upside_down: Field<bool>,
    pub rotation: Field<Rotation>,
    pub inverted: Field<bool>,
}

impl Style {
    /// A style with every field unset.
    pub const fn new() -> Self {
        Self {
            bold: Field::Unset,
            double_height: Field::Unset,
            double_width: Field::Unset,
            height: Field::Unset,
            width: Field::Unset,
            underline: Field::Unset,
            align: Field::Unset,
            font: Field::Unset,
            italic: Field::Unset,
            upside_down: Field::Unset,
            rotation: Field::Unset,
            inverted: Field::Unset,
        }
    }

    /// The power-on baseline. Every field is set.
    pub const fn defaults() -> Self {
        Self {
            bold: Field::Set(false),
            double_height: Field::Set(false),
            double_width: Field::Set(false),
            height: Field::Set(TextSize::NORMAL),
            width: Field::Set(TextSize::NORMAL),
            underline: Field::Set(false),
            align: Field::Set(Alignment::Left),
            font: Field::Set(Font::A),
            italic: Field::Set(false),
            upside_down: Field::Set(false),
            rotation: Field::Set(Rotation::R0),
            inverted: Field::Set(false),
        }
    }

    pub fn bold(mut self, enabled: bool) -> Self {
        self.bold = Field::Set(enabled);
        self
    }

    pub fn double_height(mut self, enabled: bool) -> Self {
        self.double_height = Field::Set(enabled);
        self
    }

    pub fn double_width(mut self, enabled: bool) -> Self {
        self.double_width = Field::Set(enabled);
        self
    }

    /// Explicit width and height multipliers.
    pub fn size(mut self, width: TextSize, height: TextSize) -> Self {
        self.width = Field::Set(width);
        self.height = Field::Set(height);
        self
    }

    pub fn underline(mut self, enabled: bool) -> Self {
        self.underline = Field::Set(enabled);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.align = Field::Set(alignment);
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = Field::Set(font);
        self
    }

    pub fn italic(mut self, enabled: bool) -> Self {
        self.italic = Field::Set(enabled);
        self
    }

    pub fn upside_down(mut self, enabled: bool) -> Self {
        self.upside_down = Field::Set(enabled);
        self
    }

    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = Field::Set(rotation);
        self
    }

    pub fn inverted(mut self, enabled: bool) -> Self {
        self.inverted = Field::Set(enabled);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Style::new()
    }

    /// True when every field is set.
    pub fn is_concrete(&self) -> bool {
        self.bold.is_set()
            && self.double_height.is_set()
            && self.double_width.is_set()
            && self.height.is_set()
            && self.width.is_set()
            && self.underline.is_set()
            && self.align.is_set()
            && self.font.is_set()
            && self.italic.is_set()
            && self.upside_down.is_set()
            && self.rotation.is_set()
            && self.inverted.is_set()
    }

    /// Whether any member of the character-size group is set.
    pub fn touches_size(&self) -> bool {
        self.width.is_set()
            || self.height.is_set()
            || self.double_width.is_set()
            || self.double_height.is_set()
    }

    /// Complete the character-size group from `target`.
    ///
    /// Width, height and the double flags share one device command, so a
    /// delta that sets any of them must carry all four. Styles that leave the
    /// whole group unset are returned unchanged.
    pub fn with_size_group_from(mut self, target: &Style) -> Style {
        if self.touches_size() {
            self.width = self.width.or(target.width);
            self.height = self.height.or(target.height);
            self.double_width = self.double_width.or(target.double_width);
            self.double_height = self.double_height.or(target.double_height);
        }
        self
    }

    /// Effective `(width, height)` multipliers, with the double flags raising
    /// a multiplier to at least 2. Unset members count as 1× / off.
    pub fn effective_size(&self) -> (u8, u8) {
        let mut width = self.width.get().map_or(1, TextSize::get);
        let mut height = self.height.get().map_or(1, TextSize::get);
        if self.double_width.get() == Some(true) {
            width = width.max(2);
        }
        if self.double_height.get() == Some(true) {
            height = height.max(2);
        }
        (width, height)
    }
}

// ============================================================================
// TESTS
// ============================================================================
