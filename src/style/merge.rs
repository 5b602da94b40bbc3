//! # Style Merging
//!
//! Combines a requested style with a fallback style, field by field.
//!
//! ## Rules
//!
//! For each attribute, with `r` the requested value and `f` the fallback:
//!
//! | Case | Result |
//! |------|--------|
//! | `r != f`, `r` set | `r` |
//! | `r != f`, `r` unset | `f` |
//! | `r == f` | unset under [`MergeMode::PreserveNull`], `f` under [`MergeMode::ForceConcrete`] |
//!
//! Preserve-null yields the delta to send to the device: attributes already
//! in the requested state drop out, so nothing is re-sent. Force-concrete
//! yields the style the session should remember afterwards.
//!
//! ```
//! use escpos_generator::style::{merge, Field, MergeMode, Style};
//!
//! let current = Style::defaults();
//! let request = Style::new().bold(true).underline(false);
//!
//! let delta = merge(&request, &current, MergeMode::PreserveNull);
//! assert_eq!(delta.bold, Field::Set(true));
//! assert_eq!(delta.underline, Field::Unset); // already off
//!
//! let next = merge(&request, &current, MergeMode::ForceConcrete);
//! assert_eq!(next, Style::defaults().bold(true));
//! ```

use super::{Field, Style};

/// How agreeing fields are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Agreeing fields become unset.
    PreserveNull,
    /// Agreeing fields keep the fallback value.
    ForceConcrete,
}

fn merge_field<T: Copy + PartialEq>(requested: Field<T>, fallback: Field<T>, mode: MergeMode) -> Field<T> {
    if requested != fallback {
        return requested.or(fallback);
    }
    match mode {
        MergeMode::PreserveNull => Field::Unset,
        MergeMode::ForceConcrete => fallback,
    }
}

/// Merge `requested` over `fallback`. Pure and total.
pub fn merge(requested: &Style, fallback: &Style, mode: MergeMode) -> Style {
    Style {
        bold: merge_field(requested.bold, fallback.bold, mode),
        double_height: merge_field(requested.double_height, fallback.double_height, mode),
        double_width: merge_field(requested.double_width, fallback.double_width, mode),
        height: merge_field(requested.height, fallback.height, mode),
        width: merge_field(requested.width, fallback.width, mode),
        underline: merge_field(requested.underline, fallback.underline, mode),
        align: merge_field(requested.align, fallback.align, mode),
        font: merge_field(requested.font, fallback.font, mode),
        italic: merge_field(requested.italic, fallback.italic, mode),
        upside_down: merge_field(requested.upside_down, fallback.upside_down, mode),
        rotation: merge_field(requested.rotation, fallback.rotation, mode),
        inverted: merge_field(requested.inverted, fallback.inverted, mode),
    }
}

impl Style {
    /// Method form of [`merge`] with `self` as the requested style.
    #[inline]
    pub fn merge(&self, fallback: &Style, mode: MergeMode) -> Style {
        merge(self, fallback, mode)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::text::{Alignment, Font, Rotation};
    use crate::style::TextSize;
    use pretty_assertions::assert_eq;

    fn samples() -> Vec<Style> {
        vec![
            Style::new(),
            Style::defaults(),
            Style::new().bold(true),
            Style::new().underline(false).align(Alignment::Right),
            Style::defaults()
                .font(Font::B)
                .inverted(true)
                .rotation(Rotation::R90),
            Style::defaults().size(TextSize::new(2).unwrap(), TextSize::new(5).unwrap()),
            Style::new().italic(true).upside_down(true).double_width(true),
        ]
    }

    #[test]
    fn test_merge_with_self_preserve_null_is_empty() {
        for s in samples() {
            assert!(merge(&s, &s, MergeMode::PreserveNull).is_empty(), "{s:?}");
        }
    }

    #[test]
    fn test_merge_concrete_over_defaults_is_identity() {
        for s in samples().into_iter().filter(Style::is_concrete) {
            assert_eq!(merge(&s, &Style::defaults(), MergeMode::ForceConcrete), s);
        }
    }

    #[test]
    fn test_requested_equal_to_current_is_not_resent() {
        let current = Style::defaults().bold(true);
        let request = Style::new().bold(true).underline(true);
        let delta = merge(&request, &current, MergeMode::PreserveNull);
        assert_eq!(delta.bold, Field::Unset);
        assert_eq!(delta.underline, Field::Set(true));
        // Unrequested fields carry the current value.
        assert_eq!(delta.font, Field::Set(Font::A));
    }

    #[test]
    fn test_unset_request_falls_back() {
        let current = Style::defaults();
        let delta = merge(&Style::new(), &current, MergeMode::PreserveNull);
        // Every requested field is unset and every fallback set, so they
        // differ and the fallback wins.
        assert_eq!(delta, current);
    }

    #[test]
    fn test_set_request_over_unset_fallback() {
        let request = Style::new().align(Alignment::Center);
        let delta = merge(&request, &Style::new(), MergeMode::PreserveNull);
        assert_eq!(delta, request);
    }

    #[test]
    fn test_force_concrete_over_defaults_stays_concrete() {
        for s in samples() {
            let merged = merge(&s, &Style::defaults(), MergeMode::ForceConcrete);
            assert!(merged.is_concrete(), "{s:?}");
        }
    }

    #[test]
    fn test_restore_delta_reverts_changed_fields() {
        let current = Style::defaults();
        let request = Style::new().bold(true).font(Font::B);
        let restore = merge(&current, &request, MergeMode::PreserveNull);
        assert_eq!(restore.bold, Field::Set(false));
        assert_eq!(restore.font, Field::Set(Font::A));
        assert_eq!(restore.align, Field::Set(Alignment::Left));
    }

    #[test]
    fn test_method_form_matches_function() {
        let a = Style::new().bold(true);
        let b = Style::defaults();
        assert_eq!(a.merge(&b, MergeMode::ForceConcrete), merge(&a, &b, MergeMode::ForceConcrete));
    }
}
