#![forbid(unsafe_code)]

//! Declarative view of a select widget, plus a plain-text renderer.
//!
//! [`SelectView`] mirrors the markup a select renders: a label with the
//! current title and a caret, a panel shown only while open (filter input
//! when filterable, then the filtered options), and a validity icon outside
//! the panel when the widget is required. Hosts can draw it themselves or
//! use [`SelectView::render_lines`].

use crate::fit_text;

/// Placeholder shown in an empty filter input.
pub const FILTER_PLACEHOLDER: &str = "Filter Choices...";

/// Caret next to the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caret {
    /// Panel open.
    Up,
    /// Panel closed.
    Down,
}

impl Caret {
    /// Caret for the given open state.
    #[must_use]
    pub const fn for_open(open: bool) -> Self {
        if open { Self::Up } else { Self::Down }
    }

    /// Glyph used by the text renderer.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Up => '▴',
            Self::Down => '▾',
        }
    }
}

/// Validity indicator for required widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityIcon {
    /// Current selection passes validation.
    Valid,
    /// Current selection fails validation.
    Invalid,
}

impl ValidityIcon {
    /// Icon for the given validity.
    #[must_use]
    pub const fn for_valid(valid: bool) -> Self {
        if valid { Self::Valid } else { Self::Invalid }
    }

    /// Glyph used by the text renderer.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Valid => '✓',
            Self::Invalid => '!',
        }
    }
}

/// The filter text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterInputView {
    /// Current text.
    pub text: String,
    /// Shown while `text` is empty.
    pub placeholder: &'static str,
}

impl FilterInputView {
    /// Input holding `text`.
    #[must_use]
    pub fn new(text: String) -> Self {
        Self {
            text,
            placeholder: FILTER_PLACEHOLDER,
        }
    }
}

/// One row of the option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    /// Display text.
    pub title: String,
    /// Whether this row is the current full item.
    pub selected: bool,
}

/// The panel shown while the select is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    /// Present only for filterable selects.
    pub filter_input: Option<FilterInputView>,
    /// Filtered options in source order.
    pub options: Vec<OptionView>,
}

/// Everything a host needs to draw one select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView {
    /// Title of the current selection.
    pub label: String,
    /// Open/closed caret.
    pub caret: Caret,
    /// Present only while open.
    pub panel: Option<PanelView>,
    /// Present only for required selects.
    pub validity: Option<ValidityIcon>,
}

impl SelectView {
    /// Render to lines no wider than `width` columns.
    ///
    /// The first line is the label row: title, padding, caret, then the
    /// validity glyph if any. Panel rows follow: `> ` plus the filter text
    /// (or placeholder), then one row per option with a check mark on the
    /// selected one.
    #[must_use]
    pub fn render_lines(&self, width: usize) -> Vec<String> {
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "SuperSelect",
            width,
            open = self.panel.is_some()
        )
        .entered();

        let mut lines = Vec::new();
        lines.push(self.label_row(width));

        if let Some(panel) = &self.panel {
            if let Some(input) = &panel.filter_input {
                let shown = if input.text.is_empty() {
                    input.placeholder
                } else {
                    input.text.as_str()
                };
                lines.push(fit_text(&format!("> {shown}"), width).0);
            }
            for option in &panel.options {
                let mark = if option.selected { '✓' } else { ' ' };
                lines.push(fit_text(&format!("{mark} {}", option.title), width).0);
            }
        }
        lines
    }

    fn label_row(&self, width: usize) -> String {
        let mut suffix = format!(" {}", self.caret.glyph());
        if let Some(icon) = self.validity {
            suffix.push(' ');
            suffix.push(icon.glyph());
        }
        let (suffix, suffix_width) = fit_text(&suffix, width);
        let room = width - suffix_width;
        let (label, label_width) = fit_text(&self.label, room);

        let mut row = label;
        row.extend(std::iter::repeat_n(' ', room - label_width));
        row.push_str(&suffix);
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed(label: &str) -> SelectView {
        SelectView {
            label: label.into(),
            caret: Caret::Down,
            panel: None,
            validity: None,
        }
    }

    #[test]
    fn closed_label_row() {
        assert_eq!(closed("Apple").render_lines(10), vec!["Apple    ▾"]);
    }

    #[test]
    fn long_label_is_clipped() {
        assert_eq!(closed("Watermelon").render_lines(6), vec!["Wate ▾"]);
    }

    #[test]
    fn validity_glyph_follows_caret() {
        let mut view = closed("");
        view.validity = Some(ValidityIcon::Invalid);
        assert_eq!(view.render_lines(6), vec!["   ▾ !"]);
    }

    #[test]
    fn open_panel_rows() {
        let view = SelectView {
            label: "Apple".into(),
            caret: Caret::Up,
            panel: Some(PanelView {
                filter_input: Some(FilterInputView::new(String::new())),
                options: vec![
                    OptionView {
                        title: "Apple".into(),
                        selected: true,
                    },
                    OptionView {
                        title: "Banana".into(),
                        selected: false,
                    },
                ],
            }),
            validity: Some(ValidityIcon::Valid),
        };
        assert_eq!(
            view.render_lines(12),
            vec![
                "Apple    ▴ ✓",
                "> Filter Cho",
                "✓ Apple",
                "  Banana",
            ]
        );
    }

    #[test]
    fn wide_graphemes_never_split() {
        assert_eq!(closed("日本語").render_lines(5), vec!["日  ▾"]);
    }

    #[test]
    fn zero_width_renders_empty_row() {
        assert_eq!(closed("Apple").render_lines(0), vec![""]);
    }

    #[test]
    fn caret_and_icon_mapping() {
        assert_eq!(Caret::for_open(true), Caret::Up);
        assert_eq!(Caret::for_open(false), Caret::Down);
        assert_eq!(ValidityIcon::for_valid(true), ValidityIcon::Valid);
        assert_eq!(ValidityIcon::for_valid(false), ValidityIcon::Invalid);
    }
}
