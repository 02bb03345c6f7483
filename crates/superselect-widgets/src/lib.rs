#![forbid(unsafe_code)]

//! Select widgets for SuperSelect.

pub mod select;

pub use select::{
    FnAccessor, FullItemAccessor, ItemAccessor, JsonAccessor, OptionsInput, SelectEvent,
    SelectGroups, SelectOptions, SelectOutcome, SelectView, SuperSelect,
};

/// Clip `content` to `max_width` terminal columns.
///
/// Returns the clipped text and its width. Graphemes are kept whole: a wide
/// grapheme that would straddle the limit is dropped. Zero-width graphemes
/// are skipped.
pub(crate) fn fit_text(content: &str, max_width: usize) -> (String, usize) {
    use unicode_segmentation::UnicodeSegmentation;
    use unicode_width::UnicodeWidthStr;

    let mut out = String::new();
    let mut width = 0usize;
    for grapheme in content.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if w == 0 {
            continue;
        }
        if width + w > max_width {
            break;
        }
        out.push_str(grapheme);
        width += w;
    }
    (out, width)
}
