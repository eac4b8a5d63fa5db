//! Text normalization for values read off the rendered page.

/// Concatenates text nodes, collapses runs of whitespace into single spaces and
/// trims the ends.
///
/// Returns `None` when nothing but whitespace remains, so an element that
/// renders empty is treated the same as a missing element.
pub fn visible_text<'a>(fragments: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let joined: String = fragments.into_iter().collect();
    let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}
