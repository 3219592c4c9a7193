//! Active section lookup for the navigation bar

/// Find the section the reader is currently in.
///
/// Walks `sections` (id and top offset) in document order and keeps the last one whose
/// top minus `margin` is at or above `scroll`. Returns `None` above the first section.
pub fn active_section<'a, I>(sections: I, scroll: f64, margin: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut current = None;
    for (id, top) in sections {
        if scroll >= top - margin {
            current = Some(id);
        }
    }
    current
}
