//! Focus trap decisions for open overlays

pub const FOCUSABLE_QUERY: &str =
    "button, [href], input, select, textarea, [tabindex]:not([tabindex='-1'])";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    /// Let the browser move focus normally
    Stay,
    /// Prevent the default and focus the element at this index
    MoveTo(usize),
}

/// Where a Tab press should send focus inside a container with `count` focusable
/// elements. `active` is the index of the focused element, `None` when focus is
/// outside the container.
#[must_use]
pub const fn trap_tab(count: usize, active: Option<usize>, shift: bool) -> FocusMove {
    if count == 0 {
        return FocusMove::Stay;
    }
    let last = count - 1;
    match active {
        None => FocusMove::MoveTo(0),
        Some(0) if shift => FocusMove::MoveTo(last),
        Some(i) if !shift && i == last => FocusMove::MoveTo(0),
        Some(_) => FocusMove::Stay,
    }
}
