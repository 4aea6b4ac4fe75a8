//! Navigation helpers: in-page anchors and the mobile menu's outside-click rule

/// Element id an in-page link points at. Bare `#` has no target.
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Whether a click should close the open menu: it landed outside both the toggle
/// and the nav panel while the menu was active.
#[must_use]
pub const fn click_outside(in_toggle: bool, in_nav: bool, menu_active: bool) -> bool {
    menu_active && !in_toggle && !in_nav
}
