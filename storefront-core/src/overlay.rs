//! Overlay open/close state and the shared scroll lock
//!
//! Page scrolling is suspended while any overlay is open. [`ModalStack`] counts
//! open overlays so closing one of two open overlays keeps the page locked.

/// Reference count of open overlays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalStack {
    depth: usize,
}

impl ModalStack {
    #[must_use]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    pub const fn push(&mut self) {
        self.depth += 1;
    }

    /// Pop one overlay. Popping an empty stack is a no-op.
    pub const fn pop(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub const fn scroll_locked(&self) -> bool {
        self.depth > 0
    }
}

/// Two-state overlay (menu panel, lightbox).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    id: &'static str,
    active: bool,
}

impl Overlay {
    #[must_use]
    pub const fn new(id: &'static str) -> Self {
        Self { id, active: false }
    }

    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.active
    }

    /// CLOSED -> OPEN. Returns `false` when already open.
    pub fn open(&mut self, stack: &mut ModalStack) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        stack.push();
        log::debug!("overlay {} opened (depth {})", self.id, stack.depth());
        true
    }

    /// OPEN -> CLOSED. Returns `false` when already closed.
    pub fn close(&mut self, stack: &mut ModalStack) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        stack.pop();
        log::debug!("overlay {} closed (depth {})", self.id, stack.depth());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_close_toggles_scroll_lock() {
        let mut stack = ModalStack::new();
        let mut menu = Overlay::new("menu");
        assert!(menu.open(&mut stack));
        assert!(stack.scroll_locked());
        assert!(menu.close(&mut stack));
        assert!(!stack.scroll_locked());
    }

    #[test]
    fn repeated_transitions_do_not_double_count() {
        let mut stack = ModalStack::new();
        let mut menu = Overlay::new("menu");
        menu.open(&mut stack);
        assert!(!menu.open(&mut stack));
        assert_eq!(stack.depth(), 1);
        menu.close(&mut stack);
        assert!(!menu.close(&mut stack));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn scroll_stays_locked_until_last_overlay_closes() {
        let mut stack = ModalStack::new();
        let mut menu = Overlay::new("menu");
        let mut lightbox = Overlay::new("lightbox");
        menu.open(&mut stack);
        lightbox.open(&mut stack);
        menu.close(&mut stack);
        assert!(stack.scroll_locked());
        lightbox.close(&mut stack);
        assert!(!stack.scroll_locked());
    }

    #[test]
    fn pop_on_empty_stack_saturates() {
        let mut stack = ModalStack::new();
        stack.pop();
        assert_eq!(stack.depth(), 0);
    }
}
