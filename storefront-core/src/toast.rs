//! Transient toast staging
use crate::config::Timings;

pub const TOAST_CLASS: &str = "toast";
pub const TOAST_VISIBLE_CLASS: &str = "toast--visible";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Attached, off-screen
    Hidden,
    /// Slid in
    Visible,
    /// Sliding out
    Leaving,
    /// Detached from the page
    Removed,
}

impl ToastPhase {
    /// Classes the toast element carries in this phase.
    #[must_use]
    pub const fn classes(self) -> &'static [&'static str] {
        match self {
            Self::Visible => &[TOAST_CLASS, TOAST_VISIBLE_CLASS],
            Self::Hidden | Self::Leaving | Self::Removed => &[TOAST_CLASS],
        }
    }
}

/// Text plus the delay before each phase change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastPlan {
    pub text: String,
    pub enter_ms: u32,
    pub hold_ms: u32,
    pub exit_ms: u32,
}

impl ToastPlan {
    pub fn new(text: impl Into<String>, timings: &Timings) -> Self {
        Self {
            text: text.into(),
            enter_ms: timings.toast_enter_ms,
            hold_ms: timings.toast_hold_ms,
            exit_ms: timings.toast_exit_ms,
        }
    }

    /// `(delay before, phase entered)` steps after the toast is attached hidden.
    #[must_use]
    pub const fn steps(&self) -> [(u32, ToastPhase); 3] {
        [
            (self.enter_ms, ToastPhase::Visible),
            (self.hold_ms, ToastPhase::Leaving),
            (self.exit_ms, ToastPhase::Removed),
        ]
    }
}
