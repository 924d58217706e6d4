//! Requests only the host can carry out.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    #[default]
    Smooth,
}

/// Vertical alignment for [`Effect::ScrollIntoView`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBlock {
    #[default]
    Start,
    Center,
    End,
    Nearest,
}

/// A viewport change the page asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Bring an element into view.
    ScrollIntoView {
        id: String,
        behavior: ScrollBehavior,
        block: ScrollBlock,
    },
    /// Scroll the window to an absolute offset.
    ScrollTo { top: f64, behavior: ScrollBehavior },
}
