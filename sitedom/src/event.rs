/// Page events with element targeting.
///
/// Hosts translate whatever they observe (a browser, a test, a CLI) into
/// these and hand them to the page in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Document finished loading
    Ready,
    /// Element gained focus
    Focus { target: String },
    /// Element lost focus
    Blur {
        target: String,
        new_target: Option<String>,
    },
    /// A form control's value changed
    Input { target: String },
    /// A form was submitted
    Submit { target: String },
    /// Primary click on an element (or one of its descendants)
    Click { target: String },
    /// Viewport scrolled to a vertical offset in pixels
    Scroll { offset_y: f64 },
    /// Visibility change of an observed element
    Intersect { target: String, ratio: f64 },
}

impl Event {
    /// The element the event is aimed at, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Focus { target }
            | Self::Blur { target, .. }
            | Self::Input { target }
            | Self::Submit { target }
            | Self::Click { target }
            | Self::Intersect { target, .. } => Some(target),
            Self::Ready | Self::Scroll { .. } => None,
        }
    }
}
