//! Defines the events delivered to the tao event loop.

/// Events sent to the event loop from menu callbacks and background tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    /// A native menu item was activated. Carries the `muda` menu id.
    MenuActivated(String),
    /// A custom menu action failed and the user should be told.
    ActionFailed { label: String, message: String },
}
