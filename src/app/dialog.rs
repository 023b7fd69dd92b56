//! An abstraction layer for native message dialogs to enable testing.

/// Shows non-fatal problems to the user.
/// A mock implementation is used during tests so that no OS dialog appears.
pub trait NotificationService: Send + Sync {
    fn show_warning(&self, title: &str, message: &str);
}

/// The production implementation that uses the `rfd` crate to show native dialogs.
pub struct NativeNotificationService;

impl NotificationService for NativeNotificationService {
    fn show_warning(&self, title: &str, message: &str) {
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}
