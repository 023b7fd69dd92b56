//! Performs the menu roles that only the window shell can carry out.

use wry::WebView;

use crate::menu::node::Role;

/// The parts of the WebView the menu drives.
pub trait WebViewShell {
    fn reload(&self);
    fn is_devtools_open(&self) -> bool;
    fn open_devtools(&self);
    fn close_devtools(&self);
    /// Runs a `document.execCommand` editing command, e.g. `undo`.
    fn exec_edit_command(&self, command: &str);
}

impl WebViewShell for WebView {
    fn reload(&self) {
        if let Err(e) = self.evaluate_script("window.location.reload()") {
            tracing::warn!("Failed to reload the WebView: {}", e);
        }
    }

    fn is_devtools_open(&self) -> bool {
        WebView::is_devtools_open(self)
    }

    fn open_devtools(&self) {
        WebView::open_devtools(self)
    }

    fn close_devtools(&self) {
        WebView::close_devtools(self)
    }

    fn exec_edit_command(&self, command: &str) {
        let script = format!("document.execCommand('{command}')");
        if let Err(e) = self.evaluate_script(&script) {
            tracing::warn!("Failed to run '{}' in the WebView: {}", command, e);
        }
    }
}

/// What the event loop must do after a role was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellRequest {
    Continue,
    CloseWindow,
    Quit,
}

/// Carries out `role` on `shell`. Roles owned by the native menu never reach
/// here on platforms that support them.
pub fn perform_role<S: WebViewShell + ?Sized>(
    role: Role,
    shell: &S,
    devtools_enabled: bool,
) -> ShellRequest {
    match role {
        Role::Quit => {
            tracing::info!("Quit requested from the menu.");
            return ShellRequest::Quit;
        }
        Role::Close => return ShellRequest::CloseWindow,
        Role::Undo => shell.exec_edit_command("undo"),
        Role::Redo => shell.exec_edit_command("redo"),
        Role::Reload => {
            tracing::info!("Reloading the WebView.");
            shell.reload();
        }
        Role::ToggleDevTools if !devtools_enabled => {
            tracing::info!("Developer tools are disabled in the config.");
        }
        Role::ToggleDevTools => {
            if shell.is_devtools_open() {
                shell.close_devtools();
            } else {
                shell.open_devtools();
            }
        }
        Role::Help => tracing::debug!("Role '{}' has no action of its own.", role),
    }
    ShellRequest::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct MockShell {
        devtools_open: Cell<bool>,
        calls: RefCell<Vec<&'static str>>,
    }

    impl WebViewShell for MockShell {
        fn reload(&self) {
            self.calls.borrow_mut().push("reload");
        }
        fn is_devtools_open(&self) -> bool {
            self.devtools_open.get()
        }
        fn open_devtools(&self) {
            self.devtools_open.set(true);
            self.calls.borrow_mut().push("open");
        }
        fn close_devtools(&self) {
            self.devtools_open.set(false);
            self.calls.borrow_mut().push("close");
        }
        fn exec_edit_command(&self, command: &str) {
            let call = match command {
                "undo" => "undo",
                "redo" => "redo",
                _ => "other",
            };
            self.calls.borrow_mut().push(call);
        }
    }

    #[test]
    fn test_toggle_devtools_alternates() {
        let shell = MockShell::default();
        perform_role(Role::ToggleDevTools, &shell, true);
        perform_role(Role::ToggleDevTools, &shell, true);
        assert_eq!(*shell.calls.borrow(), vec!["open", "close"]);
        assert!(!shell.is_devtools_open());
    }

    #[test]
    fn test_toggle_devtools_respects_config() {
        let shell = MockShell::default();
        perform_role(Role::ToggleDevTools, &shell, false);
        assert!(shell.calls.borrow().is_empty());
    }

    #[test]
    fn test_reload_continues() {
        let shell = MockShell::default();
        assert_eq!(
            perform_role(Role::Reload, &shell, true),
            ShellRequest::Continue
        );
        assert_eq!(*shell.calls.borrow(), vec!["reload"]);
    }

    #[test]
    fn test_quit_and_close_request_exit() {
        let shell = MockShell::default();
        assert_eq!(perform_role(Role::Quit, &shell, true), ShellRequest::Quit);
        assert_eq!(
            perform_role(Role::Close, &shell, true),
            ShellRequest::CloseWindow
        );
        assert!(shell.calls.borrow().is_empty());
    }

    #[test]
    fn test_undo_redo_run_edit_commands() {
        let shell = MockShell::default();
        perform_role(Role::Undo, &shell, true);
        perform_role(Role::Redo, &shell, true);
        assert_eq!(*shell.calls.borrow(), vec!["undo", "redo"]);
    }
}
