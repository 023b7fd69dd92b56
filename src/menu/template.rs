//! The application menu template.

use std::sync::Arc;

use super::action::{ExternalOpener, OpenExternal};
use super::node::{MenuNode, Role};

pub const LEARN_MORE_LABEL: &str = "Learn More";
pub const LEARN_MORE_URL: &str = "https://github.com/saisandeepvaddi";

/// The operating system family the process runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
    Other,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::MacOs,
        Platform::Windows,
        Platform::Linux,
        Platform::Other,
    ];

    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    /// macOS keeps quitting in the app menu, so File only closes the window.
    pub fn hides_quit_behind_close(self) -> bool {
        self == Platform::MacOs
    }
}

/// The single child of the File menu for `platform`.
pub fn file_submenu(platform: Platform) -> Vec<MenuNode> {
    if platform.hides_quit_behind_close() {
        vec![MenuNode::role_item(Role::Close)]
    } else {
        vec![MenuNode::role_item(Role::Quit)]
    }
}

/// Builds the File, Edit, View and Help menus, in that order.
pub fn application_template(
    platform: Platform,
    opener: Arc<dyn ExternalOpener>,
) -> Vec<MenuNode> {
    let learn_more = Arc::new(OpenExternal::new(LEARN_MORE_URL, opener));

    vec![
        MenuNode::group("File", file_submenu(platform)),
        MenuNode::group(
            "Edit",
            vec![MenuNode::role_item(Role::Undo), MenuNode::role_item(Role::Redo)],
        ),
        MenuNode::group(
            "View",
            vec![
                MenuNode::role_item(Role::Reload),
                MenuNode::role_item(Role::ToggleDevTools),
            ],
        ),
        MenuNode::role_group(
            Role::Help,
            vec![MenuNode::action(LEARN_MORE_LABEL, learn_more)],
        ),
    ]
}
