//! Defines the error types for the `menu` module.

use thiserror::Error;

use super::node::Role;

/// Errors raised while validating, materializing or installing a menu.
#[derive(Debug, Error)]
pub enum MenuError {
    /// A group node carries a role that only makes sense on a leaf item.
    #[error("Role '{0}' cannot be used on a menu group")]
    ItemRoleOnGroup(Role),

    /// A leaf node carries a role that only makes sense on a group.
    #[error("Role '{0}' cannot be used on a menu item")]
    GroupRoleOnItem(Role),

    /// A group has neither a label nor a role to derive one from.
    #[error("Menu group at {0} has neither a label nor a role")]
    UnnamedGroup(String),

    /// A custom action was declared with an empty label.
    #[error("Menu action at {0} has an empty label")]
    EmptyLabel(String),

    /// The native menu backend refused an operation.
    #[error("Native menu error: {0}")]
    Native(#[from] muda::Error),
}

/// Errors raised while running a custom menu action.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The URL is not something we hand to the system browser.
    #[error("Refusing to open unsupported URL: {0}")]
    UnsupportedUrl(String),

    /// The operating system could not open the URL.
    #[error("Failed to open {url}: {source}")]
    OpenExternal {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The blocking task that performed the open was cancelled or panicked.
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}
