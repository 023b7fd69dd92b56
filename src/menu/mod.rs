//! The application menu: its declarative tree, the template, and the seams to
//! the host that displays it.

pub mod action;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod node;
pub mod template;

pub use action::{ExternalOpener, MenuAction, OpenExternal};
pub use dispatch::{CommandTable, Dispatch, MenuCommand};
pub use error::{ActionError, MenuError};
pub use host::{install_application_menu, MenuHost};
pub use node::{MenuNode, Role};
pub use template::{application_template, file_submenu, Platform, LEARN_MORE_LABEL, LEARN_MORE_URL};
