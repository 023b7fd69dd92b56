//! The seam between the menu template and whatever displays it.

use std::sync::Arc;

use super::action::ExternalOpener;
use super::error::MenuError;
use super::node::{self, MenuNode};
use super::template::{application_template, Platform};

/// A menu subsystem that can turn a template into a live menu and make it the
/// process-wide active menu.
///
/// The production implementation wraps `muda`; tests use a recording fake so
/// no GUI is required.
pub trait MenuHost {
    /// The live menu produced by `build_from_template`.
    type Handle;

    fn build_from_template(&self, template: &[MenuNode]) -> Result<Self::Handle, MenuError>;

    /// Installs `menu` as the active application menu, replacing any previous one.
    fn set_application_menu(&self, menu: &Self::Handle) -> Result<(), MenuError>;
}

/// Builds the application template for `platform`, installs it on `host` and
/// returns the live menu handle.
///
/// Called once at startup. Failures are returned to the caller untouched.
pub fn install_application_menu<H: MenuHost>(
    host: &H,
    platform: Platform,
    opener: Arc<dyn ExternalOpener>,
) -> Result<H::Handle, MenuError> {
    let template = application_template(platform, opener);
    node::validate(&template)?;
    tracing::debug!("Application menu for {:?}:\n{}", platform, node::outline(&template));

    let menu = host.build_from_template(&template)?;
    host.set_application_menu(&menu)?;
    tracing::info!("Installed application menu ({} top-level groups).", template.len());
    Ok(menu)
}
