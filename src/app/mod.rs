//! Glue between the tao event loop, the menu and the WebView.

pub mod dialog;
pub mod events;
pub mod proxy;
pub mod shell;

use crate::menu::dispatch::{CommandTable, Dispatch};
use dialog::NotificationService;
use events::UserEvent;
use proxy::EventProxy;
use shell::{ShellRequest, WebViewShell};

/// Everything the event loop needs to react to a `UserEvent`.
pub struct EventContext<'a, P, S: ?Sized, N: ?Sized> {
    pub commands: &'a CommandTable,
    pub proxy: &'a P,
    pub shell: &'a S,
    pub notifications: &'a N,
    pub devtools_enabled: bool,
}

/// Handles a `UserEvent` on the event-loop thread and tells the loop whether
/// it should keep running.
pub fn handle_user_event<P, S, N>(event: UserEvent, ctx: &EventContext<'_, P, S, N>) -> ShellRequest
where
    P: EventProxy,
    S: WebViewShell + ?Sized,
    N: NotificationService + ?Sized,
{
    match event {
        UserEvent::MenuActivated(id) => match ctx.commands.dispatch(&id, ctx.proxy) {
            Dispatch::ShellRole(role) => shell::perform_role(role, ctx.shell, ctx.devtools_enabled),
            // The action reports its own failure through the proxy.
            Dispatch::Spawned(_) | Dispatch::Unknown => ShellRequest::Continue,
        },
        UserEvent::ActionFailed { label, message } => {
            ctx.notifications
                .show_warning(&format!("{} failed", label), &message);
            ShellRequest::Continue
        }
    }
}
