//! Native menu bar backed by the `muda` crate.
//!
//! Platform-specific behavior:
//! - macOS: the menu becomes the NSApp main menu and Help is registered as the
//!   system help menu.
//! - Linux: the menu bar is attached to the tao window's GTK vbox. `muda` has
//!   no GTK rendition of the quit, close, undo and redo items, so those are
//!   plain items routed back to the window shell.
//! - Windows: the menu bar is attached to the window's HWND. Accelerators only
//!   fire once the event loop translates them, see [`translate_accelerators`].

use std::cell::RefCell;

use muda::accelerator::{Accelerator, Code, Modifiers};
use muda::{IsMenuItem, Menu, MenuEvent, MenuItem, PredefinedMenuItem, Submenu};
use tao::window::Window;

use crate::app::events::UserEvent;
use crate::app::proxy::EventProxy;
use crate::menu::dispatch::{action_id, native_role_supported, role_id, CommandTable};
use crate::menu::error::MenuError;
use crate::menu::host::MenuHost;
use crate::menu::node::{MenuNode, Role};
use crate::menu::template::Platform;

/// A materialized menu together with the table that routes its activations.
pub struct NativeMenu {
    pub menu: Menu,
    pub commands: CommandTable,
}

/// Builds `muda` menus and attaches them to one tao window.
pub struct NativeMenuHost<'a> {
    window: &'a Window,
    platform: Platform,
    active: RefCell<Option<Menu>>,
}

impl<'a> NativeMenuHost<'a> {
    pub fn new(window: &'a Window, platform: Platform) -> Self {
        Self {
            window,
            platform,
            active: RefCell::new(None),
        }
    }
}

impl MenuHost for NativeMenuHost<'_> {
    type Handle = NativeMenu;

    fn build_from_template(&self, template: &[MenuNode]) -> Result<NativeMenu, MenuError> {
        let menu = Menu::new();
        let mut path = Vec::new();
        for (index, node) in template.iter().enumerate() {
            path.push(index);
            let item = build_node(node, self.platform, &mut path)?;
            menu.append(item.as_ref())?;
            path.pop();
        }

        Ok(NativeMenu {
            menu,
            commands: CommandTable::from_template(template, self.platform),
        })
    }

    fn set_application_menu(&self, native: &NativeMenu) -> Result<(), MenuError> {
        let previous = self.active.borrow_mut().take();
        if let Some(previous) = previous {
            tracing::debug!("Replacing the active application menu.");
            self.detach(&previous)?;
        }
        self.attach(&native.menu)?;
        *self.active.borrow_mut() = Some(native.menu.clone());
        Ok(())
    }
}

impl NativeMenuHost<'_> {
    #[cfg(target_os = "macos")]
    fn attach(&self, menu: &Menu) -> Result<(), MenuError> {
        let _ = self.window;
        menu.init_for_nsapp();
        Ok(())
    }

    #[cfg(target_os = "macos")]
    fn detach(&self, _menu: &Menu) -> Result<(), MenuError> {
        // Setting a new NSApp main menu replaces the old one.
        Ok(())
    }

    #[cfg(target_os = "linux")]
    fn attach(&self, menu: &Menu) -> Result<(), MenuError> {
        use tao::platform::unix::WindowExtUnix;
        menu.init_for_gtk_window(self.window.gtk_window(), self.window.default_vbox())?;
        Ok(())
    }

    #[cfg(target_os = "linux")]
    fn detach(&self, menu: &Menu) -> Result<(), MenuError> {
        use tao::platform::unix::WindowExtUnix;
        menu.remove_for_gtk_window(self.window.gtk_window())?;
        Ok(())
    }

    #[cfg(target_os = "windows")]
    fn attach(&self, menu: &Menu) -> Result<(), MenuError> {
        use tao::platform::windows::WindowExtWindows;
        // SAFETY: the HWND belongs to a live tao window borrowed for `'a`.
        unsafe { menu.init_for_hwnd(self.window.hwnd() as _)? };
        Ok(())
    }

    #[cfg(target_os = "windows")]
    fn detach(&self, menu: &Menu) -> Result<(), MenuError> {
        use tao::platform::windows::WindowExtWindows;
        // SAFETY: see `attach`.
        unsafe { menu.remove_for_hwnd(self.window.hwnd() as _)? };
        Ok(())
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    fn attach(&self, _menu: &Menu) -> Result<(), MenuError> {
        let _ = self.window;
        tracing::warn!("No native menu bar on this platform; menu not attached.");
        Ok(())
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    fn detach(&self, _menu: &Menu) -> Result<(), MenuError> {
        Ok(())
    }
}

fn build_node(
    node: &MenuNode,
    platform: Platform,
    path: &mut Vec<usize>,
) -> Result<Box<dyn IsMenuItem>, MenuError> {
    match node {
        MenuNode::Group { role, submenu, .. } => {
            let group = Submenu::new(node.display_label(), true);
            for (index, child) in submenu.iter().enumerate() {
                path.push(index);
                let item = build_node(child, platform, path)?;
                group.append(item.as_ref())?;
                path.pop();
            }
            if *role == Some(Role::Help) {
                #[cfg(target_os = "macos")]
                group.set_as_help_menu_for_nsapp();
            }
            Ok(Box::new(group))
        }
        MenuNode::RoleItem { role } => Ok(role_item(*role, platform)),
        MenuNode::Action { label, .. } => Ok(Box::new(MenuItem::with_id(
            action_id(path),
            label,
            true,
            None,
        ))),
    }
}

fn role_item(role: Role, platform: Platform) -> Box<dyn IsMenuItem> {
    if native_role_supported(role, platform) {
        return match role {
            Role::Close => Box::new(PredefinedMenuItem::close_window(None)),
            Role::Quit => Box::new(PredefinedMenuItem::quit(None)),
            Role::Undo => Box::new(PredefinedMenuItem::undo(None)),
            _ => Box::new(PredefinedMenuItem::redo(None)),
        };
    }

    let accelerator = match role {
        Role::Close => Some(Accelerator::new(Some(primary_modifier()), Code::KeyW)),
        Role::Quit => Some(Accelerator::new(Some(primary_modifier()), Code::KeyQ)),
        Role::Undo => Some(Accelerator::new(Some(primary_modifier()), Code::KeyZ)),
        Role::Redo => Some(Accelerator::new(
            Some(primary_modifier() | Modifiers::SHIFT),
            Code::KeyZ,
        )),
        Role::Reload => Some(Accelerator::new(Some(primary_modifier()), Code::KeyR)),
        Role::ToggleDevTools => Some(Accelerator::new(Some(devtools_modifiers()), Code::KeyI)),
        // Rejected by `validate` before we get here.
        Role::Help => None,
    };
    Box::new(MenuItem::with_id(
        role_id(role),
        role.default_label(),
        true,
        accelerator,
    ))
}

fn primary_modifier() -> Modifiers {
    if cfg!(target_os = "macos") {
        Modifiers::META
    } else {
        Modifiers::CONTROL
    }
}

fn devtools_modifiers() -> Modifiers {
    if cfg!(target_os = "macos") {
        Modifiers::META | Modifiers::ALT
    } else {
        Modifiers::CONTROL | Modifiers::SHIFT
    }
}

/// Forwards every native menu activation to the event loop.
pub fn forward_menu_events<P: EventProxy>(proxy: P) {
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        proxy.send_event(UserEvent::MenuActivated(event.id.0));
    }));
}

/// Routes keyboard accelerators of the installed menu through
/// `TranslateAcceleratorW`, which `muda` leaves to the event loop on Windows.
///
/// Returns the slot for the accelerator table; store `Menu::haccel` in it once
/// the menu is installed. Until then messages pass through untouched.
#[cfg(target_os = "windows")]
pub fn translate_accelerators(
    builder: &mut tao::event_loop::EventLoopBuilder<UserEvent>,
) -> std::rc::Rc<std::cell::Cell<isize>> {
    use tao::platform::windows::EventLoopBuilderExtWindows;
    use windows_sys::Win32::UI::WindowsAndMessaging::{TranslateAcceleratorW, MSG};

    let slot = std::rc::Rc::new(std::cell::Cell::new(0isize));
    let table = slot.clone();
    builder.with_msg_hook(move |msg| {
        let haccel = table.get();
        if haccel == 0 {
            return false;
        }
        let msg = msg as *const MSG;
        // SAFETY: tao hands the hook a valid MSG for the duration of the call.
        unsafe { TranslateAcceleratorW((*msg).hwnd, haccel as _, msg) != 0 }
    });
    slot
}
