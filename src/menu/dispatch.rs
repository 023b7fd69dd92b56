//! Routes menu activations to custom actions or to roles the shell handles.
//!
//! The native menu reports activations as opaque string ids. The table built
//! here assigns those ids from the template and decides what each one does.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::action::MenuAction;
use super::node::{format_path, MenuNode, Role};
use super::template::Platform;
use crate::app::events::UserEvent;
use crate::app::proxy::EventProxy;

/// Id of the custom action at `path` (indices from the top level down).
pub fn action_id(path: &[usize]) -> String {
    format!("action:{}", format_path(path))
}

/// Id of a role the shell implements itself.
pub fn role_id(role: Role) -> String {
    format!("role:{role}")
}

/// Whether the native menu on `platform` has a working predefined item for `role`.
///
/// GTK drops quit, close, undo and redo items, so Linux gets plain items instead.
pub fn native_role_supported(role: Role, platform: Platform) -> bool {
    match role {
        Role::Close | Role::Quit | Role::Undo | Role::Redo => platform != Platform::Linux,
        Role::Reload | Role::ToggleDevTools | Role::Help => false,
    }
}

/// Item roles that the window shell must perform itself on `platform`.
pub fn is_shell_role(role: Role, platform: Platform) -> bool {
    !role.is_group_role() && !native_role_supported(role, platform)
}

#[derive(Clone)]
pub enum MenuCommand {
    Action {
        label: String,
        action: Arc<dyn MenuAction>,
    },
    ShellRole(Role),
}

/// What happened to an activation.
#[derive(Debug)]
pub enum Dispatch {
    /// A custom action is running on the tokio runtime.
    Spawned(JoinHandle<()>),
    /// The shell must perform this role.
    ShellRole(Role),
    /// The id is not ours, e.g. a predefined item handled by the OS.
    Unknown,
}

#[derive(Clone, Default)]
pub struct CommandTable {
    commands: HashMap<String, MenuCommand>,
}

impl CommandTable {
    pub fn from_template(template: &[MenuNode], platform: Platform) -> Self {
        let mut table = Self::default();
        table.collect(template, platform, &mut Vec::new());
        table
    }

    fn collect(&mut self, nodes: &[MenuNode], platform: Platform, path: &mut Vec<usize>) {
        for (index, node) in nodes.iter().enumerate() {
            path.push(index);
            match node {
                MenuNode::Group { submenu, .. } => self.collect(submenu, platform, path),
                MenuNode::RoleItem { role } if is_shell_role(*role, platform) => {
                    self.commands
                        .insert(role_id(*role), MenuCommand::ShellRole(*role));
                }
                MenuNode::RoleItem { .. } => {}
                MenuNode::Action { label, action } => {
                    self.commands.insert(
                        action_id(path),
                        MenuCommand::Action {
                            label: label.clone(),
                            action: action.clone(),
                        },
                    );
                }
            }
            path.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MenuCommand> {
        self.commands.get(id)
    }

    /// Handles one activation. Custom actions are spawned, so this must run
    /// inside a tokio runtime.
    pub fn dispatch<P: EventProxy>(&self, id: &str, proxy: &P) -> Dispatch {
        match self.commands.get(id) {
            Some(MenuCommand::Action { label, action }) => {
                tracing::info!("Menu action '{}' activated.", label);
                let label = label.clone();
                let action = action.clone();
                let proxy = proxy.clone();
                Dispatch::Spawned(tokio::spawn(async move {
                    run_action(label, action, proxy).await;
                }))
            }
            Some(MenuCommand::ShellRole(role)) => Dispatch::ShellRole(*role),
            None => {
                tracing::debug!("Ignoring menu event with unknown id '{}'.", id);
                Dispatch::Unknown
            }
        }
    }
}

/// Runs `action` to completion and reports a failure instead of dropping it.
pub async fn run_action<P: EventProxy>(label: String, action: Arc<dyn MenuAction>, proxy: P) {
    if let Err(e) = action.run().await {
        tracing::error!("Menu action '{}' failed: {}", label, e);
        proxy.send_event(UserEvent::ActionFailed {
            label,
            message: e.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::action::ExternalOpener;
    use crate::menu::error::ActionError;
    use crate::menu::template::{application_template, Platform, LEARN_MORE_URL};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::mpsc;
    use tracing_test::traced_test;

    #[derive(Clone)]
    struct TestEventProxy {
        sender: mpsc::UnboundedSender<UserEvent>,
    }

    impl EventProxy for TestEventProxy {
        fn send_event(&self, event: UserEvent) {
            self.sender.send(event).expect("Test receiver dropped");
        }
    }

    #[derive(Default)]
    struct MockOpener {
        opened: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl ExternalOpener for MockOpener {
        async fn open(&self, url: &str) -> Result<(), ActionError> {
            self.opened.lock().unwrap().push(url.to_string());
            if self.fail {
                Err(ActionError::OpenExternal {
                    url: url.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no handler"),
                })
            } else {
                Ok(())
            }
        }
    }

    fn table_with(opener: Arc<MockOpener>) -> CommandTable {
        let template = application_template(Platform::Windows, opener);
        CommandTable::from_template(&template, Platform::Windows)
    }

    #[test]
    fn test_table_registers_shell_roles_and_action() {
        let table = table_with(Arc::new(MockOpener::default()));
        assert_eq!(table.len(), 3);
        assert!(matches!(
            table.get("role:reload"),
            Some(MenuCommand::ShellRole(Role::Reload))
        ));
        assert!(matches!(
            table.get("role:toggleDevTools"),
            Some(MenuCommand::ShellRole(Role::ToggleDevTools))
        ));
        assert!(matches!(
            table.get("action:3.0"),
            Some(MenuCommand::Action { label, .. }) if label == "Learn More"
        ));
        assert!(table.get(&role_id(Role::Quit)).is_none());
    }

    #[test]
    fn test_native_role_support_per_platform() {
        let item_roles = [
            Role::Close,
            Role::Quit,
            Role::Undo,
            Role::Redo,
            Role::Reload,
            Role::ToggleDevTools,
        ];
        for platform in Platform::ALL {
            for role in item_roles {
                let expected = match role {
                    Role::Reload | Role::ToggleDevTools => false,
                    _ => platform != Platform::Linux,
                };
                assert_eq!(
                    native_role_supported(role, platform),
                    expected,
                    "{:?} on {:?}",
                    role,
                    platform
                );
                assert_eq!(is_shell_role(role, platform), !expected);
            }
            assert!(!is_shell_role(Role::Help, platform));
        }
    }

    #[test]
    fn test_linux_table_routes_file_and_edit_roles_to_the_shell() {
        let template = application_template(Platform::Linux, Arc::new(MockOpener::default()));
        let table = CommandTable::from_template(&template, Platform::Linux);
        assert_eq!(table.len(), 6);
        for role in [Role::Quit, Role::Undo, Role::Redo] {
            assert!(matches!(
                table.get(&role_id(role)),
                Some(MenuCommand::ShellRole(r)) if *r == role
            ));
        }
    }

    #[tokio::test]
    async fn test_dispatch_runs_action() {
        let opener = Arc::new(MockOpener::default());
        let table = table_with(opener.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let proxy = TestEventProxy { sender: tx };

        match table.dispatch("action:3.0", &proxy) {
            Dispatch::Spawned(handle) => handle.await.unwrap(),
            other => panic!("unexpected dispatch: {:?}", other),
        }

        assert_eq!(*opener.opened.lock().unwrap(), vec![LEARN_MORE_URL]);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dispatch_shell_role_and_unknown() {
        let table = table_with(Arc::new(MockOpener::default()));
        let (tx, _rx) = mpsc::unbounded_channel();
        let proxy = TestEventProxy { sender: tx };

        assert!(matches!(
            table.dispatch("role:toggleDevTools", &proxy),
            Dispatch::ShellRole(Role::ToggleDevTools)
        ));
        assert!(matches!(
            table.dispatch("predefined-quit", &proxy),
            Dispatch::Unknown
        ));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failed_action_is_reported() {
        let opener = Arc::new(MockOpener {
            fail: true,
            ..Default::default()
        });
        let table = table_with(opener);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let proxy = TestEventProxy { sender: tx };

        // Awaited in place so the log line stays inside the test's span.
        let Some(MenuCommand::Action { label, action }) = table.get("action:3.0").cloned() else {
            panic!("Learn More is not registered");
        };
        run_action(label, action, proxy).await;

        match rx.recv().await {
            Some(UserEvent::ActionFailed { label, message }) => {
                assert_eq!(label, "Learn More");
                assert!(message.contains(LEARN_MORE_URL));
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(logs_contain("Menu action 'Learn More' failed"));
    }
}
