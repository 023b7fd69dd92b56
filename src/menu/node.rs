//! The declarative menu tree handed to a menu host.

use std::fmt;
use std::sync::Arc;

use super::action::MenuAction;
use super::error::MenuError;

/// A behaviour predefined by the host. The tree only names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Close,
    Quit,
    Undo,
    Redo,
    Reload,
    ToggleDevTools,
    /// Marks a group as the application's help menu.
    Help,
}

impl Role {
    /// The label shown when a node bearing this role has none of its own.
    pub fn default_label(self) -> &'static str {
        match self {
            Role::Close => "Close Window",
            Role::Quit => "Quit",
            Role::Undo => "Undo",
            Role::Redo => "Redo",
            Role::Reload => "Reload",
            Role::ToggleDevTools => "Toggle Developer Tools",
            Role::Help => "Help",
        }
    }

    /// `true` for roles that describe a group rather than a single item.
    pub fn is_group_role(self) -> bool {
        matches!(self, Role::Help)
    }

    fn as_str(self) -> &'static str {
        match self {
            Role::Close => "close",
            Role::Quit => "quit",
            Role::Undo => "undo",
            Role::Redo => "redo",
            Role::Reload => "reload",
            Role::ToggleDevTools => "toggleDevTools",
            Role::Help => "help",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the menu tree: a group with children, or a leaf that is either
/// bound to a host role or runs a custom action. Never both.
#[derive(Clone)]
pub enum MenuNode {
    Group {
        label: Option<String>,
        role: Option<Role>,
        submenu: Vec<MenuNode>,
    },
    RoleItem {
        role: Role,
    },
    Action {
        label: String,
        action: Arc<dyn MenuAction>,
    },
}

impl MenuNode {
    pub fn group(label: impl Into<String>, submenu: Vec<MenuNode>) -> Self {
        MenuNode::Group {
            label: Some(label.into()),
            role: None,
            submenu,
        }
    }

    /// A group whose label comes from its role, e.g. the help menu.
    pub fn role_group(role: Role, submenu: Vec<MenuNode>) -> Self {
        MenuNode::Group {
            label: None,
            role: Some(role),
            submenu,
        }
    }

    pub fn role_item(role: Role) -> Self {
        MenuNode::RoleItem { role }
    }

    pub fn action(label: impl Into<String>, action: Arc<dyn MenuAction>) -> Self {
        MenuNode::Action {
            label: label.into(),
            action,
        }
    }

    /// The explicit label, or the default label of the node's role.
    pub fn display_label(&self) -> &str {
        match self {
            MenuNode::Group {
                label: Some(label), ..
            } => label,
            MenuNode::Group {
                label: None,
                role: Some(role),
                ..
            } => role.default_label(),
            MenuNode::Group { .. } => "",
            MenuNode::RoleItem { role } => role.default_label(),
            MenuNode::Action { label, .. } => label,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            MenuNode::Group { role, .. } => *role,
            MenuNode::RoleItem { role } => Some(*role),
            MenuNode::Action { .. } => None,
        }
    }

    /// Children of a group; empty for leaves.
    pub fn submenu(&self) -> &[MenuNode] {
        match self {
            MenuNode::Group { submenu, .. } => submenu,
            _ => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, MenuNode::Group { .. })
    }
}

impl fmt::Debug for MenuNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuNode::Group {
                label,
                role,
                submenu,
            } => f
                .debug_struct("Group")
                .field("label", label)
                .field("role", role)
                .field("submenu", submenu)
                .finish(),
            MenuNode::RoleItem { role } => f.debug_struct("RoleItem").field("role", role).finish(),
            MenuNode::Action { label, .. } => f
                .debug_struct("Action")
                .field("label", label)
                .finish_non_exhaustive(),
        }
    }
}

/// Checks the structural rules a host relies on before materializing a tree.
pub fn validate(template: &[MenuNode]) -> Result<(), MenuError> {
    validate_level(template, &mut Vec::new())
}

fn validate_level(nodes: &[MenuNode], path: &mut Vec<usize>) -> Result<(), MenuError> {
    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        match node {
            MenuNode::Group {
                label,
                role,
                submenu,
            } => {
                if let Some(role) = role {
                    if !role.is_group_role() {
                        return Err(MenuError::ItemRoleOnGroup(*role));
                    }
                }
                let unnamed = label.as_deref().map_or(true, str::is_empty);
                if unnamed && role.is_none() {
                    return Err(MenuError::UnnamedGroup(format_path(path)));
                }
                validate_level(submenu, path)?;
            }
            MenuNode::RoleItem { role } => {
                if role.is_group_role() {
                    return Err(MenuError::GroupRoleOnItem(*role));
                }
            }
            MenuNode::Action { label, .. } => {
                if label.trim().is_empty() {
                    return Err(MenuError::EmptyLabel(format_path(path)));
                }
            }
        }
        path.pop();
    }
    Ok(())
}

/// Dotted index path, e.g. `3.0` for the first child of the fourth group.
pub fn format_path(path: &[usize]) -> String {
    path.iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// Renders the tree as indented text, one node per line.
pub fn outline(template: &[MenuNode]) -> String {
    let mut out = String::new();
    write_outline(template, 0, &mut out);
    out
}

fn write_outline(nodes: &[MenuNode], depth: usize, out: &mut String) {
    for node in nodes {
        out.push_str(&"  ".repeat(depth));
        match node {
            MenuNode::Group { role, .. } => {
                out.push_str(node.display_label());
                if let Some(role) = role {
                    out.push_str(&format!(" [{role}]"));
                }
            }
            MenuNode::RoleItem { role } => out.push_str(&format!("({role})")),
            MenuNode::Action { label, .. } => out.push_str(&format!("{label} -> action")),
        }
        out.push('\n');
        write_outline(node.submenu(), depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::action::{ExternalOpener, OpenExternal};
    use crate::menu::error::ActionError;
    use async_trait::async_trait;

    struct NoopOpener;

    #[async_trait]
    impl ExternalOpener for NoopOpener {
        async fn open(&self, _url: &str) -> Result<(), ActionError> {
            Ok(())
        }
    }

    fn noop_action() -> Arc<dyn MenuAction> {
        Arc::new(OpenExternal::new("https://example.com", Arc::new(NoopOpener)))
    }

    #[test]
    fn test_display_label_falls_back_to_role() {
        assert_eq!(MenuNode::role_item(Role::Quit).display_label(), "Quit");
        assert_eq!(
            MenuNode::role_group(Role::Help, vec![]).display_label(),
            "Help"
        );
        assert_eq!(MenuNode::group("File", vec![]).display_label(), "File");
    }

    #[test]
    fn test_action_leaf_has_no_role() {
        let node = MenuNode::action("Learn More", noop_action());
        assert!(node.is_leaf());
        assert_eq!(node.role(), None);
        assert!(node.submenu().is_empty());
    }

    #[test]
    fn test_validate_rejects_item_role_on_group() {
        let template = vec![MenuNode::role_group(Role::Undo, vec![])];
        assert!(matches!(
            validate(&template),
            Err(MenuError::ItemRoleOnGroup(Role::Undo))
        ));
    }

    #[test]
    fn test_validate_rejects_help_role_on_leaf() {
        let template = vec![MenuNode::group("Edit", vec![MenuNode::role_item(Role::Help)])];
        assert!(matches!(
            validate(&template),
            Err(MenuError::GroupRoleOnItem(Role::Help))
        ));
    }

    #[test]
    fn test_validate_reports_path_of_unnamed_group() {
        let template = vec![
            MenuNode::group("File", vec![]),
            MenuNode::group(
                "View",
                vec![MenuNode::Group {
                    label: Some(String::new()),
                    role: None,
                    submenu: vec![],
                }],
            ),
        ];
        match validate(&template) {
            Err(MenuError::UnnamedGroup(path)) => assert_eq!(path, "1.0"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_blank_action_label() {
        let template = vec![MenuNode::group(
            "Help",
            vec![MenuNode::action("  ", noop_action())],
        )];
        assert!(matches!(validate(&template), Err(MenuError::EmptyLabel(_))));
    }

    #[test]
    fn test_outline_indents_children() {
        let template = vec![
            MenuNode::group("Edit", vec![MenuNode::role_item(Role::Undo)]),
            MenuNode::role_group(Role::Help, vec![MenuNode::action("Docs", noop_action())]),
        ];
        assert_eq!(
            outline(&template),
            "Edit\n  (undo)\nHelp [help]\n  Docs -> action\n"
        );
    }

    #[test]
    fn test_debug_hides_callback() {
        let node = MenuNode::action("Learn More", noop_action());
        let rendered = format!("{:?}", node);
        assert!(rendered.starts_with("Action { label: \"Learn More\""));
    }
}
