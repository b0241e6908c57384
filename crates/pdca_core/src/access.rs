//! Shared-secret role gate for the dashboard surface.
//!
//! # Responsibility
//! - Map a (role, password) pair to a granted capability set.
//!
//! # Invariants
//! - Plaintext compare against per-role secrets, exactly as the dashboard
//!   ships. This is a UI gate, not a security boundary.
//! - Passwords are never logged.

use log::warn;

/// Dashboard user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Viewer,
    Editor,
}

impl Role {
    /// Whether this role may call the write operations
    /// (add/edit/delete/upload).
    pub fn can_edit(self) -> bool {
        matches!(self, Self::Editor)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "Viewer",
            Self::Editor => "Editor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Viewer" => Some(Self::Viewer),
            "Editor" => Some(Self::Editor),
            _ => None,
        }
    }
}

/// Per-role shared secrets.
///
/// Defaults match the passwords the dashboard has always shipped with;
/// deployments can supply their own pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSecrets {
    pub viewer: String,
    pub editor: String,
}

impl Default for RoleSecrets {
    fn default() -> Self {
        Self {
            viewer: "APQPviewer".to_string(),
            editor: "APQPadmin".to_string(),
        }
    }
}

impl RoleSecrets {
    /// Compares the offered password against the secret for `role`.
    pub fn authenticate(&self, role: Role, offered: &str) -> bool {
        let expected = match role {
            Role::Viewer => self.viewer.as_str(),
            Role::Editor => self.editor.as_str(),
        };
        let granted = expected == offered;
        if !granted {
            warn!(
                "event=auth module=access status=denied role={}",
                role.as_str()
            );
        }
        granted
    }
}

#[cfg(test)]
mod tests {
    use super::{Role, RoleSecrets};

    #[test]
    fn editor_can_edit_viewer_cannot() {
        assert!(Role::Editor.can_edit());
        assert!(!Role::Viewer.can_edit());
    }

    #[test]
    fn role_text_roundtrips() {
        for role in [Role::Viewer, Role::Editor] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("Admin"), None);
    }

    #[test]
    fn authenticate_checks_the_matching_secret_only() {
        let secrets = RoleSecrets {
            viewer: "v-pass".to_string(),
            editor: "e-pass".to_string(),
        };

        assert!(secrets.authenticate(Role::Viewer, "v-pass"));
        assert!(secrets.authenticate(Role::Editor, "e-pass"));
        assert!(!secrets.authenticate(Role::Editor, "v-pass"));
        assert!(!secrets.authenticate(Role::Viewer, ""));
    }
}
