//! Domain models: roles, capabilities, sessions, and navigation.

pub mod app;
pub mod logs;
pub mod session;

pub use app::{App, ApiRequest, AuthView, Command, Screen};
pub use session::{Session, SessionStore};

use serde::{Deserialize, Serialize};

/// Account role gating which actions a session may perform.
///
/// Authoritative enforcement is server-side; the labels double as URL path
/// segments and as the persisted role value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manufacturer,
    PharmacyOwner,
}

impl Role {
    /// All roles, in selector order.
    pub const ALL: [Role; 2] = [Role::Manufacturer, Role::PharmacyOwner];

    /// Stable label used in URLs and persisted state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manufacturer => "manufacturer",
            Role::PharmacyOwner => "pharmacy_owner",
        }
    }

    /// Human-readable name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Manufacturer => "Manufacturer",
            Role::PharmacyOwner => "Pharmacy Owner",
        }
    }

    /// Parse a persisted or server-provided role label.
    pub fn parse(label: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == label)
    }

    /// Whether this role grants the given capability.
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::RegisterMedicine => matches!(self, Role::Manufacturer),
            Capability::VerifyMedicine => matches!(self, Role::PharmacyOwner),
        }
    }

    /// The next role in the selector.
    pub fn toggled(&self) -> Role {
        match self {
            Role::Manufacturer => Role::PharmacyOwner,
            Role::PharmacyOwner => Role::Manufacturer,
        }
    }
}

/// Action a navigation entry requires from the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    RegisterMedicine,
    VerifyMedicine,
}

/// One entry in the navigation bar.
#[derive(Debug, Clone, Copy)]
pub struct NavLink {
    pub label: &'static str,
    pub hotkey: char,
    pub screen: Screen,
    /// Capability the session must hold; `None` means the entry is public.
    pub required: Option<Capability>,
}

/// Static navigation table, evaluated against the current session per render.
pub const NAV_LINKS: [NavLink; 3] = [
    NavLink {
        label: "Register Medicine",
        hotkey: '1',
        screen: Screen::RegisterMedicine,
        required: Some(Capability::RegisterMedicine),
    },
    NavLink {
        label: "Verify Medicine",
        hotkey: '2',
        screen: Screen::VerifyMedicine,
        required: Some(Capability::VerifyMedicine),
    },
    NavLink {
        label: "View Logs",
        hotkey: '3',
        screen: Screen::ViewLogs,
        required: None,
    },
];

/// Navigation entries visible to the current session.
///
/// An auth-gated entry is hidden without a session, and hidden when the
/// session's role is outside the entry's allow-list.
pub fn visible_nav_links(session: Option<&Session>) -> Vec<&'static NavLink> {
    NAV_LINKS
        .iter()
        .filter(|link| match link.required {
            None => true,
            Some(capability) => session.is_some_and(|s| s.role.allows(capability)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            token: "tok".into(),
            role,
        }
    }

    #[test]
    fn gated_links_hidden_without_session() {
        let links = visible_nav_links(None);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].label, "View Logs");
    }

    #[test]
    fn links_filtered_by_role_allow_list() {
        for role in Role::ALL {
            let session = session(role);
            let links = visible_nav_links(Some(&session));
            for link in NAV_LINKS.iter() {
                let visible = links.iter().any(|l| l.label == link.label);
                let expected = match link.required {
                    None => true,
                    Some(capability) => role.allows(capability),
                };
                assert_eq!(visible, expected, "{} for {:?}", link.label, role);
            }
        }
    }

    #[test]
    fn role_labels_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("pharmacy"), None);
    }
}
