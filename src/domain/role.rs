//! Profile roles.
//!
//! The `profiles.role` column is free text. Parsing is total: any string the
//! crate does not recognise becomes [`Role::Unknown`], which no guard accepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::DomainError;

/// Role stored on a profile row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The single fully privileged role.
    RootAdmin,
    /// Staff with read access to administrative views.
    Admin,
    /// Community moderation staff.
    Moderator,
    /// Regular marketplace user.
    #[default]
    User,
    /// Any role string this build does not know about.
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Roles that may be assigned through the API.
    pub const ASSIGNABLE: [Role; 3] = [Role::Admin, Role::Moderator, Role::User];

    /// Parse a role column value. Never fails; see [`Role::Unknown`].
    #[must_use]
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim() {
            "root_admin" => Self::RootAdmin,
            "admin" => Self::Admin,
            "moderator" => Self::Moderator,
            "user" => Self::User,
            _ => Self::Unknown,
        }
    }

    /// Column value for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RootAdmin => "root_admin",
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::User => "user",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub const fn is_root(self) -> bool {
        matches!(self, Self::RootAdmin)
    }

    /// True when this role appears in `allowed`. `Unknown` never matches.
    #[must_use]
    pub fn is_in(self, allowed: &[Role]) -> bool {
        self != Self::Unknown && allowed.contains(&self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    /// Strict parse used for user input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::parse_lossy(s) {
            Self::Unknown => Err(DomainError::UnknownRole(s.to_string())),
            role => Ok(role),
        }
    }
}

/// Deserialize a nullable role column, treating `null` as the default role.
pub(crate) fn deserialize_nullable<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Role>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles() {
        assert_eq!(Role::parse_lossy("root_admin"), Role::RootAdmin);
        assert_eq!(Role::parse_lossy("admin"), Role::Admin);
        assert_eq!(Role::parse_lossy(" moderator "), Role::Moderator);
        assert_eq!(Role::parse_lossy("user"), Role::User);
    }

    #[test]
    fn unrecognised_strings_are_unknown() {
        assert_eq!(Role::parse_lossy("ROOT_ADMIN"), Role::Unknown);
        assert_eq!(Role::parse_lossy(""), Role::Unknown);
        assert_eq!(Role::parse_lossy("superuser"), Role::Unknown);
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        assert!(matches!(
            "owner".parse::<Role>(),
            Err(DomainError::UnknownRole(s)) if s == "owner"
        ));
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn unknown_never_allowed() {
        assert!(!Role::Unknown.is_in(&[Role::Unknown]));
        assert!(!Role::Admin.is_in(&[]));
        assert!(Role::Admin.is_in(&[Role::RootAdmin, Role::Admin]));
    }

    #[test]
    fn serde_uses_column_values() {
        let role: Role = serde_json::from_str("\"root_admin\"").unwrap();
        assert_eq!(role, Role::RootAdmin);
        let role: Role = serde_json::from_str("\"vip\"").unwrap();
        assert_eq!(role, Role::Unknown);
        assert_eq!(serde_json::to_string(&Role::Moderator).unwrap(), "\"moderator\"");
    }

    #[test]
    fn root_is_not_assignable() {
        assert!(!Role::ASSIGNABLE.contains(&Role::RootAdmin));
    }
}
