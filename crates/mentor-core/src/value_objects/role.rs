//! User role carried in access tokens and stored on the user row

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::status::StatusParseError;

/// Marketplace role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Mentor,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Mentor => "mentor",
            Self::Admin => "admin",
        }
    }

    #[inline]
    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }

    /// Mentors and admins may publish mentor profiles
    #[inline]
    pub fn can_mentor(self) -> bool {
        matches!(self, Self::Mentor | Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "mentor" => Ok(Self::Mentor),
            "admin" => Ok(Self::Admin),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_capabilities() {
        assert!(UserRole::Admin.is_admin());
        assert!(UserRole::Admin.can_mentor());
        assert!(UserRole::Mentor.can_mentor());
        assert!(!UserRole::Student.can_mentor());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("mentor".parse::<UserRole>().unwrap(), UserRole::Mentor);
        assert!("owner".parse::<UserRole>().is_err());
    }
}
