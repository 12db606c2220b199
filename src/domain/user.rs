//! User domain entity and role types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Staff/owner roles, ordered by privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Operator,
    Technician,
    Manager,
    Admin,
    Owner,
}

impl UserRole {
    /// All valid role string values
    pub const ALL: &'static [UserRole] = &[
        UserRole::Operator,
        UserRole::Technician,
        UserRole::Manager,
        UserRole::Admin,
        UserRole::Owner,
    ];

    /// Parse a role string, returning None for unknown values
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "operator" => Some(UserRole::Operator),
            "technician" => Some(UserRole::Technician),
            "manager" => Some(UserRole::Manager),
            "admin" => Some(UserRole::Admin),
            "owner" => Some(UserRole::Owner),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Operator => "operator",
            UserRole::Technician => "technician",
            UserRole::Manager => "manager",
            UserRole::Admin => "admin",
            UserRole::Owner => "owner",
        }
    }

    /// Staff roles are the ones managed through the /staff endpoints
    pub fn is_staff(&self) -> bool {
        matches!(
            self,
            UserRole::Operator | UserRole::Technician | UserRole::Manager
        )
    }

    /// Operator-level access: everyone except bare technicians
    pub fn is_operator_or_higher(&self) -> bool {
        matches!(
            self,
            UserRole::Operator | UserRole::Manager | UserRole::Admin | UserRole::Owner
        )
    }

    /// Technicians record temperatures alongside operator-level roles
    pub fn can_record_temperature(&self) -> bool {
        self.is_operator_or_higher() || matches!(self, UserRole::Technician)
    }

    pub fn is_manager_or_higher(&self) -> bool {
        matches!(self, UserRole::Manager | UserRole::Admin | UserRole::Owner)
    }

    pub fn is_admin_or_owner(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Owner)
    }

    /// Human-readable label for staff listings
    pub fn display_label(&self) -> &'static str {
        match self {
            UserRole::Operator => "Inward/Outward Operator",
            UserRole::Technician => "Technician (Temperature)",
            UserRole::Manager => "Manager",
            UserRole::Admin => "Admin",
            UserRole::Owner => "Owner",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interface language preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PreferredLanguage {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
}

impl PreferredLanguage {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "en" => Some(PreferredLanguage::English),
            "hi" => Some(PreferredLanguage::Hindi),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PreferredLanguage::English => "en",
            PreferredLanguage::Hindi => "hi",
        }
    }
}

impl Default for PreferredLanguage {
    fn default() -> Self {
        PreferredLanguage::English
    }
}

/// User domain entity.
///
/// `role` is None until an admin/owner assigns one; unassigned users can
/// authenticate but are blocked from role-gated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub phone_number: String,
    pub name: String,
    pub preferred_language: PreferredLanguage,
    pub role: Option<UserRole>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn has_assigned_role(&self) -> bool {
        self.role.is_some()
    }

    pub fn is_staff_member(&self) -> bool {
        self.role.map(|r| r.is_staff()).unwrap_or(false)
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Login phone number
    #[schema(example = "9000000001")]
    pub phone_number: String,
    pub name: String,
    #[schema(example = "en")]
    pub preferred_language: PreferredLanguage,
    /// Assigned role, null until granted
    pub role: Option<UserRole>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            phone_number: user.phone_number,
            name: user.name,
            preferred_language: user.preferred_language,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Staff listing entry with a human-readable role label
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StaffMemberResponse {
    pub id: Uuid,
    pub phone_number: String,
    pub name: String,
    pub preferred_language: PreferredLanguage,
    pub role: Option<UserRole>,
    #[schema(example = "Inward/Outward Operator")]
    pub role_display: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for StaffMemberResponse {
    fn from(user: User) -> Self {
        let role_display = user
            .role
            .map(|r| r.display_label().to_string())
            .unwrap_or_else(|| "No Role".to_string());
        Self {
            id: user.id,
            phone_number: user.phone_number,
            name: user.name,
            preferred_language: user.preferred_language,
            role: user.role,
            role_display,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_round_trip() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::parse(role.as_str()), Some(*role));
        }
        assert_eq!(UserRole::parse("supervisor"), None);
    }

    #[test]
    fn test_role_hierarchy() {
        assert!(UserRole::Operator.is_operator_or_higher());
        assert!(!UserRole::Technician.is_operator_or_higher());
        assert!(UserRole::Technician.can_record_temperature());
        assert!(UserRole::Owner.is_manager_or_higher());
        assert!(!UserRole::Manager.is_admin_or_owner());
    }

    #[test]
    fn test_staff_roles() {
        assert!(UserRole::Operator.is_staff());
        assert!(UserRole::Technician.is_staff());
        assert!(UserRole::Manager.is_staff());
        assert!(!UserRole::Admin.is_staff());
        assert!(!UserRole::Owner.is_staff());
    }
}
