//! User and staff management service.
//!
//! Staff are users holding one of the operational roles (operator,
//! technician, manager); owner and admin accounts are managed through
//! the user endpoints instead.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{PreferredLanguage, StaffMemberResponse, UserResponse, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Fetch one user
    async fn get_user(&self, id: Uuid) -> AppResult<UserResponse>;

    /// Self-service profile update (name, language only)
    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        preferred_language: Option<PreferredLanguage>,
    ) -> AppResult<UserResponse>;

    /// List all users (admin/owner)
    async fn list_users(&self, params: PaginationParams) -> AppResult<Paginated<UserResponse>>;

    /// Create a user with an optional pre-assigned role (admin/owner)
    async fn create_user(
        &self,
        phone_number: String,
        name: String,
        preferred_language: Option<PreferredLanguage>,
        role: Option<UserRole>,
    ) -> AppResult<UserResponse>;

    /// Update any user's fields including role and status (admin/owner)
    async fn update_user(
        &self,
        id: Uuid,
        name: Option<String>,
        preferred_language: Option<PreferredLanguage>,
        role: Option<UserRole>,
        is_active: Option<bool>,
    ) -> AppResult<UserResponse>;

    /// List staff members
    async fn list_staff(&self) -> AppResult<Vec<StaffMemberResponse>>;

    /// Register a staff member with a staff role
    async fn create_staff(
        &self,
        phone_number: String,
        name: String,
        role: UserRole,
        preferred_language: Option<PreferredLanguage>,
    ) -> AppResult<StaffMemberResponse>;

    /// Update a staff member's name or role
    async fn update_staff(
        &self,
        id: Uuid,
        name: Option<String>,
        role: Option<UserRole>,
    ) -> AppResult<StaffMemberResponse>;

    /// Remove a staff member
    async fn delete_staff(&self, id: Uuid) -> AppResult<()>;

    /// Flip a staff member's active flag
    async fn toggle_staff_status(&self, id: Uuid) -> AppResult<StaffMemberResponse>;

    /// Change a staff member's role (staff roles only)
    async fn update_staff_role(&self, id: Uuid, role: UserRole) -> AppResult<StaffMemberResponse>;
}

/// Reject roles outside the staff set for staff endpoints
fn ensure_staff_role(role: UserRole) -> AppResult<()> {
    if !role.is_staff() {
        return Err(AppError::validation(format!(
            "'{}' is not a staff role",
            role.as_str()
        )));
    }
    Ok(())
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn staff_by_id(&self, id: Uuid) -> AppResult<crate::domain::User> {
        let user = self.uow.users().find_by_id(id).await?.ok_or_not_found()?;
        if !user.is_staff_member() {
            return Err(AppError::NotFound);
        }
        Ok(user)
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<UserResponse> {
        let user = self.uow.users().find_by_id(id).await?.ok_or_not_found()?;
        Ok(UserResponse::from(user))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        preferred_language: Option<PreferredLanguage>,
    ) -> AppResult<UserResponse> {
        let user = self.uow.users().update(id, name, preferred_language).await?;
        Ok(UserResponse::from(user))
    }

    async fn list_users(&self, params: PaginationParams) -> AppResult<Paginated<UserResponse>> {
        let (users, total) = self.uow.users().list(&params).await?;
        let data = users.into_iter().map(UserResponse::from).collect();
        Ok(Paginated::new(data, params.page, params.limit(), total))
    }

    async fn create_user(
        &self,
        phone_number: String,
        name: String,
        preferred_language: Option<PreferredLanguage>,
        role: Option<UserRole>,
    ) -> AppResult<UserResponse> {
        if self
            .uow
            .users()
            .find_by_phone(&phone_number)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("User"));
        }

        let user = self
            .uow
            .users()
            .create(phone_number, name, preferred_language.unwrap_or_default())
            .await?;

        let user = match role {
            Some(role) => self.uow.users().assign_role(user.id, role).await?,
            None => user,
        };

        Ok(UserResponse::from(user))
    }

    async fn update_user(
        &self,
        id: Uuid,
        name: Option<String>,
        preferred_language: Option<PreferredLanguage>,
        role: Option<UserRole>,
        is_active: Option<bool>,
    ) -> AppResult<UserResponse> {
        let mut user = self.uow.users().update(id, name, preferred_language).await?;

        if let Some(role) = role {
            user = self.uow.users().assign_role(id, role).await?;
        }
        if let Some(is_active) = is_active {
            user = self.uow.users().set_active(id, is_active).await?;
        }

        Ok(UserResponse::from(user))
    }

    async fn list_staff(&self) -> AppResult<Vec<StaffMemberResponse>> {
        let staff = self.uow.users().list_staff().await?;
        Ok(staff.into_iter().map(StaffMemberResponse::from).collect())
    }

    async fn create_staff(
        &self,
        phone_number: String,
        name: String,
        role: UserRole,
        preferred_language: Option<PreferredLanguage>,
    ) -> AppResult<StaffMemberResponse> {
        ensure_staff_role(role)?;

        if self
            .uow
            .users()
            .find_by_phone(&phone_number)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("User"));
        }

        let user = self
            .uow
            .users()
            .create(phone_number, name, preferred_language.unwrap_or_default())
            .await?;
        let user = self.uow.users().assign_role(user.id, role).await?;

        Ok(StaffMemberResponse::from(user))
    }

    async fn update_staff(
        &self,
        id: Uuid,
        name: Option<String>,
        role: Option<UserRole>,
    ) -> AppResult<StaffMemberResponse> {
        self.staff_by_id(id).await?;

        if let Some(role) = role {
            ensure_staff_role(role)?;
        }

        let mut user = self.uow.users().update(id, name, None).await?;
        if let Some(role) = role {
            user = self.uow.users().assign_role(id, role).await?;
        }

        Ok(StaffMemberResponse::from(user))
    }

    async fn delete_staff(&self, id: Uuid) -> AppResult<()> {
        self.staff_by_id(id).await?;
        self.uow.users().delete(id).await
    }

    async fn toggle_staff_status(&self, id: Uuid) -> AppResult<StaffMemberResponse> {
        let user = self.staff_by_id(id).await?;
        let user = self.uow.users().set_active(id, !user.is_active).await?;
        Ok(StaffMemberResponse::from(user))
    }

    async fn update_staff_role(&self, id: Uuid, role: UserRole) -> AppResult<StaffMemberResponse> {
        ensure_staff_role(role)?;
        self.staff_by_id(id).await?;

        let user = self.uow.users().assign_role(id, role).await?;
        Ok(StaffMemberResponse::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    #[test]
    fn test_staff_role_guard() {
        assert!(ensure_staff_role(UserRole::Operator).is_ok());
        assert!(ensure_staff_role(UserRole::Technician).is_ok());
        assert!(ensure_staff_role(UserRole::Manager).is_ok());
        assert!(ensure_staff_role(UserRole::Admin).is_err());
        assert!(ensure_staff_role(UserRole::Owner).is_err());
    }
}
