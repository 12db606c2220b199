//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::STAFF_ROLES;
use crate::domain::{PreferredLanguage, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by phone number
    async fn find_by_phone(&self, phone_number: &str) -> AppResult<Option<User>>;

    /// Create a new user (role unassigned until granted by an admin)
    async fn create(
        &self,
        phone_number: String,
        name: String,
        preferred_language: PreferredLanguage,
    ) -> AppResult<User>;

    /// Update profile fields
    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        preferred_language: Option<PreferredLanguage>,
    ) -> AppResult<User>;

    /// Assign or change a user's role
    async fn assign_role(&self, id: Uuid, role: UserRole) -> AppResult<User>;

    /// Activate or deactivate a user account
    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<User>;

    /// Permanently remove a user
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// List users with pagination, newest first
    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<User>, u64)>;

    /// List staff members (operator, technician, manager), active or not
    async fn list_staff(&self) -> AppResult<Vec<User>>;

    /// Count active staff members
    async fn staff_count(&self) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_phone(&self, phone_number: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::PhoneNumber.eq(phone_number))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(
        &self,
        phone_number: String,
        name: String,
        preferred_language: PreferredLanguage,
    ) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            phone_number: Set(phone_number),
            name: Set(name),
            preferred_language: Set(preferred_language.as_str().to_string()),
            role: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        preferred_language: Option<PreferredLanguage>,
    ) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();

        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(language) = preferred_language {
            active.preferred_language = Set(language.as_str().to_string());
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn assign_role(&self, id: Uuid, role: UserRole) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();
        active.role = Set(Some(role.as_str().to_string()));
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<User>, u64)> {
        let paginator = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    async fn list_staff(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::Role.is_in(STAFF_ROLES.iter().copied()))
            .order_by_asc(user::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn staff_count(&self) -> AppResult<u64> {
        UserEntity::find()
            .filter(user::Column::Role.is_in(STAFF_ROLES.iter().copied()))
            .filter(user::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
