//! Person (farmer/vendor) repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::person::{self, ActiveModel, Entity as PersonEntity};
use crate::domain::{Person, PersonType};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Person repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Find person by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Person>>;

    /// Find person by mobile number
    async fn find_by_mobile(&self, mobile_number: &str) -> AppResult<Option<Person>>;

    /// Create a new person
    async fn create(
        &self,
        person_type: PersonType,
        name: String,
        mobile_number: String,
        address: String,
    ) -> AppResult<Person>;

    /// Update person fields
    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        mobile_number: Option<String>,
        address: Option<String>,
        person_type: Option<PersonType>,
    ) -> AppResult<Person>;

    /// List persons with optional name search and type filter
    async fn list<'a>(
        &self,
        search: Option<&'a str>,
        person_type: Option<PersonType>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Person>, u64)>;
}

/// Concrete implementation of PersonRepository
pub struct PersonStore {
    db: DatabaseConnection,
}

impl PersonStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PersonRepository for PersonStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Person>> {
        let result = PersonEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Person::from))
    }

    async fn find_by_mobile(&self, mobile_number: &str) -> AppResult<Option<Person>> {
        let result = PersonEntity::find()
            .filter(person::Column::MobileNumber.eq(mobile_number))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Person::from))
    }

    async fn create(
        &self,
        person_type: PersonType,
        name: String,
        mobile_number: String,
        address: String,
    ) -> AppResult<Person> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            person_type: Set(person_type.as_str().to_string()),
            name: Set(name),
            mobile_number: Set(mobile_number),
            address: Set(address),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Person::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        mobile_number: Option<String>,
        address: Option<String>,
        person_type: Option<PersonType>,
    ) -> AppResult<Person> {
        let existing = PersonEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();

        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(mobile) = mobile_number {
            active.mobile_number = Set(mobile);
        }
        if let Some(address) = address {
            active.address = Set(address);
        }
        if let Some(person_type) = person_type {
            active.person_type = Set(person_type.as_str().to_string());
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Person::from(model))
    }

    async fn list<'a>(
        &self,
        search: Option<&'a str>,
        person_type: Option<PersonType>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Person>, u64)> {
        let mut query = PersonEntity::find().order_by_asc(person::Column::Name);

        if let Some(term) = search {
            // Matches either the name or the mobile number
            query = query.filter(
                Condition::any()
                    .add(person::Column::Name.contains(term))
                    .add(person::Column::MobileNumber.contains(term)),
            );
        }
        if let Some(person_type) = person_type {
            query = query.filter(person::Column::PersonType.eq(person_type.as_str()));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Person::from).collect(), total))
    }
}
