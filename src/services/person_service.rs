//! Farmer/vendor directory service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{PersonResponse, PersonType};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Person service trait for dependency injection.
#[async_trait]
pub trait PersonService: Send + Sync {
    /// Fetch one person
    async fn get_person(&self, id: Uuid) -> AppResult<PersonResponse>;

    /// Look up a person by exact mobile number
    async fn get_by_mobile(&self, mobile_number: &str) -> AppResult<PersonResponse>;

    /// Register a farmer or vendor; duplicate mobile numbers are rejected
    async fn create_person(
        &self,
        person_type: PersonType,
        name: String,
        mobile_number: String,
        address: String,
    ) -> AppResult<PersonResponse>;

    /// Update person fields
    async fn update_person(
        &self,
        id: Uuid,
        name: Option<String>,
        mobile_number: Option<String>,
        address: Option<String>,
        person_type: Option<PersonType>,
    ) -> AppResult<PersonResponse>;

    /// List persons with optional search (name or mobile) and type filter
    async fn list_persons(
        &self,
        search: Option<String>,
        person_type: Option<PersonType>,
        params: PaginationParams,
    ) -> AppResult<Paginated<PersonResponse>>;
}

/// Concrete implementation of PersonService using Unit of Work.
pub struct PersonDirectory<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PersonDirectory<U> {
    /// Create new person service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PersonService for PersonDirectory<U> {
    async fn get_person(&self, id: Uuid) -> AppResult<PersonResponse> {
        let person = self.uow.persons().find_by_id(id).await?.ok_or_not_found()?;
        Ok(PersonResponse::from(person))
    }

    async fn get_by_mobile(&self, mobile_number: &str) -> AppResult<PersonResponse> {
        let person = self
            .uow
            .persons()
            .find_by_mobile(mobile_number)
            .await?
            .ok_or_not_found()?;

        Ok(PersonResponse::from(person))
    }

    async fn create_person(
        &self,
        person_type: PersonType,
        name: String,
        mobile_number: String,
        address: String,
    ) -> AppResult<PersonResponse> {
        if self
            .uow
            .persons()
            .find_by_mobile(&mobile_number)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Person"));
        }

        let person = self
            .uow
            .persons()
            .create(person_type, name, mobile_number, address)
            .await?;

        Ok(PersonResponse::from(person))
    }

    async fn update_person(
        &self,
        id: Uuid,
        name: Option<String>,
        mobile_number: Option<String>,
        address: Option<String>,
        person_type: Option<PersonType>,
    ) -> AppResult<PersonResponse> {
        // A mobile number change must not collide with another person
        if let Some(ref mobile) = mobile_number {
            if let Some(existing) = self.uow.persons().find_by_mobile(mobile).await? {
                if existing.id != id {
                    return Err(AppError::conflict("Person"));
                }
            }
        }

        let person = self
            .uow
            .persons()
            .update(id, name, mobile_number, address, person_type)
            .await?;

        Ok(PersonResponse::from(person))
    }

    async fn list_persons(
        &self,
        search: Option<String>,
        person_type: Option<PersonType>,
        params: PaginationParams,
    ) -> AppResult<Paginated<PersonResponse>> {
        let (persons, total) = self
            .uow
            .persons()
            .list(search.as_deref(), person_type, &params)
            .await?;

        let data = persons.into_iter().map(PersonResponse::from).collect();
        Ok(Paginated::new(data, params.page, params.limit(), total))
    }
}
