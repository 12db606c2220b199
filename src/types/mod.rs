//! Shared request/response types.

mod pagination;

pub use pagination::{Paginated, PaginationMeta, PaginationParams};
