//! Domain models with validation at construction
//!
//! Form and CLI input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod collection;
pub mod todo;
pub mod document;
pub mod pagination;

pub use validation::ValidationError;
pub use collection::Collection;
pub use todo::{Todo, TodoText};
pub use document::Document;
pub use pagination::{Pagination, Paginated, PaginationParams};
