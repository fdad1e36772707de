//! Resource binding and the CRUD orchestration service

pub mod crud_service;
pub mod traits;

pub use crud_service::CrudService;
pub use traits::{CrudResource, MergeIntoActiveModel, RelationScope};
