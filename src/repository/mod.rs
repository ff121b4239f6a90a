pub mod repository_error;
pub mod document_store;
pub mod memory_store;
pub mod crud_repo;
