pub mod callbacks;
pub mod component;
pub mod config;
pub mod debouncer;
pub mod pending_requests;
pub mod row_loaders;
