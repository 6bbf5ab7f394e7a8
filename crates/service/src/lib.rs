//! Business layer for the tutorial backend suite.
//! - Three storage-agnostic mechanisms: resource stores, the session
//!   registry and query filtering/pagination.
//! - One thin service per project wiring those mechanisms to its domain
//!   entities from the `models` crate.
//! - Clear error taxonomy in `errors`; HTTP mapping happens in `server`.

pub mod auth;
pub mod blog;
pub mod errors;
pub mod gallery;
pub mod guestbook;
pub mod microblog;
pub mod pagination;
pub mod poll;
pub mod product;
pub mod query;
pub mod runtime;
pub mod session;
pub mod shortener;
pub mod storage;
pub mod todo;
pub mod weather;
