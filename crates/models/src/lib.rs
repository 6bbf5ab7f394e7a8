//! Domain entities for the tutorial backend suite.
//! - One module per project, plain serde structs only.
//! - Validation helpers live next to the entity they guard.
//! - No persistence concerns here; stores live in the `service` crate.

pub mod auth;
pub mod blog;
pub mod errors;
pub mod guestbook;
pub mod microblog;
pub mod poll;
pub mod product;
pub mod shortener;
pub mod todo;
pub mod weather;
