//! Domain values handled by the repositories.
//!
//! # Responsibility
//! - Define `Contact`, `User` and the search criteria types.
//! - Stay storage-agnostic: no SQL lives here.

pub mod contact;
pub mod search;
pub mod user;
