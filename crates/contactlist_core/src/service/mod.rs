//! Use-case services over the repositories.
//!
//! # Responsibility
//! - Keep callers decoupled from storage details.
//! - Log write outcomes in `event=... module=service` form.

pub mod contact_service;
pub mod user_service;
