//! Core types, errors, and utilities for the marketdash API.
//!
//! This crate provides foundational types used across the marketdash
//! workspace:
//! - Error handling with [`AppError`]
//! - Pagination types and helpers
//! - Password hashing with bcrypt
//! - [`Patch`] for partial-update request bodies

pub mod errors;
pub mod pagination;
pub mod password;
pub mod patch;

pub use errors::{AppError, INTERNAL_ERROR_MESSAGE};
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{PasswordError, PasswordHasher};
pub use patch::Patch;
