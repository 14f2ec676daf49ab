//! Foundation types for the shelf book catalog.
//!
//! This crate provides the validated record type and its building blocks.
//! Every other shelf crate depends on `shelf-types`.
//!
//! # Key Types
//!
//! - [`Book`] -- A validated catalog entry with identity and content equality
//! - [`BookRecord`] -- The flat, loosely typed mapping a book is persisted as
//! - [`BookId`] -- Positive integer identifier assigned by the catalog
//! - [`BookStatus`] -- Closed set of lending states (`available`, `borrowed`)
//! - [`ValidationError`] -- Field-level validation failures

pub mod book;
pub mod error;
pub mod id;
pub mod status;

pub use book::{current_year, Book, BookRecord};
pub use error::ValidationError;
pub use id::BookId;
pub use status::BookStatus;
