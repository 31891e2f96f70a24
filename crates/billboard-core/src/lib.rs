//! Core types and view logic for the Billboard campaign dashboard.
//!
//! This crate is deliberately free of terminal, HTTP and database
//! dependencies. The campaign tree is plain data; every derived view is a pure
//! function of that tree and an explicit selection value.

pub mod campaign;
pub mod cascade;
pub mod dataset;
pub mod display;
pub mod draft;
pub mod error;
pub mod hierarchy;
pub mod stats;

pub use error::{Error, Result};
