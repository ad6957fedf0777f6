//! Research output question field configuration
//!
//! Engine for enabling standard fields, switching value modes, browsing
//! external catalogs of repositories and metadata standards, and managing
//! author-created additional fields.

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod state;
