//! Utility functions shared across layers.
//!
//! - [`clock`] - Epoch timestamps for audit fields
//! - [`db_error`] - sqlx error classification
//! - [`target_url`] - Redirect target validation

pub mod clock;
pub mod db_error;
pub mod target_url;
