//! Utility functions module.
//!
//! This module contains helpers for presenting API values, such as
//! formatting the timestamps the API returns.

pub mod dates;
