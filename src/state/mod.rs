//! Screen state controllers.
//!
//! This module contains the fetch state machine shared by every screen and
//! the two controllers built on it:
//! - `ListFetchController` for the character list
//! - `DetailFetchController` for a single character

mod detail;
mod fetch;
mod list;
#[cfg(test)]
mod testing;

pub use detail::DetailFetchController;
pub use fetch::{FetchContext, FetchState, StateSubscription, DEFAULT_FETCH_DELAY};
pub use list::ListFetchController;
