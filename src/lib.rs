//! Character browser for the Rick and Morty GraphQL API.
//!
//! The screens are driven by fetch controllers (`state`) that move between
//! Initial, Loading, Success and Error while talking to a data source
//! (`api`), a connectivity probe (`connectivity`) and a message catalog
//! (`messages`). `view` renders controller states on a terminal.

pub mod api;
pub mod app;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod logger;
pub mod messages;
pub mod state;
pub mod utils;
pub mod view;
