use super::fetch::{FetchCell, FetchContext, FetchState, StateSubscription};
use crate::api::DetailPayload;
use crate::messages::DETAIL_FETCH_FAILED;
use log::*;
use std::sync::Arc;

/// Drives the character detail screen for one character at a time.
///
/// The payload is kept until `clear` is called, so the view must clear the
/// controller whenever it navigates away.
///
pub struct DetailFetchController {
    cell: FetchCell<DetailPayload>,
    context: FetchContext,
}

impl DetailFetchController {
    pub fn new(context: FetchContext) -> Self {
        DetailFetchController {
            cell: FetchCell::new("character details"),
            context,
        }
    }

    pub fn state(&self) -> FetchState<DetailPayload> {
        self.cell.state()
    }

    pub fn subscribe(&self) -> StateSubscription<DetailPayload> {
        self.cell.subscribe()
    }

    /// Start fetching the character with the given ID if the state is
    /// Initial, otherwise do nothing. Returns whether a fetch was started.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    ///
    pub fn trigger_fetch(&self, id: &str) -> bool {
        let source = Arc::clone(&self.context.source);
        let character_id = id.to_owned();
        let started = self
            .cell
            .start(&self.context, DETAIL_FETCH_FAILED, move || async move {
                source.fetch_detail(&character_id).await
            });
        if started {
            info!("Getting details for character {}...", id);
        }
        started
    }

    /// Drop the current payload and return to Initial.
    ///
    pub fn clear(&self) {
        debug!("Clearing character details.");
        self.cell.reset();
    }

    /// Cancel any in-flight fetch. Also happens on drop.
    ///
    pub fn shutdown(&self) {
        self.cell.cancel();
    }
}

impl Drop for DetailFetchController {
    fn drop(&mut self) {
        self.cell.cancel();
    }
}
