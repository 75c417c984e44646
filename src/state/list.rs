use super::fetch::{FetchCell, FetchContext, FetchState, StateSubscription};
use crate::api::ListPayload;
use crate::messages::LIST_FETCH_FAILED;
use log::*;
use std::sync::Arc;

/// Drives the character list screen: Initial -> Loading -> Success | Error.
///
pub struct ListFetchController {
    cell: FetchCell<ListPayload>,
    context: FetchContext,
}

impl ListFetchController {
    pub fn new(context: FetchContext) -> Self {
        ListFetchController {
            cell: FetchCell::new("characters list"),
            context,
        }
    }

    pub fn state(&self) -> FetchState<ListPayload> {
        self.cell.state()
    }

    pub fn subscribe(&self) -> StateSubscription<ListPayload> {
        self.cell.subscribe()
    }

    /// Start fetching the list if the state is Initial, otherwise do nothing.
    /// Returns whether a fetch was started.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    ///
    pub fn trigger_fetch(&self) -> bool {
        let source = Arc::clone(&self.context.source);
        let started = self
            .cell
            .start(&self.context, LIST_FETCH_FAILED, move || async move {
                source.fetch_list().await
            });
        if started {
            info!("Getting characters list...");
        }
        started
    }

    /// Return to Initial so the list can be fetched again.
    ///
    pub fn reload(&self) {
        debug!("Reloading characters list.");
        self.cell.reset();
    }

    /// Cancel any in-flight fetch. Also happens on drop.
    ///
    pub fn shutdown(&self) {
        self.cell.cancel();
    }
}

impl Drop for ListFetchController {
    fn drop(&mut self) {
        self.cell.cancel();
    }
}
