//! In-memory collaborators for controller tests.

use super::fetch::{FetchContext, FetchState, StateSubscription};
use crate::api::{ApiError, CharacterDataSource, DetailPayload, ListPayload};
use crate::connectivity::StaticProbe;
use crate::messages::MessageProvider;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How a fake request resolves.
///
#[derive(Clone)]
pub enum Outcome<T> {
    Ok(T),
    Fail,
    Hang,
    Panic,
}

impl<T: Clone> Outcome<T> {
    async fn resolve(&self) -> Result<T, ApiError> {
        match self {
            Outcome::Ok(payload) => Ok(payload.clone()),
            Outcome::Fail => Err(ApiError::Status {
                status: 500,
                body: "Network error".to_string(),
            }),
            Outcome::Hang => std::future::pending().await,
            Outcome::Panic => panic!("Unexpected exception"),
        }
    }
}

pub struct FakeSource {
    list: Outcome<ListPayload>,
    detail: Outcome<DetailPayload>,
    list_calls: AtomicUsize,
    detail_calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn list(outcome: Outcome<ListPayload>) -> Arc<Self> {
        Arc::new(FakeSource {
            list: outcome,
            detail: Outcome::Fail,
            list_calls: AtomicUsize::new(0),
            detail_calls: Mutex::new(vec![]),
        })
    }

    pub fn detail(outcome: Outcome<DetailPayload>) -> Arc<Self> {
        Arc::new(FakeSource {
            list: Outcome::Fail,
            detail: outcome,
            list_calls: AtomicUsize::new(0),
            detail_calls: Mutex::new(vec![]),
        })
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }

    /// Wait until the list has been requested `count` times.
    ///
    pub async fn wait_for_list_calls(&self, count: usize) {
        settle(|| self.list_calls() >= count).await;
    }

    /// Wait until details have been requested `count` times.
    ///
    pub async fn wait_for_detail_calls(&self, count: usize) {
        settle(|| self.detail_calls().len() >= count).await;
    }
}

#[async_trait]
impl CharacterDataSource for FakeSource {
    async fn fetch_list(&self) -> Result<ListPayload, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list.resolve().await
    }

    async fn fetch_detail(&self, id: &str) -> Result<DetailPayload, ApiError> {
        self.detail_calls.lock().unwrap().push(id.to_owned());
        self.detail.resolve().await
    }
}

async fn settle(done: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !done() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("data source was not called in time");
}

/// Echoes the key so tests can tell which message was chosen.
///
pub struct KeyMessages;

impl MessageProvider for KeyMessages {
    fn localize(&self, key: &str) -> String {
        format!("<{}>", key)
    }
}

pub fn context(source: Arc<FakeSource>, online: bool) -> FetchContext {
    FetchContext::new(source, Arc::new(StaticProbe(online)), Arc::new(KeyMessages))
        .with_delay(Duration::ZERO)
}

/// Next transition, failing the test if none arrives in time.
///
pub async fn next<T: Clone>(subscription: &mut StateSubscription<T>) -> FetchState<T> {
    tokio::time::timeout(Duration::from_secs(5), subscription.next())
        .await
        .expect("timed out waiting for a state transition")
        .expect("state stream closed")
}

/// Assert that no transition arrives for a short while.
///
pub async fn assert_quiet<T: Clone + std::fmt::Debug>(subscription: &mut StateSubscription<T>) {
    if let Ok(state) = tokio::time::timeout(Duration::from_millis(50), subscription.next()).await {
        panic!("unexpected transition: {:?}", state);
    }
}
