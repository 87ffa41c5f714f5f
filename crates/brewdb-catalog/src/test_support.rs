//! Scriptable in-memory transport shared by the unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use brewdb_core::{BreweryTransport, RawBrewery};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Call {
    Page { page: u32, per_page: u32 },
    Autocomplete(String),
    ById(String),
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub(crate) struct FakeError(String);

#[derive(Default)]
struct Script {
    pages: HashMap<u32, Vec<RawBrewery>>,
    suggestions: HashMap<String, Vec<RawBrewery>>,
    records: HashMap<String, RawBrewery>,
    delays: HashMap<Call, Duration>,
    failing: bool,
    calls: Vec<Call>,
}

/// Transport double that records every call and answers from a script.
#[derive(Default)]
pub(crate) struct FakeTransport {
    script: Mutex<Script>,
}

impl FakeTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn with_page(&self, page: u32, records: Vec<RawBrewery>) {
        self.script.lock().unwrap().pages.insert(page, records);
    }

    pub(crate) fn with_suggestions(&self, query: &str, records: Vec<RawBrewery>) {
        self.script
            .lock()
            .unwrap()
            .suggestions
            .insert(query.to_string(), records);
    }

    pub(crate) fn with_record(&self, record: RawBrewery) {
        let id = record.id.clone().unwrap_or_default();
        self.script.lock().unwrap().records.insert(id, record);
    }

    pub(crate) fn with_delay(&self, call: Call, delay: Duration) {
        self.script.lock().unwrap().delays.insert(call, delay);
    }

    /// Makes every subsequent call fail.
    pub(crate) fn set_failing(&self, failing: bool) {
        self.script.lock().unwrap().failing = failing;
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }

    /// Records the call and returns its scripted delay and failure flag.
    fn begin(&self, call: Call) -> (Duration, bool) {
        let mut script = self.script.lock().unwrap();
        let delay = script.delays.get(&call).copied().unwrap_or_default();
        script.calls.push(call);
        (delay, script.failing)
    }
}

#[async_trait]
impl BreweryTransport for FakeTransport {
    type Error = FakeError;

    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<RawBrewery>, FakeError> {
        let (delay, failing) = self.begin(Call::Page { page, per_page });
        pause(delay).await;
        if failing {
            return Err(FakeError(format!("connection refused loading page {page}")));
        }
        let records = self.script.lock().unwrap().pages.get(&page).cloned();
        Ok(records.unwrap_or_default())
    }

    async fn fetch_autocomplete(&self, query: &str) -> Result<Vec<RawBrewery>, FakeError> {
        let (delay, failing) = self.begin(Call::Autocomplete(query.to_string()));
        pause(delay).await;
        if failing {
            return Err(FakeError("autocomplete unavailable".to_string()));
        }
        let records = self.script.lock().unwrap().suggestions.get(query).cloned();
        Ok(records.unwrap_or_default())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<RawBrewery, FakeError> {
        let (delay, failing) = self.begin(Call::ById(id.to_string()));
        pause(delay).await;
        if failing {
            return Err(FakeError("lookup unavailable".to_string()));
        }
        let record = self.script.lock().unwrap().records.get(id).cloned();
        record.ok_or_else(|| FakeError(format!("brewery {id} not found")))
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

pub(crate) fn raw(id: &str, name: &str) -> RawBrewery {
    RawBrewery {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        ..RawBrewery::default()
    }
}
