use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::debug;

use crate::protocol::Breaks;
use crate::service::{BreaksService, ServiceError};

/// Completed fetch, tagged with the URL it answers so stale responses can
/// be told apart from the current request.
#[derive(Debug)]
pub struct FetchResult {
    pub url: String,
    pub outcome: Result<Breaks, ServiceError>,
}

/// What `submit` did with a URL.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Resolved synchronously from the memo; no network call was made.
    Cached(Breaks),
    /// A request is now in flight; the result arrives on the results channel.
    Pending,
}

/// What `accept` decided about an incoming result.
#[derive(Debug, PartialEq)]
pub enum Accepted {
    Resolved(Result<Breaks, ServiceError>),
    /// The response belongs to an aborted or outdated request. Never shown
    /// to the user.
    Superseded,
}

/// Single-in-flight, memoizing request pipeline for class breaks.
///
/// At most one request is in flight at a time; submitting a new URL aborts
/// the previous call before anything else, so the newest request is the only
/// one whose result may reach the caller. Resolved breaks are memoized by
/// exact URL string for the life of the process (mask and bounds changes
/// alter the URL, so entries never go stale within a session).
pub struct BreaksPipeline {
    service: Arc<dyn BreaksService>,
    results: mpsc::UnboundedSender<FetchResult>,
    memo: HashMap<String, Breaks>,
    in_flight: Option<InFlight>,
}

struct InFlight {
    url: String,
    abort: AbortHandle,
}

impl BreaksPipeline {
    pub fn new(
        service: Arc<dyn BreaksService>,
        results: mpsc::UnboundedSender<FetchResult>,
    ) -> Self {
        Self {
            service,
            results,
            memo: HashMap::new(),
            in_flight: None,
        }
    }

    /// Submit a breaks URL, aborting whatever was in flight first.
    ///
    /// The abort happens even on a memo hit: the outdated call's answer is
    /// unwanted no matter how the new URL resolves.
    pub fn submit(&mut self, url: &str) -> Submission {
        if let Some(prev) = self.in_flight.take() {
            debug!(url = %prev.url, "aborting superseded breaks request");
            prev.abort.abort();
        }

        if let Some(breaks) = self.memo.get(url) {
            debug!(%url, "breaks memo hit");
            return Submission::Cached(breaks.clone());
        }

        let service = Arc::clone(&self.service);
        let results = self.results.clone();
        let request_url = url.to_string();
        let task = tokio::spawn(async move {
            let outcome = service.fetch_breaks(&request_url).await;
            let _ = results.send(FetchResult {
                url: request_url,
                outcome,
            });
        });
        self.in_flight = Some(InFlight {
            url: url.to_string(),
            abort: task.abort_handle(),
        });
        Submission::Pending
    }

    /// Reconcile an incoming result against the current in-flight request.
    pub fn accept(&mut self, result: FetchResult) -> Accepted {
        match &self.in_flight {
            Some(current) if current.url == result.url => {}
            _ => return Accepted::Superseded,
        }
        self.in_flight = None;
        if let Ok(breaks) = &result.outcome {
            self.memo.insert(result.url, breaks.clone());
        }
        Accepted::Resolved(result.outcome)
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn cached(&self, url: &str) -> Option<&Breaks> {
        self.memo.get(url)
    }
}
