//! # Mock Transport
//!
//! URL-prefix routed canned responses for tests. The longest matching prefix
//! wins; unmatched URLs fail with a connection error.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::domain::{HttpMethod, HttpResponse, TransportError};
use crate::ports::HttpTransport;

/// What a route answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Completed exchange.
    Respond {
        /// Status code
        status: u16,
        /// Body
        body: String,
    },
    /// Transport failure.
    Fail(TransportError),
}

impl MockReply {
    /// Completed exchange.
    pub fn respond(status: u16, body: impl Into<String>) -> Self {
        MockReply::Respond {
            status,
            body: body.into(),
        }
    }

    /// 200 with a JSON body.
    pub fn json(value: serde_json::Value) -> Self {
        MockReply::Respond {
            status: 200,
            body: value.to_string(),
        }
    }
}

type ReplyFn = Arc<dyn Fn(&str) -> MockReply + Send + Sync>;

enum Responder {
    Fixed(MockReply),
    /// Pops in order; the last reply repeats.
    Sequence(VecDeque<MockReply>),
    Func(ReplyFn),
}

struct MockRoute {
    method: Option<HttpMethod>,
    prefix: String,
    responder: Responder,
}

/// A request seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Method.
    pub method: HttpMethod,
    /// Full URL.
    pub url: String,
    /// POST body.
    pub body: Option<String>,
}

/// In-memory `HttpTransport`.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<MockRoute>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    /// Empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&self, method: Option<HttpMethod>, prefix: impl Into<String>, responder: Responder) {
        let prefix = prefix.into();
        let mut routes = self.routes.lock();
        // Re-registering a route replaces it
        routes.retain(|r| !(r.prefix == prefix && r.method == method));
        routes.push(MockRoute {
            method,
            prefix,
            responder,
        });
    }

    /// Answer any method on `prefix` with `status`/`body`.
    pub fn on(&self, prefix: impl Into<String>, status: u16, body: impl Into<String>) {
        self.add(None, prefix, Responder::Fixed(MockReply::respond(status, body)));
    }

    /// Answer POSTs on `prefix`.
    pub fn on_post(&self, prefix: impl Into<String>, status: u16, body: impl Into<String>) {
        self.add(
            Some(HttpMethod::Post),
            prefix,
            Responder::Fixed(MockReply::respond(status, body)),
        );
    }

    /// Answer any method on `prefix` with `reply`.
    pub fn on_reply(&self, prefix: impl Into<String>, reply: MockReply) {
        self.add(None, prefix, Responder::Fixed(reply));
    }

    /// Fail every request on `prefix`.
    pub fn on_error(&self, prefix: impl Into<String>, err: TransportError) {
        self.add(None, prefix, Responder::Fixed(MockReply::Fail(err)));
    }

    /// Answer with `replies` in order, repeating the last one.
    pub fn on_sequence(&self, prefix: impl Into<String>, replies: Vec<MockReply>) {
        self.add(None, prefix, Responder::Sequence(replies.into()));
    }

    /// Compute the reply from the full URL.
    pub fn on_fn(
        &self,
        prefix: impl Into<String>,
        f: impl Fn(&str) -> MockReply + Send + Sync + 'static,
    ) {
        self.add(None, prefix, Responder::Func(Arc::new(f)));
    }

    /// Every request seen so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of requests whose URL contains `fragment`.
    pub fn call_count(&self, fragment: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.url.contains(fragment))
            .count()
    }

    fn dispatch(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        self.calls.lock().push(RecordedCall {
            method,
            url: url.to_string(),
            body: body.map(str::to_string),
        });

        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled);
        }

        let reply = {
            let mut routes = self.routes.lock();
            let route = routes
                .iter_mut()
                .filter(|r| url.starts_with(&r.prefix))
                .filter(|r| r.method.map_or(true, |m| m == method))
                .max_by_key(|r| (r.prefix.len(), r.method.is_some()));

            match route {
                Some(route) => match &mut route.responder {
                    Responder::Fixed(reply) => reply.clone(),
                    Responder::Sequence(queue) => {
                        if queue.len() > 1 {
                            queue.pop_front().unwrap_or_else(|| no_route(url))
                        } else {
                            queue.front().cloned().unwrap_or_else(|| no_route(url))
                        }
                    }
                    Responder::Func(f) => f(url),
                },
                None => no_route(url),
            }
        };

        match reply {
            MockReply::Respond { status, body } => Ok(HttpResponse::new(url, status, body)),
            MockReply::Fail(err) => Err(err),
        }
    }
}

fn no_route(url: &str) -> MockReply {
    MockReply::Fail(TransportError::Connect {
        url: url.to_string(),
        reason: "no mock route".to_string(),
    })
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(
        &self,
        url: &str,
        _timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        self.dispatch(HttpMethod::Get, url, None, cancel)
    }

    async fn post_json(
        &self,
        url: &str,
        body: &str,
        _timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        self.dispatch(HttpMethod::Post, url, Some(body), cancel)
    }
}
