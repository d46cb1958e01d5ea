//! Shared test support: an in-memory transport that records every request
//! and answers from a scripted queue.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use graph_todo::{Payload, PendingRequest, SubmitFuture, Transport};
use serde_json::{json, Value};

/// Transport double for request-shape assertions.
///
/// Every submitted request is recorded. Responses come from a queue of
/// `(status, body)` pairs; when the queue is empty, requests are answered
/// with 200 `{}`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    requests: Mutex<Vec<PendingRequest>>,
    responses: Mutex<VecDeque<(u16, Value)>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a response for an upcoming request.
    #[allow(dead_code)]
    pub fn enqueue(&self, code: u16, body: Value) {
        self.responses.lock().unwrap().push_back((code, body));
    }

    /// Returns everything submitted so far.
    pub fn requests(&self) -> Vec<PendingRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the number of requests submitted so far.
    #[allow(dead_code)]
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn submit(&self, request: PendingRequest) -> SubmitFuture<'_> {
        self.requests.lock().unwrap().push(request);
        let (code, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((200, json!({})));
        Box::pin(async move { Ok(Payload::new(code, HashMap::new(), body)) })
    }
}
