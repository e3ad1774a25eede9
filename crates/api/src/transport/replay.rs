use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use paygate_types::{GatewayError, RawResponse};

use super::{PreparedRequest, Transport};

/// In-memory [`Transport`] answering with queued responses.
///
/// Every received request is recorded so callers can assert on the exact
/// headers, URL and body that would have gone over the wire.
#[derive(Debug, Default)]
pub struct ReplayTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl ReplayTransport {
    pub fn new(responses: impl IntoIterator<Item = RawResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, response: RawResponse) {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner).push_back(response);
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last_request(&self) -> Option<PreparedRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

#[async_trait]
impl Transport for ReplayTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, GatewayError> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| GatewayError::transport("no replay response queued"))
    }
}
