//! Endpoint operations against a Dradis server
//!
//! Every operation issues exactly one request through the client's
//! [`Transport`], accepts only the single success status for its method
//! (201 for POST, 200 otherwise), decodes the body and re-wires
//! back-references. Local graph mutations (appending created evidence,
//! dropping deleted notes, ...) happen only after that success check, so a
//! failed call never leaves a half-updated graph.
//!
//! None of this is synchronised: a [`Node`](crate::entities::Node) and its
//! lists belong to the caller and must not be mutated from two threads at
//! once.

use serde::{de::DeserializeOwned, Serialize};

use crate::core::config::Config;
use crate::core::error::{DradisError, Result};
use crate::core::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

mod attachments;
mod evidence;
mod issuelib;
mod issues;
mod nodes;
mod notes;
mod projects;
mod teams;

pub use evidence::EvidenceUpdate;
pub use nodes::NodeParams;
pub use notes::NoteUpdate;
pub use projects::ProjectParams;
pub use teams::TeamParams;

/// Client for the Dradis Pro REST API
pub struct DradisClient<T: Transport = HttpTransport> {
    transport: T,
}

impl DradisClient<HttpTransport> {
    /// Connect using validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> DradisClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Send a request and insist on the method's success status
    fn execute(&self, operation: &'static str, request: ApiRequest) -> Result<ApiResponse> {
        let expected = request.method.expected_status();
        let response = self.transport.send(&request)?;
        if response.status != expected {
            tracing::warn!(
                operation,
                status = response.status,
                expected,
                path = %request.path,
                "unexpected response status"
            );
            return Err(DradisError::UnexpectedStatus {
                operation,
                expected,
                status: response.status,
            });
        }
        Ok(response)
    }

    /// [`execute`](Self::execute) and decode the body
    fn fetch<D: DeserializeOwned>(
        &self,
        operation: &'static str,
        entity: &'static str,
        request: ApiRequest,
    ) -> Result<D> {
        let response = self.execute(operation, request)?;
        decode(entity, &response.body)
    }
}

fn decode<D: DeserializeOwned>(entity: &'static str, body: &str) -> Result<D> {
    serde_json::from_str(body).map_err(|source| DradisError::Decode { entity, source })
}

/// Wrap a payload as `{ "<key>": payload }`, the shape every write endpoint expects
fn envelope<S: Serialize>(key: &str, payload: &S) -> Result<serde_json::Value> {
    let mut map = serde_json::Map::new();
    map.insert(
        key.to_string(),
        serde_json::to_value(payload).map_err(DradisError::Encode)?,
    );
    Ok(serde_json::Value::Object(map))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use crate::core::transport::{ApiRequest, ApiResponse, Transport, TransportError};

    /// Replays canned responses and records every request it sees
    #[derive(Default)]
    pub struct ScriptedTransport {
        responses: RefCell<VecDeque<Result<ApiResponse, TransportError>>>,
        requests: RefCell<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, status: u16, body: &str) -> Self {
            self.responses
                .borrow_mut()
                .push_back(Ok(ApiResponse::new(status, body)));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.responses
                .borrow_mut()
                .push_back(Err(TransportError::Request(message.to_string())));
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.borrow().clone()
        }

        pub fn last_request(&self) -> ApiRequest {
            self.requests
                .borrow()
                .last()
                .cloned()
                .expect("no request was sent")
        }
    }

    impl Transport for ScriptedTransport {
        fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
            self.requests.borrow_mut().push(request.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Request("no scripted response".to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedTransport;
    use super::*;
    use crate::core::transport::Method;

    #[test]
    fn test_execute_accepts_only_expected_status() {
        let transport = ScriptedTransport::new().reply(200, "{}").reply(201, "{}");
        let client = DradisClient::with_transport(&transport);

        assert!(client.execute("get", ApiRequest::get("x")).is_ok());
        let err = client.execute("get", ApiRequest::get("x")).unwrap_err();
        assert!(matches!(
            err,
            DradisError::UnexpectedStatus {
                expected: 200,
                status: 201,
                ..
            }
        ));
    }

    #[test]
    fn test_transport_failure_is_propagated() {
        let transport = ScriptedTransport::new().fail("connection refused");
        let client = DradisClient::with_transport(&transport);

        let err = client.execute("get", ApiRequest::get("x")).unwrap_err();
        assert!(matches!(err, DradisError::Transport(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_fetch_reports_decode_failure() {
        let transport = ScriptedTransport::new().reply(200, "<html>");
        let client = DradisClient::with_transport(&transport);

        let err = client
            .fetch::<Vec<u64>>("list", "thing", ApiRequest::get("x"))
            .unwrap_err();
        assert!(matches!(err, DradisError::Decode { entity: "thing", .. }));
        assert_eq!(transport.last_request().method, Method::Get);
    }

    #[test]
    fn test_envelope() {
        let value = envelope("node", &serde_json::json!({"label": "a"})).unwrap();
        assert_eq!(value, serde_json::json!({"node": {"label": "a"}}));
    }
}
