//! Wiremock helpers that stand in for a JSON-RPC node.

use std::time::Duration;

use alloy_primitives::{Bytes, hex};
use alloy_sol_types::SolValue;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Answers every JSON-RPC request with a fixed `result`, echoing the request id.
pub struct RpcResult {
    result: Value,
    delay: Option<Duration>,
}

impl RpcResult {
    pub const fn new(result: Value) -> Self {
        Self { result, delay: None }
    }

    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl Respond for RpcResult {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let template = ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": body["id"].clone(),
            "result": self.result,
        }));
        match self.delay {
            Some(delay) => template.set_delay(delay),
            None => template,
        }
    }
}

/// Answers every JSON-RPC request with an error object.
pub struct RpcFailure;

impl Respond for RpcFailure {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": body["id"].clone(),
            "error": {"code": -32000, "message": "execution reverted"},
        }))
    }
}

/// ABI-encodes `value` as the return data of `getData(bytes32) returns (bytes)`.
pub fn get_data_return(value: &[u8]) -> Value {
    let encoded = (Bytes::copy_from_slice(value),).abi_encode_params();
    Value::String(hex::encode_prefixed(encoded))
}

/// Mounts an `eth_call` mock returning `value` from `getData`, expecting `calls` hits.
pub async fn mount_get_data(server: &MockServer, value: &[u8], calls: u64) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "eth_call"})))
        .respond_with(RpcResult::new(get_data_return(value)))
        .expect(calls)
        .mount(server)
        .await;
}

/// Builds an LSP2 VerifiableURI value.
pub fn verifiable_uri(hash: &[u8], url: &str) -> Vec<u8> {
    let mut raw = vec![0x00, 0x00, 0x6f, 0x35, 0x7c, 0x6a];
    raw.extend_from_slice(&u16::try_from(hash.len()).unwrap_or(u16::MAX).to_be_bytes());
    raw.extend_from_slice(hash);
    raw.extend_from_slice(url.as_bytes());
    raw
}
