//! JSON-RPC response envelopes
//!
//! Every response is built here so that it carries exactly one of `result`
//! or `error`, and echoes the request id verbatim.

use serde_json::{json, Value};

use crate::errors::AppError;

pub const JSONRPC_VERSION: &str = "2.0";

pub fn is_json_rpc_error(value: &Value) -> bool {
    value.get("error").is_some()
}

pub fn app_error_to_json_rpc(id: Value, err: AppError) -> Value {
    // Parse failures never know the request id.
    let id = match err {
        AppError::Parse => Value::Null,
        _ => id,
    };

    json_rpc_error(id, err.code(), &err.to_string())
}

pub fn json_rpc_error(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "error": {
            "code": code,
            "message": message
        }
    })
}

pub fn json_rpc_result(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "result": result
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn result_envelope_has_no_error_member() {
        let response = json_rpc_result(json!("req-1"), json!({ "ok": true }));

        assert_eq!(response["id"], "req-1");
        assert_eq!(response["jsonrpc"], "2.0");
        assert_eq!(response["result"]["ok"], true);
        assert!(!is_json_rpc_error(&response));
    }

    #[test]
    fn error_envelope_has_no_result_member() {
        let response =
            app_error_to_json_rpc(json!(7), AppError::UnknownTool("shred".to_string()));

        assert_eq!(response["id"], 7);
        assert_eq!(response["error"]["code"], -1);
        assert_eq!(response["error"]["message"], "Unknown tool: shred");
        assert!(response.get("result").is_none());
        assert!(is_json_rpc_error(&response));
    }

    #[test]
    fn parse_error_drops_id() {
        let response = app_error_to_json_rpc(json!(3), AppError::Parse);

        assert!(response["id"].is_null());
        assert_eq!(response["error"]["code"], -32700);
        assert_eq!(response["error"]["message"], "Parse error");
    }

    #[test]
    fn structured_ids_are_echoed_verbatim() {
        let id = json!({ "session": "abc", "seq": 1.5 });
        let response = json_rpc_result(id.clone(), json!({}));
        assert_eq!(response["id"], id);
    }
}
