//! The central Model Context Protocol dispatcher
//!
//! Decodes one input line, routes it to the handler for its method, and
//! normalizes the outcome into a JSON-RPC response envelope. Handler
//! failures never escape: every call yields exactly one envelope.

use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ListPromptsResult, ListResourcesResult, ListToolsResult,
    ServerCapabilities, ServerCapabilitiesPrompts, ServerCapabilitiesResources,
    ServerCapabilitiesTools,
};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::domain::{
    prompts::{build_prompts_list, handle_prompts_get},
    resources::{build_resources_list, handle_resources_read},
    tools::{build_tools_list, handle_tools_call},
};
use crate::mcp::rpc::{app_error_to_json_rpc, is_json_rpc_error, json_rpc_result};
use crate::{errors::AppError, AppState};

pub const SUPPORTED_PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Initialize,
    PromptsList,
    PromptsGet,
    ToolsList,
    ToolsCall,
    ResourcesList,
    ResourcesRead,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Initialize,
        Method::PromptsList,
        Method::PromptsGet,
        Method::ToolsList,
        Method::ToolsCall,
        Method::ResourcesList,
        Method::ResourcesRead,
    ];

    /// Exact, case-sensitive match on the wire name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::PromptsList => "prompts/list",
            Self::PromptsGet => "prompts/get",
            Self::ToolsList => "tools/list",
            Self::ToolsCall => "tools/call",
            Self::ResourcesList => "resources/list",
            Self::ResourcesRead => "resources/read",
        }
    }
}

/// Handles one raw input line and returns its response envelope. Bytes that
/// are not valid UTF-8 JSON take the parse error path like any other
/// malformed line.
pub async fn handle_request(state: &AppState, raw_line: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(raw_line) {
        Ok(payload) => handle_json_rpc_value(state, payload).await,
        Err(err) => {
            warn!(error = %err, "failed to parse JSON-RPC message");
            app_error_to_json_rpc(Value::Null, AppError::Parse)
        }
    }
}

pub async fn handle_json_rpc_value(state: &AppState, payload: Value) -> Value {
    let Value::Object(mut request) = payload else {
        warn!("JSON-RPC message is not an object");
        return app_error_to_json_rpc(Value::Null, AppError::Parse);
    };

    let id = request.remove("id").unwrap_or(Value::Null);
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let params = match request.remove("params") {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(params)) => Ok(params),
        Some(_) => Err(AppError::invalid_params("params must be an object")),
    };

    handle_json_rpc_request(state, id, &method, params).await
}

pub async fn handle_json_rpc_request(
    state: &AppState,
    id: Value,
    method: &str,
    params: Result<Map<String, Value>, AppError>,
) -> Value {
    let audit_params = match &params {
        Ok(params) => redact_audit_value(&Value::Object(params.clone())),
        Err(_) => Value::Null,
    };

    let outcome = match Method::parse(method) {
        Some(method) => match params {
            Ok(params) => dispatch(state, method, &params).await,
            Err(err) => Err(err),
        },
        None => Err(AppError::UnknownMethod(method.to_string())),
    };

    let response = match outcome {
        Ok(result) => json_rpc_result(id, result),
        Err(err) => {
            warn!(method = %method, error = %err, "request failed");
            app_error_to_json_rpc(id, err)
        }
    };

    info!(
        method = %method,
        params = %audit_params,
        outcome = if is_json_rpc_error(&response) { "failure" } else { "success" },
        "mcp action audited"
    );

    response
}

async fn dispatch(
    state: &AppState,
    method: Method,
    params: &Map<String, Value>,
) -> Result<Value, AppError> {
    match method {
        Method::Initialize => Ok(serde_json::to_value(initialize_result(state))?),
        Method::PromptsList => Ok(serde_json::to_value(ListPromptsResult {
            meta: None,
            next_cursor: None,
            prompts: build_prompts_list(),
        })?),
        Method::PromptsGet => handle_prompts_get(params),
        Method::ToolsList => Ok(serde_json::to_value(ListToolsResult {
            meta: None,
            next_cursor: None,
            tools: build_tools_list(),
        })?),
        Method::ToolsCall => handle_tools_call(state, params).await,
        Method::ResourcesList => Ok(serde_json::to_value(ListResourcesResult {
            meta: None,
            next_cursor: None,
            resources: build_resources_list(),
        })?),
        Method::ResourcesRead => handle_resources_read(params),
    }
}

pub fn initialize_result(state: &AppState) -> InitializeResult {
    InitializeResult {
        server_info: Implementation {
            name: state.server_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            title: None,
            description: None,
            icons: vec![],
            website_url: None,
        },
        capabilities: ServerCapabilities {
            prompts: Some(ServerCapabilitiesPrompts {
                list_changed: Some(false),
            }),
            tools: Some(ServerCapabilitiesTools {
                list_changed: Some(false),
            }),
            resources: Some(ServerCapabilitiesResources {
                subscribe: Some(false),
                list_changed: Some(false),
            }),
            ..Default::default()
        },
        protocol_version: SUPPORTED_PROTOCOL_VERSION.to_string(),
        instructions: None,
        meta: None,
    }
}

pub fn redact_audit_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| {
                    if is_sensitive_key(key) {
                        (key.clone(), Value::String("[REDACTED]".to_string()))
                    } else {
                        (key.clone(), redact_audit_value(item))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_audit_value).collect()),
        _ => value.clone(),
    }
}

pub fn is_sensitive_key(key: &str) -> bool {
    let normalized = key.trim().to_ascii_lowercase();
    matches!(
        normalized.as_str(),
        "authorization" | "bearer" | "api_key" | "apikey"
    ) || normalized.contains("token")
        || normalized.contains("secret")
        || normalized.contains("password")
        || normalized.contains("credential")
}
