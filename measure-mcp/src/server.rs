//! MCP request handling
//!
//! Line-delimited JSON-RPC 2.0. Every tool call is translated into a
//! function call against the plugin registry; engine failures come back
//! as tool results flagged `isError` so the client can fix its input.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use measure_core::{MeasureError, Value};
use measure_plugin::{EvalContext, PluginRegistry};
use measure_units::Category;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};

pub const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "measure";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// JSON-RPC error codes
const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Deserialize)]
pub struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        McpError { code: INVALID_PARAMS, message: message.into(), data: None }
    }
}

pub struct Server {
    registry: Arc<PluginRegistry>,
    decimals: usize,
}

impl Server {
    pub fn new(registry: PluginRegistry, decimals: usize) -> Self {
        Self { registry: Arc::new(registry), decimals }
    }

    fn context(&self) -> EvalContext {
        EvalContext::new(self.registry.clone()).with_decimals(self.decimals)
    }

    /// Read requests line by line until EOF, writing one response per request
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> io::Result<()> {
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!(bytes = line.len(), "received");

            if let Some(response) = self.handle_line(line) {
                let response_json = serde_json::to_string(&response)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                writeln!(writer, "{}", response_json)?;
                writer.flush()?;
            }
        }

        info!("client disconnected (EOF)");
        Ok(())
    }

    /// Handle one raw line; `None` for notifications
    pub fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let request: McpRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                return Some(McpResponse {
                    jsonrpc: "2.0".to_string(),
                    id: None,
                    result: None,
                    error: Some(McpError {
                        code: PARSE_ERROR,
                        message: format!("Parse error: {}", e),
                        data: None,
                    }),
                });
            }
        };

        debug!(method = %request.method, "processing");
        let response = self.handle_request(&request);

        if request.id.is_none() {
            debug!(method = %request.method, "notification processed (no response)");
            return None;
        }
        Some(response)
    }

    fn handle_request(&self, request: &McpRequest) -> McpResponse {
        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => Ok(tools_list()),
            "tools/call" => self.handle_tool_call(&request.params),

            _ => Err(McpError {
                code: METHOD_NOT_FOUND,
                message: format!("Method not found: {}", request.method),
                data: None,
            }),
        };

        match result {
            Ok(r) => McpResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id.clone(),
                result: Some(r),
                error: None,
            },
            Err(e) => {
                error!(method = %request.method, code = e.code, message = %e.message, "request failed");
                McpResponse {
                    jsonrpc: "2.0".to_string(),
                    id: request.id.clone(),
                    result: None,
                    error: Some(e),
                }
            }
        }
    }

    fn handle_tool_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params.as_ref()
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        let name = params.get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or(json!({}));

        match name {
            "convert" => self.tool_convert(&args),
            "list_units" => self.tool_list_units(&args),
            "list_categories" => self.tool_list_categories(),
            "help" => self.tool_help(&args),
            "list_functions" => self.tool_list_functions(&args),
            _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
        }
    }

    fn call(&self, function: &str, args: &[Value]) -> Value {
        self.registry.call_function(function, args, &self.context())
    }

    fn tool_convert(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let value = args.get("value")
            .ok_or_else(|| McpError::invalid_params("Missing value argument"))?;
        let category = required_str(args, "category")?;
        let from = required_str(args, "from_unit")?;
        let to = required_str(args, "to_unit")?;

        let mut call_args = vec![
            json_to_value(value),
            Value::from(category),
            Value::from(from),
            Value::from(to),
        ];

        let converted = self.call("convert", &call_args);
        if let Value::Error(e) = &converted {
            return Ok(tool_error(e));
        }

        if let Some(decimals) = args.get("decimals") {
            call_args.push(json_to_value(decimals));
        }
        let display = self.call("convert_display", &call_args);
        let display = match display {
            Value::Text(text) => text,
            Value::Error(e) => return Ok(tool_error(&e)),
            other => other.to_string(),
        };

        // Report the declared names, not the caller's spelling
        let (category, from, to) = match category.parse::<Category>() {
            Ok(kind) => (
                kind.name(),
                measure_units::resolve_unit(kind, from).unwrap_or(from),
                measure_units::resolve_unit(kind, to).unwrap_or(to),
            ),
            Err(_) => (category, from, to),
        };

        Ok(json!({
            "content": [{ "type": "text", "text": display }],
            "data": {
                "value": value_to_json(&converted),
                "category": category,
                "from_unit": from,
                "to_unit": to,
                "display": display,
            },
            "isError": false
        }))
    }

    fn tool_list_units(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = required_str(args, "category")?;
        let units = self.call("list_units", &[Value::from(category)]);
        if let Value::Error(e) = &units {
            return Ok(tool_error(e));
        }

        let names: Vec<&str> = units.as_list()
            .map(|l| l.iter().filter_map(Value::as_text).collect())
            .unwrap_or_default();

        Ok(json!({
            "content": [{ "type": "text", "text": format!("{}: {}", category, names.join(", ")) }],
            "data": value_to_json(&units),
            "isError": false
        }))
    }

    fn tool_list_categories(&self) -> Result<JsonValue, McpError> {
        let categories = self.call("list_categories", &[]);
        Ok(json!({
            "content": [{ "type": "text", "text": categories.to_string() }],
            "data": value_to_json(&categories),
            "isError": categories.is_error()
        }))
    }

    fn tool_help(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let name = args.get("name").and_then(|v| v.as_str());
        let help = self.registry.help(name);
        Ok(json!({
            "content": [{ "type": "text", "text": format_help(&help) }],
            "data": value_to_json(&help),
            "isError": help.is_error()
        }))
    }

    fn tool_list_functions(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = args.get("category").and_then(|v| v.as_str());
        let functions = self.registry.list_functions(category);
        Ok(json!({
            "content": [{ "type": "text", "text": "Functions listed" }],
            "data": value_to_json(&functions),
            "isError": false
        }))
    }
}

fn required_str<'a>(args: &'a JsonValue, key: &str) -> Result<&'a str, McpError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", key)))
}

fn tool_error(e: &MeasureError) -> JsonValue {
    debug!(code = %e.code, "tool returned error");
    let mut text = e.message.clone();
    if let Some(ref suggestion) = e.suggestion {
        text.push_str(&format!(". {}", suggestion));
    }
    json!({
        "content": [{ "type": "text", "text": text }],
        "error": e,
        "isError": true
    })
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Echo the client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit conversion for length, weight, volume and temperature"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Call list_categories, then list_units for a category, then convert with two units from that list."
    }))
}

fn tools_list() -> JsonValue {
    let category_schema = json!({
        "type": "string",
        "description": "Conversion category",
        "enum": ["Length", "Weight", "Volume", "Temperature"]
    });

    json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value between two units of the same category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": ["number", "string"],
                            "description": "Value to convert"
                        },
                        "category": category_schema.clone(),
                        "from_unit": {
                            "type": "string",
                            "description": "Source unit, as returned by list_units"
                        },
                        "to_unit": {
                            "type": "string",
                            "description": "Target unit, as returned by list_units"
                        },
                        "decimals": {
                            "type": "integer",
                            "description": "Decimals in the display text (default: 2)"
                        }
                    },
                    "required": ["value", "category", "from_unit", "to_unit"]
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a category in display order.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": category_schema.clone()
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "list_categories",
                "description": "List the conversion categories.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "help",
                "description": "Get documentation for a function, or general help.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Function name. Omit for general help."
                        }
                    }
                }
            },
            {
                "name": "list_functions",
                "description": "List all available functions, optionally by category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Filter by function category",
                            "enum": ["units"]
                        }
                    }
                }
            }
        ]
    })
}

fn format_help(help: &Value) -> String {
    match help {
        Value::Object(map) => {
            let mut out = String::new();
            if let Some(Value::Text(n)) = map.get("name") { out.push_str(&format!("# {}\n\n", n)); }
            if let Some(Value::Text(d)) = map.get("description") { out.push_str(&format!("{}\n\n", d)); }
            if let Some(Value::Text(u)) = map.get("usage") { out.push_str(&format!("**Usage:** `{}`\n\n", u)); }
            if out.is_empty() {
                out = help.to_string();
            }
            out
        }
        Value::Error(e) => format!("Error: {}", e.message),
        other => other.to_string(),
    }
}

fn json_to_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) => Value::Number(f),
            None => Value::Text(n.to_string()),
        },
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(arr) => Value::List(arr.iter().map(json_to_value).collect()),
        JsonValue::Object(obj) => Value::Object(
            obj.iter().map(|(k, v)| (k.clone(), json_to_value(v))).collect::<HashMap<_, _>>()
        ),
    }
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => json!(n),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::List(l) => JsonValue::Array(l.iter().map(value_to_json).collect()),
        Value::Object(o) => JsonValue::Object(o.iter().map(|(k, v)| (k.clone(), value_to_json(v))).collect()),
        Value::Error(e) => json!({"_error": {"code": e.code, "message": e.message}}),
    }
}
