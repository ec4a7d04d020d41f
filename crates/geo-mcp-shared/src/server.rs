//! Request dispatch and the stdio server loop
//!
//! Each geo server implements [`McpHandler`]; [`run_server_loop`] owns the
//! transport and routes every JSON-RPC request to the handler, one request
//! at a time, until EOF or the shutdown future resolves.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::protocol::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ReadResourceParams, ReadResourceResult,
    Resource, ResourceTemplate, ServerCapabilities, ServerInfo, ToolCall, ToolDefinition,
    ToolResult, PROTOCOL_VERSION,
};
use crate::transport::{StdioTransport, TransportError};

/// Protocol-facing behaviour of one MCP server.
///
/// Resource methods default to "method not found" so tool-only servers
/// only implement the tool half.
pub trait McpHandler {
    fn server_info(&self) -> ServerInfo;

    fn capabilities(&self) -> ServerCapabilities {
        ServerCapabilities::tools_only()
    }

    fn list_tools(&self) -> Vec<ToolDefinition>;

    /// Execute a tool. Upstream failures come back as `Ok` with
    /// `is_error` set; `Err` is reserved for protocol-level failures.
    fn call_tool(&self, call: ToolCall) -> impl Future<Output = Result<ToolResult>>;

    fn list_resources(&self) -> Result<Vec<Resource>> {
        Err(Error::method_not_found("resources/list"))
    }

    fn list_resource_templates(&self) -> Result<Vec<ResourceTemplate>> {
        Err(Error::method_not_found("resources/templates/list"))
    }

    fn read_resource(&self, uri: &str) -> impl Future<Output = Result<ReadResourceResult>> {
        debug!(uri, "resource read on a server without resources");
        async { Err(Error::method_not_found("resources/read")) }
    }
}

/// Handle one decoded JSON-RPC message. Returns `None` for notifications.
pub async fn handle_message<H: McpHandler>(handler: &H, message: Value) -> Option<JsonRpcResponse> {
    if !message.is_object() {
        // Batches are not supported either
        warn!("received a message that is not a JSON object");
        return Some(JsonRpcResponse::failure(
            None,
            Error::invalid_request("Invalid request: expected a JSON object"),
        ));
    }

    if message.get("method").is_none() {
        // Responses from the client; we never issue requests so nothing to match them to
        debug!("ignoring message without a method");
        return None;
    }

    let id = message.get("id").cloned();
    let request: JsonRpcRequest = match serde_json::from_value(message) {
        Ok(request) => request,
        Err(e) => {
            return Some(JsonRpcResponse::failure(
                id,
                Error::invalid_request(format!("Invalid request: {}", e)),
            ))
        }
    };

    if request.is_notification() {
        debug!(method = %request.method, "received notification");
        return None;
    }

    let id = request.id.clone();
    debug!(method = %request.method, id = ?id, "handling request");

    match dispatch(handler, &request.method, request.params).await {
        Ok(result) => Some(JsonRpcResponse::success(id, result)),
        Err(err) => {
            debug!(method = %request.method, code = err.code, error = %err, "request failed");
            Some(JsonRpcResponse::failure(id, err))
        }
    }
}

async fn dispatch<H: McpHandler>(handler: &H, method: &str, params: Option<Value>) -> Result<Value> {
    match method {
        "initialize" => to_result(&InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: handler.capabilities(),
            server_info: handler.server_info(),
        }),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": handler.list_tools() })),
        "tools/call" => {
            let call: ToolCall = parse_params(params)?;
            info!(tool = %call.name, "tool call");
            let result = handler.call_tool(call).await?;
            to_result(&result)
        }
        "resources/list" => Ok(json!({ "resources": handler.list_resources()? })),
        "resources/templates/list" => Ok(json!({
            "resourceTemplates": handler.list_resource_templates()?
        })),
        "resources/read" => {
            let params: ReadResourceParams = parse_params(params)?;
            info!(uri = %params.uri, "resource read");
            let result = handler.read_resource(&params.uri).await?;
            to_result(&result)
        }
        other => Err(Error::method_not_found(other)),
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T> {
    let params = params.ok_or_else(|| Error::invalid_params("Missing params", "params is required"))?;
    serde_json::from_value(params).map_err(|e| Error::invalid_params("Invalid params", e.to_string()))
}

fn to_result<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Run the server loop: read messages from the transport and respond on it.
///
/// Stops on EOF or when `shutdown` resolves; a request still waiting on
/// its upstream call at that point is dropped. The transport is closed
/// before returning.
pub async fn run_server_loop<R, W, H, F>(
    mut transport: StdioTransport<R, W>,
    handler: &H,
    shutdown: F,
) -> std::result::Result<(), TransportError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    H: McpHandler,
    F: Future<Output = ()>,
{
    let info = handler.server_info();
    info!(server = %info.name, version = %info.version, "MCP server initialized, waiting for requests...");

    tokio::pin!(shutdown);

    loop {
        let message = tokio::select! {
            _ = &mut shutdown => {
                info!("Received shutdown signal, exiting gracefully");
                break;
            }
            msg = transport.read_message() => msg,
        };

        let response = match message {
            Ok(Some(value)) => {
                tokio::select! {
                    _ = &mut shutdown => {
                        info!("Received shutdown signal, abandoning in-flight request");
                        break;
                    }
                    response = handle_message(handler, value) => response,
                }
            }
            Ok(None) => {
                info!("Client disconnected (EOF)");
                break;
            }
            Err(TransportError::InvalidJson(e)) => {
                warn!(error = %e, "received malformed message");
                Some(JsonRpcResponse::failure(None, Error::parse_error(e.to_string())))
            }
            Err(e) => {
                error!(error = %e, "Transport error");
                return Err(e);
            }
        };

        if let Some(response) = response {
            match transport.write_message(&response).await {
                Ok(()) => {}
                Err(TransportError::Disconnected) => {
                    info!("Client disconnected (broken pipe)");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    match transport.close().await {
        Ok(()) | Err(TransportError::Disconnected) => {}
        Err(e) => warn!(error = %e, "failed to close transport"),
    }
    info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
