// MCP server: JSON-RPC dispatch and the newline-delimited stdio transport

use crate::protocol::*;
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{debug, info, warn};

const SERVER_NAME: &str = "hearsay";

/// Longest accepted input line on the stdio transport (4 MiB)
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 4 * 1024 * 1024;

/// Serves the registered tools over JSON-RPC 2.0
#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    max_message_bytes: usize,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }

    /// Cap the length of a single input line
    pub fn with_max_message_bytes(mut self, limit: usize) -> Self {
        self.max_message_bytes = limit;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve on stdin/stdout until stdin closes
    pub async fn start(&self) -> Result<()> {
        info!(tools = self.registry.len(), "MCP server listening on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Read one JSON-RPC message per line from `reader`, write one response
    /// per line to `writer`.
    ///
    /// Requests are handled concurrently, so responses may be written in a
    /// different order than requests arrived. Pending requests are answered
    /// before returning at end of input. A line longer than the configured
    /// cap is answered with an invalid-request error and ends the session.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(
            reader,
            LinesCodec::new_with_max_length(self.max_message_bytes),
        );
        let mut sink = FramedWrite::new(writer, LinesCodec::new());
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        loop {
            tokio::select! {
                line = lines.next() => match line {
                    Some(Ok(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        let server = self.clone();
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            if let Some(response) = server.handle_message(&line).await {
                                // receiver only goes away on a write failure
                                let _ = tx.send(response);
                            }
                        });
                    }
                    Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                        warn!(limit = self.max_message_bytes, "JSON-RPC message too long");
                        let response = JsonRpcResponse::error(
                            serde_json::Value::Null,
                            JsonRpcError::invalid_request(),
                        );
                        write_response(&mut sink, &response).await?;
                        anyhow::bail!(
                            "JSON-RPC message exceeds {} bytes",
                            self.max_message_bytes
                        );
                    }
                    Some(Err(e)) => return Err(e).context("Failed to read JSON-RPC input"),
                    None => break,
                },
                Some(response) = rx.recv() => write_response(&mut sink, &response).await?,
            }
        }

        drop(tx);
        while let Some(response) = rx.recv().await {
            write_response(&mut sink, &response).await?;
        }

        info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Handle one raw message. Returns `None` for notifications.
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let value: serde_json::Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Malformed JSON-RPC message");
                return Some(JsonRpcResponse::error(
                    serde_json::Value::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!(error = %e, "Invalid JSON-RPC request");
                Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()))
            }
        }
    }

    /// Dispatch a parsed request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!(method = %request.method, "Notification received");
            return None;
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
        }

        debug!(method = %request.method, "Request received");
        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => to_result(&ListToolsResult {
                tools: self.registry.list_schemas(),
            }),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(
        &self,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, JsonRpcError> {
        let requested = params
            .and_then(|p| serde_json::from_value::<InitializeParams>(p).ok())
            .map(|p| {
                info!(client = %p.client_info.name, version = %p.client_info.version, "Client connected");
                p.protocol_version
            });

        to_result(&InitializeResult {
            protocol_version: requested.unwrap_or_else(|| PROTOCOL_VERSION.to_string()),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: None,
        })
    }

    async fn call_tool(
        &self,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))?;

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        let arguments = if params.arguments.is_null() {
            serde_json::json!({})
        } else {
            params.arguments
        };

        info!(tool = %params.name, "Calling tool");
        let result = match tool.execute(arguments).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = %params.name, error = %format!("{:#}", e), "Tool rejected arguments");
                CallToolResult::error(format!("{:#}", e))
            }
        };
        to_result(&result)
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

async fn write_response<W>(
    sink: &mut FramedWrite<W, LinesCodec>,
    response: &JsonRpcResponse,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let line = serde_json::to_string(response).context("Failed to serialize response")?;
    sink.send(line).await.context("Failed to write response")?;
    Ok(())
}
