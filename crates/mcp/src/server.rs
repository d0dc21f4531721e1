// MCP server: newline-delimited JSON-RPC 2.0 over stdio

use crate::dispatcher::Dispatcher;
use crate::error::ServerError;
use crate::protocol::*;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{debug, error, info, warn};

/// Longest accepted request line, in bytes.
pub const MAX_LINE_LENGTH: usize = 8 * 1024 * 1024;

pub const SERVER_NAME: &str = "pennylane-mcp";

#[derive(Clone)]
pub struct McpServer {
    dispatcher: Dispatcher,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn run_stdio(&self) -> Result<(), ServerError> {
        info!(
            "MCP server listening on stdio ({} tools)",
            self.dispatcher.registry().len()
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve one session over any byte stream pair.
    ///
    /// Each request runs on its own task, so slow tool calls do not hold up
    /// the ones behind them. Responses are written in completion order by a
    /// single writer task. Returns once the input is exhausted and every
    /// pending response has been flushed.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<(), ServerError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let writer_task = tokio::spawn(async move {
            let mut sink = FramedWrite::new(writer, LinesCodec::new());
            while let Some(frame) = rx.recv().await {
                sink.send(frame).await?;
            }
            Ok::<_, LinesCodecError>(())
        });

        let mut in_flight = JoinSet::new();

        while let Some(line) = lines.next().await {
            let line = match line {
                Ok(line) => line,
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    warn!("Discarding request longer than {} bytes", MAX_LINE_LENGTH);
                    send(
                        &tx,
                        &JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()),
                    );
                    continue;
                }
                Err(LinesCodecError::Io(e)) => return Err(e.into()),
            };

            if line.trim().is_empty() {
                continue;
            }

            let server = self.clone();
            let tx = tx.clone();
            in_flight.spawn(async move {
                if let Some(response) = server.handle_message(&line).await {
                    send(&tx, &response);
                }
            });

            while let Some(joined) = in_flight.try_join_next() {
                log_join_error(joined);
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            log_join_error(joined);
        }
        drop(tx);

        writer_task
            .await
            .map_err(|e| ServerError::Writer(e.to_string()))?
            .map_err(|e| match e {
                LinesCodecError::Io(e) => ServerError::Io(e),
                other => ServerError::Writer(other.to_string()),
            })?;

        debug!("MCP session ended");
        Ok(())
    }

    /// Handle one raw line. Returns `None` when no response is due.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let parsed: Value = match serde_json::from_str(line.trim()) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "Unparsable request");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        let id = parsed.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(parsed) {
            Ok(request) => self.handle_request(request).await,
            Err(_) => Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request())),
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }
        let id = request.id.unwrap_or(Value::Null);

        debug!(method = %request.method, "Request received");

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize(request.params)),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::success(id, self.dispatcher.list_tools()),
            "tools/call" => {
                let params = request.params.unwrap_or(Value::Null);
                match serde_json::from_value::<CallToolParams>(params) {
                    Ok(params) => {
                        let result = self
                            .dispatcher
                            .call_tool(&params.name, params.arguments)
                            .await;
                        JsonRpcResponse::success(id, result)
                    }
                    Err(e) => JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                    ),
                }
            }
            method => JsonRpcResponse::error(id, JsonRpcError::method_not_found(method)),
        };

        Some(response)
    }

    fn initialize(&self, params: Option<Value>) -> InitializeResult {
        let params: InitializeParams = params
            .and_then(|params| serde_json::from_value(params).ok())
            .unwrap_or_default();

        match &params.client_info {
            Some(client) => info!(
                client = %client.name,
                version = %client.version,
                protocol = %params.protocol_version,
                "MCP client connected"
            ),
            None => info!(protocol = %params.protocol_version, "MCP client connected"),
        }

        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

fn send(tx: &mpsc::UnboundedSender<String>, response: &JsonRpcResponse) {
    match serde_json::to_string(response) {
        Ok(frame) => {
            if tx.send(frame).is_err() {
                warn!("Response dropped: writer has stopped");
            }
        }
        Err(e) => error!(error = %e, "Failed to encode response"),
    }
}

fn log_join_error(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        error!(error = %e, "Request task failed");
    }
}
