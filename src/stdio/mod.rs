//! Stdio transport for the Model Context Protocol
//!
//! Drives the dispatcher one line at a time: a request is fully handled,
//! including any completion call, before the next line is read. Shutdown
//! interrupts both the wait for input and an in-flight request.

pub mod transport;

use std::future::Future;

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

use crate::errors::TransportError;
use crate::mcp::server::handle_request;
use crate::AppState;

pub use transport::StdioTransport;

/// Serves until the reader reaches EOF or `shutdown` resolves. When shutdown
/// wins, the request being handled is dropped and no envelope is written.
pub async fn serve<R, W, F>(
    state: &AppState,
    transport: &mut StdioTransport<R, W>,
    shutdown: F,
) -> Result<(), TransportError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            biased;
            () = &mut shutdown => {
                info!("shutdown requested, stopping");
                return Ok(());
            }
            line = transport.read_line() => line?,
        };

        let Some(line) = line else {
            info!("stdin closed, shutting down");
            return Ok(());
        };

        let response = tokio::select! {
            biased;
            () = &mut shutdown => {
                info!("shutdown requested during request, stopping without a response");
                return Ok(());
            }
            response = handle_request(state, &line) => response,
        };
        transport.write_message(&response).await?;
    }
}
