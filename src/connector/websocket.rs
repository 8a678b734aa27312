//! WebSocket implementation of the connection capability.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::error::{Error, Result};
use crate::target::Target;

use super::{Connection, Connector};

/// Opens WebSocket connections with the target's headers attached to the
/// handshake request.
#[derive(Debug, Default)]
pub struct WebSocketConnector;

#[async_trait]
impl Connector for WebSocketConnector {
    async fn connect(&self, target: &Target) -> Result<Box<dyn Connection>> {
        let mut request = target.endpoint.as_str().into_client_request()?;
        request.headers_mut().extend(target.headers.clone());

        let (ws, response) = connect_async(request).await?;
        debug!(endpoint = %target.endpoint, status = %response.status(), "handshake complete");

        Ok(Box::new(WebSocketConnection { ws }))
    }
}

struct WebSocketConnection {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl Connection for WebSocketConnection {
    async fn read_next(&mut self) -> Result<()> {
        // Only data frames count as messages; control frames are handled
        // here and the wait continues.
        loop {
            match self.ws.next().await {
                Some(Ok(Message::Text(_) | Message::Binary(_))) => return Ok(()),
                Some(Ok(Message::Ping(payload))) => {
                    self.ws.send(Message::Pong(payload)).await?;
                }
                Some(Ok(Message::Pong(_) | Message::Frame(_))) => {}
                Some(Ok(Message::Close(_))) | None => return Err(Error::ConnectionClosed),
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    async fn close(&mut self) {
        if let Err(e) = self.ws.close(None).await {
            debug!(error = %e, "close failed");
        }
    }
}
