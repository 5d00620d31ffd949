use async_trait::async_trait;
use azalea_client::{Account, Client, Event};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::client::events::ConnectionEvent;
use crate::client::{Connection, Connector};
use crate::config::SessionConfig;
use crate::error::SessionError;

/// Production connector backed by azalea.
///
/// Azalea handles the handshake, packet framing, and world state; this
/// adapter only translates its event stream into the lifecycle signals the
/// runner consumes.
pub struct AzaleaConnector;

pub struct AzaleaConnection {
    client: Client,
}

impl Connection for AzaleaConnection {
    fn send_chat(&self, line: &str) {
        self.client.chat(line);
    }

    fn quit(&self) {
        self.client.disconnect();
    }
}

#[async_trait]
impl Connector for AzaleaConnector {
    type Conn = AzaleaConnection;

    async fn connect(
        &self,
        config: &SessionConfig,
    ) -> Result<(AzaleaConnection, mpsc::UnboundedReceiver<ConnectionEvent>), SessionError> {
        // Offline credential mode: the username alone identifies the bot,
        // the password never goes on the wire.
        let account = Account::offline(&config.username);
        let address = format!("{}:{}", config.host, config.port);

        // The wire protocol version is pinned by the library build; the
        // configured label is informational only.
        debug!("Requested protocol version: {}", config.version);
        info!("Joining {} as {}", address, config.username);

        let (client, mut events) = Client::join(&account, address.as_str())
            .await
            .map_err(|e| SessionError::Connect(e.to_string()))?;

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let mapped = match event {
                    Event::Login => Some(ConnectionEvent::Spawned),
                    Event::Disconnect(Some(reason)) => Some(ConnectionEvent::Kicked {
                        reason: reason.to_string(),
                    }),
                    Event::Disconnect(None) => Some(ConnectionEvent::Ended),
                    _ => None,
                };

                if let Some(mapped) = mapped {
                    if tx.send(mapped).is_err() {
                        break;
                    }
                }
            }
        });

        Ok((AzaleaConnection { client }, rx))
    }
}
