pub mod azalea;
pub mod events;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::client::events::ConnectionEvent;
use crate::config::SessionConfig;
use crate::error::SessionError;

/// A live connection to the game server.
///
/// Both operations mirror the high-level surface of the protocol library:
/// chat lines are fire-and-forget (no server acknowledgment is awaited) and
/// `quit` asks the library to close the connection.
pub trait Connection: Send + Sync {
    fn send_chat(&self, line: &str);
    fn quit(&self);
}

/// Opens connections to the game server.
///
/// The production implementation wraps the protocol library; tests substitute
/// a scripted mock. The returned receiver carries lifecycle signals for the
/// connection; the first `Spawned` means the server finished placing the
/// client in-world.
#[async_trait]
pub trait Connector: Send + Sync {
    type Conn: Connection;

    async fn connect(
        &self,
        config: &SessionConfig,
    ) -> Result<(Self::Conn, mpsc::UnboundedReceiver<ConnectionEvent>), SessionError>;
}
