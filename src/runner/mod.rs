pub mod script;

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep, timeout};
use tracing::{error, info, warn};

use crate::client::events::ConnectionEvent;
use crate::client::{Connection, Connector};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::report::RunReport;
use crate::runner::script::{login_script, transfer_script, CommandScript};

/// How long to wait for the server to spawn the client in-world.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Grace period after `quit` to let the library tear the connection down.
const QUIT_SETTLE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Link health reported by the event monitor task. Any fatal lifecycle
/// signal flips the link to `Down` and the session is considered dead.
#[derive(Debug, Clone)]
enum LinkState {
    Up,
    Down(String),
}

/// Owns one connect -> authenticate -> act -> disconnect cycle.
///
/// The connector and config are borrowed: the runner never mutates
/// configuration, and a process runs exactly one session.
pub struct SessionRunner<'a, C: Connector> {
    connector: &'a C,
    config: &'a SessionConfig,
    state: SessionState,
    connection: Option<C::Conn>,
    link: Option<watch::Receiver<LinkState>>,
}

impl<'a, C: Connector> SessionRunner<'a, C> {
    pub fn new(connector: &'a C, config: &'a SessionConfig) -> Self {
        Self {
            connector,
            config,
            state: SessionState::Disconnected,
            connection: None,
            link: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state == SessionState::Connected
    }

    /// Opens the connection and waits for the spawn signal, then runs the
    /// login sequence. Calling this while already connected is a no-op
    /// success; the connector is not invoked a second time.
    pub async fn connect(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Connected {
            return Ok(());
        }

        self.state = SessionState::Connecting;
        info!("Connecting to {}:{}", self.config.host, self.config.port);

        // The timeout window runs from initiating the connection, covering
        // both the library handshake and the wait for the spawn signal.
        let connected = timeout(CONNECT_TIMEOUT, async {
            let (connection, mut events) = self.connector.connect(self.config).await?;
            wait_for_spawn(&mut events).await?;
            Ok::<_, SessionError>((connection, events))
        })
        .await;

        let (connection, events) = match connected {
            Ok(Ok(pair)) => pair,
            Ok(Err(e)) => {
                self.state = SessionState::Disconnected;
                return Err(e);
            }
            Err(_) => {
                self.state = SessionState::Disconnected;
                return Err(SessionError::ConnectTimeout);
            }
        };

        self.link = Some(spawn_link_monitor(events));
        self.connection = Some(connection);
        self.state = SessionState::Connected;
        info!("Spawned in-world, running login sequence");

        self.run_script(login_script(&self.config.anarchy)).await
    }

    /// Transmits one chat line. Fire-and-forget: no acknowledgment is
    /// awaited from the server.
    pub fn send_command(&mut self, line: &str) -> Result<(), SessionError> {
        if self.state != SessionState::Connected {
            return Err(SessionError::NotConnected);
        }

        if let Some(link) = &self.link {
            let link_state = link.borrow().clone();
            if let LinkState::Down(reason) = link_state {
                self.state = SessionState::Disconnected;
                self.connection = None;
                return Err(SessionError::Unknown(reason));
            }
        }

        let connection = self.connection.as_ref().ok_or(SessionError::NotConnected)?;
        info!(target: "commands", "> {}", line);
        connection.send_chat(line);
        Ok(())
    }

    /// Runs the transfer sequence. Success means every command was
    /// transmitted, not that the server confirmed the transfer.
    pub async fn transfer_funds(&mut self, player: &str, amount: i64) -> Result<(), SessionError> {
        if self.state != SessionState::Connected {
            return Err(SessionError::NotConnected);
        }

        info!("Transferring {} coins to {}", amount, player);
        self.run_script(transfer_script(&self.config.anarchy, player, amount))
            .await
    }

    /// Best-effort teardown; always leaves the session disconnected.
    pub async fn disconnect(&mut self) {
        if self.state == SessionState::Connected {
            if let Some(connection) = &self.connection {
                connection.quit();
            }
            sleep(QUIT_SETTLE).await;
        }

        self.connection = None;
        self.link = None;
        self.state = SessionState::Disconnected;
    }

    /// Executes a schedule step by step. A dead link aborts the remaining
    /// steps with the reason the monitor recorded.
    async fn run_script(&mut self, script: CommandScript) -> Result<(), SessionError> {
        for step in &script.steps {
            sleep(step.delay).await;
            self.send_command(&step.line)?;
        }
        sleep(script.settle).await;
        Ok(())
    }
}

async fn wait_for_spawn(
    events: &mut mpsc::UnboundedReceiver<ConnectionEvent>,
) -> Result<(), SessionError> {
    match events.recv().await {
        Some(ConnectionEvent::Spawned) => Ok(()),
        Some(ConnectionEvent::Error { message }) => Err(SessionError::Connect(message)),
        Some(ConnectionEvent::Kicked { reason }) => {
            Err(SessionError::Connect(format!("kicked: {}", reason)))
        }
        Some(ConnectionEvent::Ended) | None => {
            Err(SessionError::Connect("connection closed".to_string()))
        }
    }
}

/// Hands the event stream to a background task that watches for fatal
/// signals. The returned receiver reads `Down` once the connection is dead.
fn spawn_link_monitor(
    mut events: mpsc::UnboundedReceiver<ConnectionEvent>,
) -> watch::Receiver<LinkState> {
    let (tx, rx) = watch::channel(LinkState::Up);

    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let down = match event {
                ConnectionEvent::Error { message } => Some(message),
                ConnectionEvent::Kicked { reason } => Some(format!("kicked: {}", reason)),
                ConnectionEvent::Ended => Some("connection closed".to_string()),
                ConnectionEvent::Spawned => None,
            };

            if let Some(reason) = down {
                warn!("Connection lost: {}", reason);
                let _ = tx.send(LinkState::Down(reason));
                break;
            }
        }
    });

    rx
}

/// Connect, transfer, report, and always clean up. This is the whole
/// transfer flow of one process invocation.
pub async fn pay_player<C: Connector>(
    connector: &C,
    config: &SessionConfig,
    player: &str,
    amount: i64,
) -> RunReport {
    let mut session = SessionRunner::new(connector, config);

    let result = async {
        session.connect().await?;
        session.transfer_funds(player, amount).await
    }
    .await;

    let report = match result {
        Ok(()) => RunReport::transfer_success(player, amount),
        Err(e) => {
            error!("Transfer failed: {}", e);
            RunReport::transfer_failure(&e)
        }
    };

    session.disconnect().await;
    report
}

/// Connect, report connectivity, and always clean up.
pub async fn test_connection<C: Connector>(connector: &C, config: &SessionConfig) -> RunReport {
    let mut session = SessionRunner::new(connector, config);

    let report = match session.connect().await {
        Ok(()) => RunReport::test_success(),
        Err(e) => {
            error!("Connection test failed: {}", e);
            RunReport::test_failure(&e)
        }
    };

    session.disconnect().await;
    report
}
