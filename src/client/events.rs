/// Lifecycle signals emitted by a connection.
#[derive(Debug, Clone)]
pub enum ConnectionEvent {
    /// The server finished placing the client in-world. Fires once.
    Spawned,
    /// The library reported a connection-level failure.
    Error { message: String },
    /// The connection closed.
    Ended,
    /// The server kicked the client.
    Kicked { reason: String },
}
