/// Errors surfaced by the connect/transfer path.
///
/// Every variant carries a stable snake_case code that ends up in the
/// `error` field of the JSON result, so downstream consumers can match on
/// it without parsing the human-readable message.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// No spawn or error signal arrived within the connect window.
    ConnectTimeout,
    /// The protocol library reported a connection failure (handshake
    /// rejection, refused socket, bad address).
    Connect(String),
    /// An action was attempted before a successful connect.
    NotConnected,
    /// Anything else surfaced by the library mid-session, including a kick
    /// or connection drop while a command sequence was in flight.
    Unknown(String),
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::ConnectTimeout => "connect_timeout",
            SessionError::Connect(_) => "connection_error",
            SessionError::NotConnected => "not_connected",
            SessionError::Unknown(_) => "unknown_error",
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::ConnectTimeout => write!(f, "Connection timeout"),
            SessionError::Connect(msg) => write!(f, "Connection failed: {}", msg),
            SessionError::NotConnected => write!(f, "Bot not connected"),
            SessionError::Unknown(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SessionError {}
