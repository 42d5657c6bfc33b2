//! Ports between the trade feed transport and the application layer.

/// Something a live feed transport delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// Raw `data` field of one server-sent event.
    Message(String),
    /// The transport reported a connection-level failure.
    TransportError(String),
}

/// An open push connection.
///
/// `close` consumes the handle, so a connection can be closed at most once.
pub trait FeedConnection {
    fn close(self);
}
