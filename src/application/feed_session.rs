use crate::domain::{
    errors::FeedError,
    feed::{FeedConnection, FeedEvent},
    logging::LogComponent,
    state::{StateChange, Transition, ViewState},
};
use crate::infrastructure::sse::dto::{FeedMessage, decode_feed_message};
use crate::{log_debug, log_error, log_info, log_trace};

const COMPONENT: LogComponent = LogComponent::Application("FeedSession");

/// Callback invoked after every visible state change, with just that change.
pub type StateObserver = Box<dyn FnMut(StateChange<'_>)>;

/// Whether the event pump should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// One subscription to the trade feed.
///
/// Owns the view state and the live connection. The connection is released
/// exactly once: on the first error, on [`FeedSession::shutdown`], or when
/// the session is dropped, whichever comes first.
pub struct FeedSession<C: FeedConnection> {
    state: ViewState,
    connection: Option<C>,
    message_received: bool,
    observer: Option<StateObserver>,
}

impl<C: FeedConnection> FeedSession<C> {
    pub fn new(connection: C) -> Self {
        log_info!(COMPONENT, "subscription opened");
        Self { state: ViewState::Loading, connection: Some(connection), message_received: false, observer: None }
    }

    pub fn with_observer(mut self, observer: impl FnMut(StateChange<'_>) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn has_received_message(&self) -> bool {
        self.message_received
    }

    /// Apply one transport event.
    pub fn handle(&mut self, event: FeedEvent) -> Flow {
        if self.state.is_terminal() {
            return Flow::Stop;
        }
        match event {
            FeedEvent::Message(payload) => {
                self.message_received = true;
                self.handle_message(&payload)
            }
            FeedEvent::TransportError(detail) => self.fail(FeedError::TransportError(detail)),
        }
    }

    /// The first-message deadline expired. No-op once anything has arrived.
    pub fn on_timeout(&mut self) -> Flow {
        if self.message_received || self.state.is_terminal() {
            log_trace!(COMPONENT, "deadline elapsed after first message, ignoring");
            return Flow::Continue;
        }
        self.fail(FeedError::Timeout)
    }

    /// Release the connection without touching the view state.
    pub fn shutdown(&mut self) {
        self.close_connection();
    }

    fn handle_message(&mut self, payload: &str) -> Flow {
        match decode_feed_message(payload) {
            Ok(FeedMessage::Trades(batch)) => {
                let count = batch.len();
                if self.state.apply_batch(batch) == Transition::Applied {
                    if let Some(series) = self.state.trades() {
                        log_debug!(COMPONENT, "appended {count} trades, {} total", series.len());
                        let appended = &series.as_slice()[series.len() - count..];
                        Self::notify(&mut self.observer, StateChange::Appended(appended));
                    }
                }
                Flow::Continue
            }
            Ok(FeedMessage::Ignored) => {
                log_trace!(COMPONENT, "skipping non-trade message");
                Flow::Continue
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, error: FeedError) -> Flow {
        if self.state.fail(&error) == Transition::Applied {
            log_error!(COMPONENT, "{error} ({})", error.detail());
            self.close_connection();
            if let Some(message) = self.state.error_message() {
                Self::notify(&mut self.observer, StateChange::Failed(message));
            }
        }
        Flow::Stop
    }

    fn close_connection(&mut self) {
        if let Some(connection) = self.connection.take() {
            log_info!(COMPONENT, "closing feed connection");
            connection.close();
        }
    }

    fn notify(observer: &mut Option<StateObserver>, change: StateChange<'_>) {
        if let Some(observer) = observer.as_mut() {
            observer(change);
        }
    }
}

impl<C: FeedConnection> Drop for FeedSession<C> {
    fn drop(&mut self) {
        self.close_connection();
    }
}
