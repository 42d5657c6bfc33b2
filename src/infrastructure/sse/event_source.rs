use futures::{Stream, StreamExt};
use gloo_net::eventsource::futures::EventSource;

use crate::config::FeedConfig;
use crate::domain::{
    errors::{FeedError, FeedResult},
    feed::{FeedConnection, FeedEvent},
    logging::LogComponent,
};
use crate::log_info;

const COMPONENT: LogComponent = LogComponent::Infrastructure("EventSource");

/// Browser `EventSource` connection to the trade feed, based on gloo
pub struct EventSourceConnection {
    source: EventSource,
    url: String,
}

impl EventSourceConnection {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FeedConnection for EventSourceConnection {
    fn close(self) {
        log_info!(COMPONENT, "🔌 Closing {}", self.url);
        self.source.close();
    }
}

/// Open the SSE stream and subscribe to its default `message` events.
///
/// Transport errors come through the returned stream as
/// [`FeedEvent::TransportError`]; the browser's own auto-reconnect is cut
/// short because the session closes the connection on the first one.
pub fn open_trade_feed(
    config: &FeedConfig,
) -> FeedResult<(EventSourceConnection, impl Stream<Item = FeedEvent> + use<>)> {
    let url = config.feed_url();
    log_info!(COMPONENT, "📡 Connecting to {url}");

    let mut source = EventSource::new(&url)
        .map_err(|e| FeedError::TransportError(format!("failed to open {url}: {e}")))?;
    let subscription = source
        .subscribe("message")
        .map_err(|e| FeedError::TransportError(format!("failed to subscribe: {e}")))?;

    let events = subscription.map(|item| match item {
        Ok((_, event)) => FeedEvent::Message(event.data().as_string().unwrap_or_default()),
        Err(err) => FeedEvent::TransportError(format!("{err:?}")),
    });

    Ok((EventSourceConnection { source, url }, events))
}
