use futures::{
    Stream, StreamExt,
    future::{Either, select},
    pin_mut,
};
use std::cell::RefCell;
use std::rc::Rc;

use super::feed_session::{FeedSession, Flow};
use crate::domain::{
    feed::{FeedConnection, FeedEvent},
    logging::LogComponent,
};
use crate::{log_debug, log_warn};

const COMPONENT: LogComponent = LogComponent::Application("FeedDriver");

/// Pump `events` into `session` until the session stops.
///
/// `deadline` is the first-message timeout. It is raced against the first
/// event only and dropped as soon as that event arrives, which disarms it.
/// The session is only borrowed between awaits, never across one.
pub async fn drive_feed<C, S, D>(session: Rc<RefCell<FeedSession<C>>>, events: S, deadline: D)
where
    C: FeedConnection,
    S: Stream<Item = FeedEvent>,
    D: Future<Output = ()>,
{
    pin_mut!(events);
    let deadline = Box::pin(deadline);

    let first = match select(events.next(), deadline).await {
        Either::Left((Some(event), deadline)) => {
            drop(deadline);
            log_debug!(COMPONENT, "first message arrived, deadline disarmed");
            event
        }
        Either::Left((None, deadline)) => {
            log_warn!(COMPONENT, "feed ended before any message");
            deadline.await;
            session.borrow_mut().on_timeout();
            return;
        }
        Either::Right(((), _)) => {
            session.borrow_mut().on_timeout();
            return;
        }
    };

    if session.borrow_mut().handle(first) == Flow::Stop {
        return;
    }

    while let Some(event) = events.next().await {
        if session.borrow_mut().handle(event) == Flow::Stop {
            break;
        }
    }
    log_debug!(COMPONENT, "event pump finished");
}
