use futures::future::{AbortHandle, abortable};
use gloo_timers::future::TimeoutFuture;
use leptos::html::Canvas;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlCanvasElement;

use crate::{
    application::{FeedSession, drive_feed},
    config::FeedConfig,
    domain::{
        logging::LogComponent,
        state::{Phase, ViewState},
    },
    infrastructure::{
        chart_js::ChartHandle,
        sse::{EventSourceConnection, open_trade_feed},
    },
    log_debug, log_error, log_info,
    presentation::{Presentation, present},
};

const COMPONENT: LogComponent = LogComponent::Presentation("TradeChart");

/// A live subscription owned by a mounted [`TradeChart`].
///
/// Dropping it aborts the event pump (which drops the pending deadline) and
/// closes the connection if it is still open.
pub struct FeedSubscription {
    session: Rc<RefCell<FeedSession<EventSourceConnection>>>,
    pump: AbortHandle,
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.pump.abort();
        // A borrowed session belongs to the pump; its own drop closes the connection.
        if let Ok(mut session) = self.session.try_borrow_mut() {
            session.shutdown();
        }
        log_debug!(COMPONENT, "subscription released");
    }
}

/// Open the feed and start pumping its events into `view_state`.
///
/// Returns `None` when the connection cannot even be opened, in which case
/// `view_state` already holds the error.
pub fn subscribe(config: &FeedConfig, view_state: RwSignal<ViewState>) -> Option<FeedSubscription> {
    let (connection, events) = match open_trade_feed(config) {
        Ok(opened) => opened,
        Err(err) => {
            log_error!(COMPONENT, "{err} ({})", err.detail());
            view_state.set(ViewState::Error(err.to_string()));
            return None;
        }
    };

    let session = Rc::new(RefCell::new(
        FeedSession::new(connection).with_observer(move |change| {
            view_state.update(|state| {
                state.apply_change(change);
            });
        }),
    ));
    let deadline = TimeoutFuture::new(config.timeout_millis());
    let (pump, handle) = abortable(drive_feed(Rc::clone(&session), events, deadline));
    spawn_local(async move {
        if pump.await.is_err() {
            log_debug!(COMPONENT, "event pump aborted");
        }
    });

    Some(FeedSubscription { session, pump: handle })
}

/// Live price chart for the trade feed.
#[component]
pub fn TradeChart(#[prop(optional)] config: Option<FeedConfig>) -> impl IntoView {
    let config = config.unwrap_or_default();
    let view_state = create_rw_signal(ViewState::Loading);
    let phase = create_memo(move |_| view_state.with(ViewState::phase));

    let subscription = subscribe(&config, view_state);
    on_cleanup(move || drop(subscription));

    let canvas_ref = create_node_ref::<Canvas>();
    let chart: Rc<RefCell<Option<ChartHandle>>> = Rc::new(RefCell::new(None));
    {
        let chart = Rc::clone(&chart);
        create_effect(move |_| {
            let canvas = canvas_ref.get();
            view_state.with(|state| sync_chart(&chart, canvas.as_deref(), state));
        });
    }
    on_cleanup(move || {
        chart.borrow_mut().take();
    });

    view! {
        <style>
            {r#"
            .trade-chart {
                padding: 5rem 1.5rem;
                min-height: 100vh;
                background: #111827;
                box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);
            }

            .trade-chart__heading {
                margin-bottom: 1rem;
                font-size: 1.25rem;
                font-weight: 600;
                color: #ffffff;
            }

            .trade-chart__canvas {
                position: relative;
                width: 100%;
                height: 20rem;
            }

            .trade-chart__error {
                padding: 1rem 0;
                text-align: center;
                font-size: 1.125rem;
                color: #ef4444;
            }

            .spinner {
                display: flex;
                align-items: center;
                justify-content: center;
            }

            .spinner__ring {
                width: 3rem;
                height: 3rem;
                border: 4px solid #393E46;
                border-top-color: #00ADB5;
                border-radius: 50%;
                animation: spinner-turn 0.8s linear infinite;
            }

            @keyframes spinner-turn {
                to { transform: rotate(360deg); }
            }
            "#}
        </style>
        <div class="trade-chart">
            {move || match phase.get() {
                Phase::Error(message) => view! {
                    <div class="trade-chart__error">{message}</div>
                }.into_view(),
                Phase::Loading => view! { <Spinner height="300px" /> }.into_view(),
                Phase::Ready => view! {
                    <h1 class="trade-chart__heading">"Trade Chart"</h1>
                    <div class="trade-chart__canvas">
                        <canvas node_ref=canvas_ref />
                    </div>
                }.into_view(),
            }}
        </div>
    }
}

/// Loading placeholder
#[component]
pub fn Spinner(#[prop(into, default = "300px".to_string())] height: String) -> impl IntoView {
    view! {
        <div class="spinner" style:height=height role="status">
            <div class="spinner__ring"></div>
        </div>
    }
}

/// Bring the chart in line with the view state: create it once a canvas
/// exists, append new trades in place afterwards, destroy it otherwise.
fn sync_chart(slot: &RefCell<Option<ChartHandle>>, canvas: Option<&HtmlCanvasElement>, state: &ViewState) {
    let mut slot = slot.borrow_mut();
    let Some(canvas) = canvas else {
        slot.take();
        return;
    };

    let bound = slot.as_ref().is_some_and(|handle| handle.is_bound_to(canvas));
    let result = match (bound, state.trades()) {
        (true, Some(trades)) => slot.as_mut().map_or(Ok(()), |handle| handle.extend(trades)),
        _ => {
            slot.take();
            match present(state) {
                Presentation::Chart(config) => ChartHandle::create(canvas, &config).map(|handle| {
                    *slot = Some(handle);
                }),
                Presentation::Error { .. } | Presentation::Loading => Ok(()),
            }
        }
    };

    if let Err(err) = result {
        log_error!(COMPONENT, "❌ Chart error: {err:?}");
    }
}

/// Mount a [`TradeChart`] at the end of `<body>`.
pub fn mount_to_page(config: FeedConfig) {
    log_info!(COMPONENT, "mounting trade chart for {}", config.feed_url());
    mount_to_body(move || view! { <TradeChart config=config /> });
}

/// Mount a [`TradeChart`] inside `target`.
pub fn mount_to_element(target: web_sys::HtmlElement, config: FeedConfig) {
    log_info!(COMPONENT, "mounting trade chart for {}", config.feed_url());
    mount_to(target, move || view! { <TradeChart config=config /> });
}
