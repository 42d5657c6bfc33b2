use wasm_bindgen::prelude::*;

use crate::config::FeedConfig;
use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;

/// Install panic hook, logger and clock.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::for_build());
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    get_logger().info(LogComponent::Presentation("Initialize"), "🚀 Trade chart initialized");
}

/// Mount the trade chart.
///
/// `base_url` overrides the backend the feed is read from. `target_id` names
/// the element to render into; without it the chart is appended to `<body>`.
#[wasm_bindgen]
pub fn mount_trade_chart(base_url: Option<String>, target_id: Option<String>) -> Result<(), JsValue> {
    let config = match base_url {
        Some(url) => FeedConfig::default().with_base_url(url),
        None => FeedConfig::default(),
    };

    let Some(target_id) = target_id else {
        app::mount_to_page(config);
        return Ok(());
    };

    let target = gloo::utils::document()
        .get_element_by_id(&target_id)
        .ok_or_else(|| JsValue::from_str(&format!("element #{target_id} not found")))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("element #{target_id} is not an HTML element")))?;

    app::mount_to_element(target, config);
    Ok(())
}
