//! Bindings to the Chart.js `Chart` class (expected as a page global).
//!
//! The declarative config is serialized with serde and parsed into a plain JS
//! object; only the tooltip callbacks are Rust closures.

use js_sys::{Array, JSON, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::domain::logging::LogComponent;
use crate::domain::market_data::TradeSeries;
use crate::presentation::chart_config::{ChartConfig, chart_title, format_price_label};
use crate::time_utils::format_trade_time;
use crate::{log_debug, log_info};

const COMPONENT: LogComponent = LogComponent::Infrastructure("ChartJs");

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<ChartJs, JsValue>;

    #[wasm_bindgen(method, js_class = "Chart")]
    fn update(this: &ChartJs, mode: &str);

    #[wasm_bindgen(method, js_class = "Chart")]
    fn destroy(this: &ChartJs);
}

type TooltipCallback = Closure<dyn Fn(JsValue) -> JsValue>;

/// A live chart drawn on one canvas. Dropping it destroys the chart.
pub struct ChartHandle {
    chart: ChartJs,
    canvas: HtmlCanvasElement,
    /// Points already handed to Chart.js.
    plotted: usize,
    _label: TooltipCallback,
    _title: TooltipCallback,
}

impl ChartHandle {
    pub fn create(canvas: &HtmlCanvasElement, config: &ChartConfig) -> Result<Self, JsValue> {
        let js_config = to_js_value(config)?;

        let label = TooltipCallback::new(|item: JsValue| {
            let raw = Reflect::get(&item, &"raw".into()).ok().and_then(|v| v.as_f64());
            raw.map(format_price_label).unwrap_or_default().into()
        });
        let title = TooltipCallback::new(|items: JsValue| {
            get_path(&items, &["0", "parsed", "x"])
                .ok()
                .and_then(|x| x.as_f64())
                .map(|millis| format_trade_time(millis as u64))
                .unwrap_or_default()
                .into()
        });

        let callbacks = Object::new();
        Reflect::set(&callbacks, &"label".into(), label.as_ref())?;
        Reflect::set(&callbacks, &"title".into(), title.as_ref())?;
        let tooltip = get_path(&js_config, &["options", "plugins", "tooltip"])?;
        Reflect::set(&tooltip, &"callbacks".into(), &callbacks)?;

        let chart = ChartJs::new(canvas, &js_config)?;
        log_info!(COMPONENT, "📈 Chart created: {}", config.title());

        Ok(Self {
            chart,
            canvas: canvas.clone(),
            plotted: config.data.labels.len(),
            _label: label,
            _title: title,
        })
    }

    /// Whether this chart draws on `canvas`.
    pub fn is_bound_to(&self, canvas: &HtmlCanvasElement) -> bool {
        AsRef::<JsValue>::as_ref(&self.canvas) == AsRef::<JsValue>::as_ref(canvas)
    }

    /// Push the trades this chart has not drawn yet, refresh the title and
    /// redraw without animation. `trades` must extend what was drawn before.
    pub fn extend(&mut self, trades: &TradeSeries) -> Result<(), JsValue> {
        let fresh = trades.as_slice().get(self.plotted..).unwrap_or_default();
        if fresh.is_empty() {
            return Ok(());
        }

        let labels: Array = get_path(&self.chart, &["data", "labels"])?.dyn_into()?;
        let prices: Array = get_path(&self.chart, &["data", "datasets", "0", "data"])?.dyn_into()?;
        for trade in fresh {
            labels.push(&JsValue::from(trade.timestamp.value() as f64));
            prices.push(&JsValue::from(trade.price.value()));
        }
        self.plotted = trades.len();

        let title_options = get_path(&self.chart, &["options", "plugins", "title"])?;
        Reflect::set(&title_options, &"text".into(), &chart_title(trades).into())?;
        self.chart.update("none");
        log_debug!(COMPONENT, "chart extended by {} points, {} total", fresh.len(), self.plotted);
        Ok(())
    }
}

impl Drop for ChartHandle {
    fn drop(&mut self) {
        self.chart.destroy();
        log_debug!(COMPONENT, "chart destroyed");
    }
}

/// Serialize to a plain JS object.
pub fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    JSON::parse(&json)
}

/// Walk nested properties, failing if any step is missing.
pub fn get_path(root: &JsValue, path: &[&str]) -> Result<JsValue, JsValue> {
    path.iter().try_fold(root.clone(), |node, key| {
        let next = Reflect::get(&node, &JsValue::from_str(key))?;
        if next.is_undefined() {
            return Err(JsValue::from_str(&format!("missing property `{key}`")));
        }
        Ok(next)
    })
}
