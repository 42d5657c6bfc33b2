//! Declarative chart description handed to the charting library.
//!
//! Field names follow the library's JSON option names (camelCase), so the
//! serialized form can be passed through untouched.

use serde::Serialize;

use crate::domain::market_data::TradeSeries;

pub const SERIES_LABEL: &str = "Price";
pub const FALLBACK_TITLE: &str = "Trade Chart";

const LINE_COLOR: &str = "#00ADB5";
const FILL_COLOR: &str = "rgba(0, 173, 181, 0.2)";
const TITLE_COLOR: &str = "#EEEEEE";
const LABEL_COLOR: &str = "#CCCCCC";
const GRID_COLOR: &str = "#555555";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// X values: trade times in epoch milliseconds.
    pub labels: Vec<u64>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<f64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub border_width: u32,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub title: TitleOptions,
    pub legend: LegendOptions,
    /// Callbacks are attached on the JS side, see `infrastructure::chart_js`.
    pub tooltip: TooltipOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
    pub color: &'static str,
    pub font: FontOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontOptions {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendOptions {
    pub display: bool,
    pub position: &'static str,
    pub labels: ColorOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TooltipOptions {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorOptions {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeOptions>,
    pub ticks: ColorOptions,
    pub grid: ColorOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeOptions {
    pub unit: &'static str,
}

impl ChartData {
    pub fn from_trades(trades: &TradeSeries) -> Self {
        let (labels, prices) =
            trades.iter().map(|trade| (trade.timestamp.value(), trade.price.value())).unzip();
        Self {
            labels,
            datasets: vec![Dataset {
                label: SERIES_LABEL,
                data: prices,
                border_color: LINE_COLOR,
                background_color: FILL_COLOR,
                border_width: 2,
                fill: true,
                tension: 0.1,
            }],
        }
    }
}

impl ChartConfig {
    pub fn from_trades(trades: &TradeSeries) -> Self {
        let axis_colors = || (ColorOptions { color: LABEL_COLOR }, ColorOptions { color: GRID_COLOR });
        let (x_ticks, x_grid) = axis_colors();
        let (y_ticks, y_grid) = axis_colors();

        Self {
            kind: "line",
            data: ChartData::from_trades(trades),
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: false,
                plugins: Plugins {
                    title: TitleOptions {
                        display: true,
                        text: chart_title(trades),
                        color: TITLE_COLOR,
                        font: FontOptions { size: 20 },
                    },
                    legend: LegendOptions {
                        display: true,
                        position: "top",
                        labels: ColorOptions { color: LABEL_COLOR },
                    },
                    tooltip: TooltipOptions { enabled: true },
                },
                scales: Scales {
                    x: Axis {
                        kind: Some("time"),
                        time: Some(TimeOptions { unit: "minute" }),
                        ticks: x_ticks,
                        grid: x_grid,
                    },
                    y: Axis { kind: None, time: None, ticks: y_ticks, grid: y_grid },
                },
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.options.plugins.title.text
    }
}

/// Title from the first record's symbol, or a generic one for an empty series.
pub fn chart_title(trades: &TradeSeries) -> String {
    trades
        .first()
        .map(|trade| format!("Symbol : {}", trade.symbol))
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

/// Tooltip line for one data point.
pub fn format_price_label(price: f64) -> String {
    format!("{SERIES_LABEL}: ${price:.2}")
}
