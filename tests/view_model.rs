use trade_chart_wasm::domain::errors::FeedError;
use trade_chart_wasm::domain::market_data::{
    Price, Symbol, Timestamp, TradeRecord, TradeSeries, Volume,
};
use trade_chart_wasm::domain::state::ViewState;
use trade_chart_wasm::presentation::{
    ChartConfig, FALLBACK_TITLE, Presentation, SERIES_LABEL, chart_title, format_price_label,
    present,
};

fn trade(price: f64, ts: u64, symbol: &str) -> TradeRecord {
    TradeRecord::new(
        Price::from(price),
        Volume::from(5.0),
        Timestamp::from_millis(ts),
        &["@".to_string()],
        Symbol::from(symbol),
    )
}

fn series(trades: Vec<TradeRecord>) -> TradeSeries {
    trades.into_iter().collect()
}

#[test]
fn error_renders_message_only() {
    let mut state = ViewState::Loading;
    state.fail(&FeedError::Timeout);
    assert_eq!(
        present(&state),
        Presentation::Error {
            message: "API server is not responding. Please try again later.".to_string()
        }
    );
}

#[test]
fn loading_renders_placeholder() {
    assert_eq!(present(&ViewState::Loading), Presentation::Loading);
}

#[test]
fn ready_maps_timestamps_to_x_and_prices_to_y() {
    let state = ViewState::Ready(series(vec![
        trade(101.5, 1_700_000_000_000, "AAPL"),
        trade(99.25, 1_699_999_999_000, "AAPL"),
    ]));
    let Presentation::Chart(config) = present(&state) else {
        panic!("expected a chart");
    };

    assert_eq!(config.data.labels, vec![1_700_000_000_000, 1_699_999_999_000]);
    assert_eq!(config.data.datasets.len(), 1);
    assert_eq!(config.data.datasets[0].label, SERIES_LABEL);
    assert_eq!(config.data.datasets[0].data, vec![101.5, 99.25]);
}

#[test]
fn title_uses_first_records_symbol() {
    let trades = series(vec![trade(1.0, 1, "AAPL"), trade(2.0, 2, "MSFT")]);
    assert_eq!(chart_title(&trades), "Symbol : AAPL");
    assert_eq!(chart_title(&TradeSeries::new()), FALLBACK_TITLE);
    assert_eq!(ChartConfig::from_trades(&TradeSeries::new()).title(), "Trade Chart");
}

#[test]
fn tooltip_label_is_currency() {
    insta::assert_snapshot!(format_price_label(101.5), @"Price: $101.50");
    insta::assert_snapshot!(format_price_label(2.0), @"Price: $2.00");
}

#[test]
fn serialized_config_uses_library_option_names() {
    let config = ChartConfig::from_trades(&series(vec![trade(10.0, 60_000, "BINANCE:BTCUSDT")]));
    let json = serde_json::to_value(&config).unwrap();

    assert_eq!(json["type"], "line");
    assert_eq!(json["data"]["datasets"][0]["borderColor"], "#00ADB5");
    assert_eq!(json["data"]["datasets"][0]["fill"], true);
    assert_eq!(json["options"]["maintainAspectRatio"], false);
    assert_eq!(json["options"]["plugins"]["title"]["text"], "Symbol : BINANCE:BTCUSDT");
    assert_eq!(json["options"]["plugins"]["legend"]["position"], "top");
    assert_eq!(json["options"]["scales"]["x"]["type"], "time");
    assert_eq!(json["options"]["scales"]["x"]["time"]["unit"], "minute");
    assert!(json["options"]["scales"]["y"].get("type").is_none());
}
