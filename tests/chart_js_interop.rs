#![cfg(target_arch = "wasm32")]
use js_sys::Reflect;
use trade_chart_wasm::domain::market_data::{Price, Symbol, Timestamp, TradeRecord, Volume};
use trade_chart_wasm::infrastructure::chart_js::{ChartHandle, get_path, to_js_value};
use trade_chart_wasm::presentation::ChartConfig;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn config() -> ChartConfig {
    let trades = vec![TradeRecord::new(
        Price::from(101.5),
        Volume::from(10.0),
        Timestamp::from_millis(1_700_000_000_000),
        &["@".to_string()],
        Symbol::from("AAPL"),
    )];
    ChartConfig::from_trades(&trades.into_iter().collect())
}

#[wasm_bindgen_test]
fn config_becomes_plain_js_object() {
    let js = to_js_value(&config()).unwrap();
    assert_eq!(Reflect::get(&js, &"type".into()).unwrap(), JsValue::from_str("line"));
    let text = get_path(&js, &["options", "plugins", "title", "text"]).unwrap();
    assert_eq!(text.as_string().as_deref(), Some("Symbol : AAPL"));
    let price = get_path(&js, &["data", "datasets", "0", "data", "0"]).unwrap();
    assert_eq!(price.as_f64(), Some(101.5));
}

#[wasm_bindgen_test]
fn missing_path_is_an_error() {
    let js = to_js_value(&config()).unwrap();
    assert!(get_path(&js, &["options", "nope", "title"]).is_err());
}

#[wasm_bindgen_test]
fn chart_creation_fails_cleanly_without_the_library() {
    let document = gloo::utils::document();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();

    assert!(ChartHandle::create(&canvas, &config()).is_err());
}
