use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;
use trade_chart_wasm::application::FeedSession;
use trade_chart_wasm::domain::feed::{FeedConnection, FeedEvent};
use trade_chart_wasm::domain::market_data::{Price, Symbol, Timestamp, TradeRecord, Volume};
use trade_chart_wasm::domain::state::ViewState;
use trade_chart_wasm::infrastructure::sse::{FeedMessage, decode_feed_message};

type RawTrade = (u32, u16, u64, Vec<String>, String);

struct CountingConnection(Rc<Cell<usize>>);

impl FeedConnection for CountingConnection {
    fn close(self) {
        self.0.set(self.0.get() + 1);
    }
}

fn session() -> (FeedSession<CountingConnection>, Rc<Cell<usize>>) {
    let closes = Rc::new(Cell::new(0));
    (FeedSession::new(CountingConnection(closes.clone())), closes)
}

fn trade_payload(batch: &[RawTrade]) -> String {
    let data: Vec<_> = batch
        .iter()
        .map(|(p, v, t, c, s)| json!({ "p": f64::from(*p) / 100.0, "v": v, "t": t, "c": c, "s": s }))
        .collect();
    json!({ "type": "trade", "data": data }).to_string()
}

fn expected_records(batch: &[RawTrade]) -> Vec<TradeRecord> {
    batch
        .iter()
        .map(|(p, v, t, c, s)| {
            TradeRecord::new(
                Price::from(f64::from(*p) / 100.0),
                Volume::from(f64::from(*v)),
                Timestamp::from_millis(*t),
                c,
                Symbol::from(s.as_str()),
            )
        })
        .collect()
}

#[test]
fn single_trade_message_maps_every_field() {
    let payload =
        r#"{"type":"trade","data":[{"p":101.5,"v":10,"t":1700000000000,"c":["@"],"s":"AAPL"}]}"#;

    let (mut session, closes) = session();
    session.handle(FeedEvent::Message(payload.to_string()));

    let trades = session.state().trades().expect("state should be Ready");
    assert_eq!(trades.len(), 1);
    let trade = &trades.as_slice()[0];
    assert_eq!(trade.price.value(), 101.5);
    assert_eq!(trade.volume.value(), 10.0);
    assert_eq!(trade.symbol.value(), "AAPL");
    assert_eq!(trade.conditions, "@");
    assert_eq!(trade.timestamp.value(), 1_700_000_000_000);
    assert_eq!(closes.get(), 0);
}

#[test]
fn multiple_conditions_join_with_comma_space() {
    let payload = r#"{"type":"trade","data":[{"p":1,"v":1,"t":1,"c":["1","8","24"],"s":"X"}]}"#;
    let Ok(FeedMessage::Trades(batch)) = decode_feed_message(payload) else {
        panic!("expected a trade batch");
    };
    assert_eq!(batch[0].conditions, "1, 8, 24");
}

fn decoded_timestamp(raw_t: &str) -> Option<u64> {
    let payload = format!(r#"{{"type":"trade","data":[{{"p":1,"v":1,"t":{raw_t},"c":[],"s":"X"}}]}}"#);
    match decode_feed_message(&payload) {
        Ok(FeedMessage::Trades(batch)) => batch.first().map(|trade| trade.timestamp.value()),
        _ => None,
    }
}

#[test]
fn integer_timestamp_is_taken_verbatim() {
    assert_eq!(decoded_timestamp("1700000000000"), Some(1_700_000_000_000));
}

#[test]
fn decimal_timestamp_is_accepted() {
    assert_eq!(decoded_timestamp("1700000000000.0"), Some(1_700_000_000_000));
    assert_eq!(decoded_timestamp("1700000000123.9"), Some(1_700_000_000_123));
    assert_eq!(decoded_timestamp("1.7e12"), Some(1_700_000_000_000));
}

#[test]
fn decimal_timestamp_keeps_the_session_ready() {
    let payload = r#"{"type":"trade","data":[{"p":1,"v":1,"t":1700000000000.0,"c":[],"s":"X"}]}"#;
    let (mut session, closes) = session();
    session.handle(FeedEvent::Message(payload.to_string()));
    assert_eq!(session.state().trades().map(|t| t.len()), Some(1));
    assert!(session.is_connected());
    assert_eq!(closes.get(), 0);
}

#[test]
fn null_message_is_a_processing_error() {
    let (mut session, closes) = session();
    session.handle(FeedEvent::Message("null".to_string()));
    assert_eq!(session.state().error_message(), Some("Error processing trade data"));
    assert_eq!(closes.get(), 1);
}

#[test]
fn ping_message_is_ignored() {
    assert_eq!(decode_feed_message(r#"{"type":"ping"}"#), Ok(FeedMessage::Ignored));
}

#[quickcheck]
fn batches_append_in_arrival_order(first: Vec<RawTrade>, second: Vec<RawTrade>) -> bool {
    let (mut session, _) = session();
    session.handle(FeedEvent::Message(trade_payload(&first)));
    let after_first = session.state().trades().map(|t| t.len());
    session.handle(FeedEvent::Message(trade_payload(&second)));

    let mut expected = expected_records(&first);
    expected.extend(expected_records(&second));

    after_first == Some(first.len())
        && session.state().trades().map(|t| t.as_slice().to_vec()) == Some(expected)
}

#[quickcheck]
fn non_trade_messages_change_nothing(tag: String, seed: Vec<RawTrade>) -> TestResult {
    if tag == "trade" {
        return TestResult::discard();
    }

    let (mut loading, loading_closes) = session();
    loading.handle(FeedEvent::Message(json!({ "type": tag, "data": [1, 2, 3] }).to_string()));

    let (mut ready, ready_closes) = session();
    ready.handle(FeedEvent::Message(trade_payload(&seed)));
    let before = ready.state().clone();
    ready.handle(FeedEvent::Message(json!({ "type": tag, "data": null }).to_string()));

    TestResult::from_bool(
        *loading.state() == ViewState::Loading
            && *ready.state() == before
            && loading_closes.get() == 0
            && ready_closes.get() == 0,
    )
}
