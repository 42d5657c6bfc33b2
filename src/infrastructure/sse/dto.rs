use serde::{Deserialize, Deserializer, de};
use serde_json::{Number, Value};
use strum::EnumString;

use crate::domain::errors::{FeedError, FeedResult};
use crate::domain::market_data::{Price, Symbol, Timestamp, TradeRecord, Volume};

/// DTO for one trade entry of a `"trade"` message
#[derive(Debug, Deserialize)]
pub struct TradeEntryDto {
    #[serde(rename = "p")]
    pub price: f64,
    #[serde(rename = "v")]
    pub volume: f64,
    #[serde(rename = "t", deserialize_with = "epoch_millis")]
    pub timestamp: u64,
    #[serde(rename = "c")]
    pub conditions: Vec<String>,
    #[serde(rename = "s")]
    pub symbol: String,
}

impl TradeEntryDto {
    pub fn to_domain_trade(&self) -> TradeRecord {
        TradeRecord::new(
            Price::from(self.price),
            Volume::from(self.volume),
            Timestamp::from_millis(self.timestamp),
            &self.conditions,
            Symbol::from(self.symbol.as_str()),
        )
    }
}

/// Epoch milliseconds from any non-negative JSON number; fractions are truncated.
fn epoch_millis<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    if let Some(millis) = number.as_u64() {
        return Ok(millis);
    }
    match number.as_f64() {
        Some(millis) if millis.is_finite() && (0.0..u64::MAX as f64).contains(&millis) => {
            Ok(millis as u64)
        }
        _ => Err(de::Error::custom(format!("invalid epoch milliseconds: {number}"))),
    }
}

/// Message type tags this client acts on. Anything else is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum FeedMessageKind {
    #[strum(serialize = "trade")]
    Trade,
}

/// A decoded feed message
#[derive(Debug, Clone, PartialEq)]
pub enum FeedMessage {
    Trades(Vec<TradeRecord>),
    /// Valid JSON with a type tag other than `"trade"`.
    Ignored,
}

/// Decode one SSE `data` payload.
///
/// Non-trade messages are only inspected for their `type`. A bare `null`
/// has no `type` to inspect and is rejected.
pub fn decode_feed_message(payload: &str) -> FeedResult<FeedMessage> {
    let mut envelope: Value = serde_json::from_str(payload)?;
    if envelope.is_null() {
        return Err(FeedError::MalformedMessage("null message".into()));
    }

    let kind = envelope
        .get("type")
        .and_then(Value::as_str)
        .and_then(|tag| tag.parse::<FeedMessageKind>().ok());

    match kind {
        Some(FeedMessageKind::Trade) => {
            let data = envelope
                .get_mut("data")
                .map(Value::take)
                .ok_or_else(|| FeedError::MalformedMessage("trade message without data".into()))?;
            let entries: Vec<TradeEntryDto> = serde_json::from_value(data)?;
            Ok(FeedMessage::Trades(entries.iter().map(TradeEntryDto::to_domain_trade).collect()))
        }
        None => Ok(FeedMessage::Ignored),
    }
}
