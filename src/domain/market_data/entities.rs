use super::value_objects::{Price, Symbol, Timestamp, Volume};

/// Separator used when flattening trade condition codes into one label.
pub const CONDITIONS_SEPARATOR: &str = ", ";

/// Domain entity - a single executed trade
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub price: Price,
    pub volume: Volume,
    pub timestamp: Timestamp,
    /// Condition codes joined with [`CONDITIONS_SEPARATOR`].
    pub conditions: String,
    pub symbol: Symbol,
}

impl TradeRecord {
    pub fn new(
        price: Price,
        volume: Volume,
        timestamp: Timestamp,
        conditions: &[String],
        symbol: Symbol,
    ) -> Self {
        Self { price, volume, timestamp, conditions: conditions.join(CONDITIONS_SEPARATOR), symbol }
    }
}

/// Domain entity - trades in arrival order.
///
/// Append-only: records are never reordered, replaced or evicted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeSeries {
    trades: Vec<TradeRecord>,
}

impl TradeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a whole batch, keeping the order the feed delivered it in.
    pub fn append_batch(&mut self, batch: impl IntoIterator<Item = TradeRecord>) {
        self.trades.extend(batch);
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn first(&self) -> Option<&TradeRecord> {
        self.trades.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TradeRecord> {
        self.trades.iter()
    }

    pub fn as_slice(&self) -> &[TradeRecord] {
        &self.trades
    }
}

impl FromIterator<TradeRecord> for TradeSeries {
    fn from_iter<I: IntoIterator<Item = TradeRecord>>(iter: I) -> Self {
        Self { trades: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a TradeSeries {
    type Item = &'a TradeRecord;
    type IntoIter = std::slice::Iter<'a, TradeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.trades.iter()
    }
}
