use derive_more::{Constructor, Deref, Display, From, Into};

/// Value Object - trade price
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Value Object - traded quantity
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor)]
pub struct Volume(f64);

impl Volume {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Value Object - point in time, epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Constructor)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn from_millis(value: u64) -> Self {
        Self(value)
    }
}

/// Value Object - ticker symbol as the feed reports it.
///
/// The feed is trusted as-is, so no case folding happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self(value)
    }
}
