use crate::domain::errors::FeedError;
use crate::domain::market_data::{TradeRecord, TradeSeries};

/// What the trade chart is currently showing.
///
/// `Loading` is the initial state. `Error` is terminal: once entered, every
/// further transition is refused.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Error(String),
    Ready(TradeSeries),
}

/// Data-free discriminant of [`ViewState`], cheap to compare on every update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Error(String),
    Ready,
}

/// Result of feeding an input into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed (including Ready -> Ready with more data).
    Applied,
    /// Input refused because the state is terminal.
    Ignored,
}

/// A visible change, as reported to observers: only the delta, never the
/// whole accumulated series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateChange<'a> {
    /// Trades appended in arrival order (possibly none, when leaving Loading).
    Appended(&'a [TradeRecord]),
    /// Terminal error with its user-facing message.
    Failed(&'a str),
}

impl ViewState {
    pub fn phase(&self) -> Phase {
        match self {
            ViewState::Loading => Phase::Loading,
            ViewState::Error(message) => Phase::Error(message.clone()),
            ViewState::Ready(_) => Phase::Ready,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewState::Error(_))
    }

    pub fn trades(&self) -> Option<&TradeSeries> {
        match self {
            ViewState::Ready(series) => Some(series),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Append a decoded batch. An empty batch still moves Loading to Ready.
    pub fn apply_batch(&mut self, batch: Vec<TradeRecord>) -> Transition {
        match self {
            ViewState::Error(_) => Transition::Ignored,
            ViewState::Ready(series) => {
                series.append_batch(batch);
                Transition::Applied
            }
            ViewState::Loading => {
                *self = ViewState::Ready(batch.into_iter().collect());
                Transition::Applied
            }
        }
    }

    /// Enter the terminal error state, dropping any accumulated trades.
    pub fn fail(&mut self, error: &FeedError) -> Transition {
        self.enter_error(error.to_string())
    }

    /// Replay a change reported by another copy of the state machine.
    pub fn apply_change(&mut self, change: StateChange<'_>) -> Transition {
        match change {
            StateChange::Appended(batch) => self.apply_batch(batch.to_vec()),
            StateChange::Failed(message) => self.enter_error(message.to_string()),
        }
    }

    fn enter_error(&mut self, message: String) -> Transition {
        if self.is_terminal() {
            return Transition::Ignored;
        }
        *self = ViewState::Error(message);
        Transition::Applied
    }
}
