use crate::domain::state::ViewState;
use crate::presentation::chart_config::ChartConfig;

/// What to put on screen for a given [`ViewState`].
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    Error { message: String },
    Loading,
    Chart(ChartConfig),
}

/// Render rule: a pure function of the view state.
pub fn present(state: &ViewState) -> Presentation {
    match state {
        ViewState::Error(message) => Presentation::Error { message: message.clone() },
        ViewState::Loading => Presentation::Loading,
        ViewState::Ready(trades) => Presentation::Chart(ChartConfig::from_trades(trades)),
    }
}
