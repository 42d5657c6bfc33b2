//! Server-sent events transport for the trade feed: wire DTOs and the
//! browser `EventSource` adapter.

pub mod dto;
pub mod event_source;

pub use dto::*;
pub use event_source::*;
