//! Browser-facing adapters: the SSE transport, Chart.js bindings and the
//! console logging services.

pub mod chart_js;
pub mod services;
pub mod sse;
