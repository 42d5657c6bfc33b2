pub mod feed_driver;
pub mod feed_session;

pub use feed_driver::*;
pub use feed_session::*;
