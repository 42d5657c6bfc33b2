//! Market data aggregate: trade value objects and the trade series.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
