pub mod event_bus;
pub mod latch;
pub mod lifecycle;

pub use event_bus::*;
pub use latch::*;
pub use lifecycle::*;
