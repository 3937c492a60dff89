pub mod adapter;
pub mod memory;
pub mod provider;
pub mod style;

pub use adapter::*;
pub use memory::*;
pub use provider::*;
pub use style::*;
