//! Place discovery page: keeps the catalog sidebar, the live map, the user
//! location indicator and the detail panel consistent with each other.

pub mod config;
pub mod geolocation;
pub mod links;
pub mod message;
pub mod notice;
pub mod page;
pub mod presentation;
pub mod selection;
pub mod tooltip;
pub mod visibility;

pub use config::*;
pub use geolocation::*;
pub use links::*;
pub use message::*;
pub use notice::*;
pub use page::*;
pub use presentation::*;
pub use selection::*;
pub use tooltip::*;
pub use visibility::*;
