//! The map rendering provider as seen from the adapter.
//!
//! Real providers (a hosted JS SDK behind a bridge, a native tile renderer) and
//! the headless [`crate::InMemoryMapProvider`] implement [`MapProvider`]. Load
//! progress is not polled through the trait: the embedder reports the outcome
//! of the provider's asynchronous load to the adapter as a message.

use catalog::MarkerIcon;
use foundation::{Handle, LatLng};

use crate::style::MapStyle;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MapId(pub Handle);

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerHandle(pub Handle);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub Handle);

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub style: MapStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub title: String,
    pub icon: MarkerIcon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The SDK never became ready (script, network or quota failure).
    LoadFailed(String),
    /// A handle that the provider does not (or no longer) know.
    UnknownMap,
    /// The provider refused an operation.
    Rejected(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::LoadFailed(msg) => write!(f, "map provider failed to load: {msg}"),
            ProviderError::UnknownMap => write!(f, "unknown map instance"),
            ProviderError::Rejected(msg) => write!(f, "map provider rejected operation: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

pub trait MapProvider {
    fn create_map(&mut self, container: &str, options: &MapOptions) -> Result<MapId, ProviderError>;
    fn dispose_map(&mut self, map: MapId);

    fn create_marker(&mut self, map: MapId, spec: &MarkerSpec)
    -> Result<MarkerHandle, ProviderError>;
    fn remove_marker(&mut self, marker: MarkerHandle);

    fn pan_to(&mut self, map: MapId, position: LatLng);
    fn set_zoom(&mut self, map: MapId, zoom: u8);

    /// Non-interactive overlay drawn above markers.
    fn create_overlay(&mut self, map: MapId, position: LatLng)
    -> Result<OverlayHandle, ProviderError>;
    fn remove_overlay(&mut self, overlay: OverlayHandle);
}
