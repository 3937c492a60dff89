//! Headless map provider.
//!
//! Keeps every live map, marker and overlay in generational arenas so tests and
//! the headless explorer can observe exactly what a real SDK would be showing,
//! and catch leaked or double-released resources.

use foundation::{Arena, LatLng};
use tracing::warn;

use crate::provider::{
    MapId, MapOptions, MapProvider, MarkerHandle, MarkerSpec, OverlayHandle, ProviderError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LiveMap {
    pub container: String,
    pub center: LatLng,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveMarker {
    pub map: MapId,
    pub spec: MarkerSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveOverlay {
    pub map: MapId,
    pub position: LatLng,
}

/// Lifetime counters. `stale_releases` counts releases of handles that were
/// already gone, i.e. double frees.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ProviderStats {
    pub maps_created: u32,
    pub maps_disposed: u32,
    pub markers_created: u32,
    pub markers_removed: u32,
    pub overlays_created: u32,
    pub overlays_removed: u32,
    pub stale_releases: u32,
}

#[derive(Debug, Default)]
pub struct InMemoryMapProvider {
    maps: Arena<LiveMap>,
    markers: Arena<LiveMarker>,
    overlays: Arena<LiveOverlay>,
    stats: ProviderStats,
    marker_quota: Option<u32>,
}

impl InMemoryMapProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects marker creation once `quota` markers have been created in total.
    pub fn with_marker_quota(quota: u32) -> Self {
        Self {
            marker_quota: Some(quota),
            ..Self::default()
        }
    }

    pub fn stats(&self) -> ProviderStats {
        self.stats
    }

    pub fn map(&self, map: MapId) -> Option<&LiveMap> {
        self.maps.get(map.0)
    }

    pub fn maps(&self) -> impl Iterator<Item = (MapId, &LiveMap)> + '_ {
        self.maps.iter().map(|(h, m)| (MapId(h), m))
    }

    pub fn map_count(&self) -> usize {
        self.maps.len()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, &LiveMarker)> + '_ {
        self.markers.iter().map(|(h, m)| (MarkerHandle(h), m))
    }

    pub fn overlays(&self) -> impl Iterator<Item = (OverlayHandle, &LiveOverlay)> + '_ {
        self.overlays.iter().map(|(h, o)| (OverlayHandle(h), o))
    }

    /// Simulates a user click on a marker.
    ///
    /// Returns the handle only when the marker is still on the map, mirroring
    /// an SDK that never fires listeners of removed markers.
    pub fn click(&self, marker: MarkerHandle) -> Option<MarkerHandle> {
        self.markers.contains(marker.0).then_some(marker)
    }
}

impl MapProvider for InMemoryMapProvider {
    fn create_map(&mut self, container: &str, options: &MapOptions) -> Result<MapId, ProviderError> {
        let id = self.maps.alloc(LiveMap {
            container: container.to_string(),
            center: options.center,
            zoom: options.zoom,
        });
        self.stats.maps_created += 1;
        Ok(MapId(id))
    }

    fn dispose_map(&mut self, map: MapId) {
        if self.maps.release(map.0).is_none() {
            warn!("dispose of unknown map {}", map.0);
            self.stats.stale_releases += 1;
            return;
        }
        self.stats.maps_disposed += 1;
    }

    fn create_marker(
        &mut self,
        map: MapId,
        spec: &MarkerSpec,
    ) -> Result<MarkerHandle, ProviderError> {
        if !self.maps.contains(map.0) {
            return Err(ProviderError::UnknownMap);
        }
        if self
            .marker_quota
            .is_some_and(|quota| self.stats.markers_created >= quota)
        {
            return Err(ProviderError::Rejected("marker quota exceeded".to_string()));
        }
        let h = self.markers.alloc(LiveMarker {
            map,
            spec: spec.clone(),
        });
        self.stats.markers_created += 1;
        Ok(MarkerHandle(h))
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        if self.markers.release(marker.0).is_none() {
            warn!("remove of unknown marker {}", marker.0);
            self.stats.stale_releases += 1;
            return;
        }
        self.stats.markers_removed += 1;
    }

    fn pan_to(&mut self, map: MapId, position: LatLng) {
        if let Some(live) = self.maps.get_mut(map.0) {
            live.center = position;
        }
    }

    fn set_zoom(&mut self, map: MapId, zoom: u8) {
        if let Some(live) = self.maps.get_mut(map.0) {
            live.zoom = zoom;
        }
    }

    fn create_overlay(
        &mut self,
        map: MapId,
        position: LatLng,
    ) -> Result<OverlayHandle, ProviderError> {
        if !self.maps.contains(map.0) {
            return Err(ProviderError::UnknownMap);
        }
        let h = self.overlays.alloc(LiveOverlay { map, position });
        self.stats.overlays_created += 1;
        Ok(OverlayHandle(h))
    }

    fn remove_overlay(&mut self, overlay: OverlayHandle) {
        if self.overlays.release(overlay.0).is_none() {
            warn!("remove of unknown overlay {}", overlay.0);
            self.stats.stale_releases += 1;
            return;
        }
        self.stats.overlays_removed += 1;
    }
}
