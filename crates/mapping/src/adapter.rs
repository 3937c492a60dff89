//! Lifecycle owner for the map surface, its markers and the user-location overlay.
//!
//! The adapter is the only thing that talks to a [`MapProvider`]. Callers may
//! issue any operation at any time; what happens depends on the provider status:
//!
//! - `Loading`: the latest initialize request, category and user location are
//!   remembered and applied once, when the load succeeds.
//! - `Ready`: operations go straight to the provider.
//! - `Failed`: operations are logged and dropped.
//!
//! After [`MapRenderingAdapter::dispose`] every operation is a no-op.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use catalog::{Category, PlaceCatalog};
use foundation::{LatLng, PlaceId};
use tracing::{debug, error, info, warn};

use crate::provider::{
    MapId, MapOptions, MapProvider, MarkerHandle, MarkerSpec, OverlayHandle, ProviderError,
    ProviderStatus,
};
use crate::style::MapStyle;

static NEXT_MAP_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Identity of the one map surface an adapter owns. Stable across the
/// provider's load, unique across remounts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MapHandle(u64);

impl MapHandle {
    fn next() -> Self {
        MapHandle(NEXT_MAP_HANDLE.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone)]
struct SurfaceRequest {
    container: String,
    center: LatLng,
    zoom: u8,
}

pub struct MapRenderingAdapter<P: MapProvider> {
    provider: P,
    catalog: Arc<PlaceCatalog>,
    style: MapStyle,
    status: ProviderStatus,
    handle: Option<MapHandle>,
    request: Option<SurfaceRequest>,
    map: Option<MapId>,
    // Invariant: either empty or in bijection with `catalog.by_category(marker_category)`.
    markers: Vec<(MarkerHandle, PlaceId)>,
    marker_category: Option<Category>,
    pending_category: Option<Category>,
    overlay: Option<OverlayHandle>,
    user_location: Option<LatLng>,
    disposed: bool,
}

impl<P: MapProvider> MapRenderingAdapter<P> {
    pub fn new(provider: P, catalog: Arc<PlaceCatalog>, style: MapStyle) -> Self {
        Self {
            provider,
            catalog,
            style,
            status: ProviderStatus::Loading,
            handle: None,
            request: None,
            map: None,
            markers: Vec::new(),
            marker_category: None,
            pending_category: None,
            overlay: None,
            user_location: None,
            disposed: false,
        }
    }

    pub fn status(&self) -> ProviderStatus {
        self.status
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// True once the provider has produced a live map instance.
    pub fn has_surface(&self) -> bool {
        self.map.is_some()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Category the live marker set was built from.
    pub fn marker_category(&self) -> Option<Category> {
        self.marker_category
    }

    /// Places that currently have a marker, in marker creation order.
    pub fn marker_places(&self) -> Vec<PlaceId> {
        self.markers.iter().map(|(_, id)| *id).collect()
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, PlaceId)> + '_ {
        self.markers.iter().copied()
    }

    pub fn user_location(&self) -> Option<LatLng> {
        self.user_location
    }

    pub fn has_user_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Creates the map surface, once.
    ///
    /// The first call wins; later calls (repeated mount effects) return the
    /// existing handle without touching the provider.
    pub fn initialize(&mut self, container: &str, center: LatLng, zoom: u8) -> MapHandle {
        if let Some(handle) = self.handle {
            debug!(?handle, "map already initialized");
            return handle;
        }
        let handle = MapHandle::next();
        self.handle = Some(handle);
        self.request = Some(SurfaceRequest {
            container: container.to_string(),
            center,
            zoom,
        });

        if self.disposed {
            warn!(?handle, "initialize after dispose ignored");
            return handle;
        }
        match self.status {
            ProviderStatus::Ready => self.realize(),
            ProviderStatus::Loading => debug!(?handle, "map creation deferred until provider is ready"),
            ProviderStatus::Failed => warn!(?handle, "map provider unavailable; surface not created"),
        }
        handle
    }

    /// Applies the outcome of the provider's asynchronous load.
    ///
    /// Only the first outcome counts; results arriving after dispose are dropped.
    pub fn on_provider_status(&mut self, outcome: Result<(), ProviderError>) {
        if self.disposed {
            debug!("provider load result after dispose dropped");
            return;
        }
        if self.status != ProviderStatus::Loading {
            debug!(status = ?self.status, "provider load already settled");
            return;
        }
        match outcome {
            Ok(()) => {
                info!("map provider ready");
                self.status = ProviderStatus::Ready;
                self.realize();
            }
            Err(err) => {
                warn!("{err}; map operations will be dropped");
                self.status = ProviderStatus::Failed;
                self.pending_category = None;
            }
        }
    }

    /// Replaces the whole marker set with one marker per place of `category`.
    pub fn sync_markers(&mut self, category: Category) {
        if self.disposed {
            debug!(%category, "sync_markers after dispose dropped");
            return;
        }
        match (self.status, self.map) {
            (ProviderStatus::Failed, _) => {
                warn!(%category, "map provider unavailable; marker sync dropped");
            }
            (_, Some(map)) => self.rebuild_markers(map, category),
            (_, None) => {
                if let Some(previous) = self.pending_category.replace(category) {
                    debug!(%previous, %category, "pending marker sync superseded");
                } else {
                    debug!(%category, "marker sync deferred until map exists");
                }
            }
        }
    }

    /// Recentres and rezooms the live map. Silently dropped before the map exists.
    pub fn pan_to(&mut self, position: LatLng, zoom: u8) {
        if self.disposed {
            return;
        }
        if self.status == ProviderStatus::Failed {
            warn!(%position, "map provider unavailable; pan dropped");
            return;
        }
        let Some(map) = self.map else {
            debug!(%position, "pan before map exists dropped");
            return;
        };
        self.provider.pan_to(map, position);
        self.provider.set_zoom(map, zoom);
    }

    /// Creates or moves the single user-location overlay.
    pub fn show_user_location(&mut self, position: LatLng) {
        if self.disposed {
            return;
        }
        self.user_location = Some(position);
        if self.status == ProviderStatus::Failed {
            warn!(%position, "map provider unavailable; location overlay dropped");
            return;
        }
        let Some(map) = self.map else {
            debug!(%position, "location overlay deferred until map exists");
            return;
        };
        self.place_overlay(map, position);
    }

    /// Maps a clicked marker back to its place. Markers from a torn-down set
    /// resolve to `None`.
    pub fn resolve_marker(&self, marker: MarkerHandle) -> Option<PlaceId> {
        self.markers
            .iter()
            .find(|(h, _)| *h == marker)
            .map(|(_, id)| *id)
    }

    /// Releases the map, every marker and the overlay. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.clear_markers();
        if let Some(overlay) = self.overlay.take() {
            self.provider.remove_overlay(overlay);
        }
        if let Some(map) = self.map.take() {
            self.provider.dispose_map(map);
        }
        self.pending_category = None;
        self.request = None;
        self.user_location = None;
        debug!(handle = ?self.handle, "map adapter disposed");
    }

    fn realize(&mut self) {
        if self.map.is_some() {
            return;
        }
        let Some(request) = self.request.clone() else {
            return;
        };
        let options = MapOptions {
            center: request.center,
            zoom: request.zoom,
            style: self.style.clone(),
        };
        match self.provider.create_map(&request.container, &options) {
            Ok(map) => {
                debug!(container = %request.container, "map surface created");
                self.map = Some(map);
                if let Some(category) = self.pending_category.take() {
                    self.rebuild_markers(map, category);
                }
                if let Some(position) = self.user_location {
                    self.place_overlay(map, position);
                }
            }
            Err(err) => {
                error!("map creation failed: {err}");
                self.status = ProviderStatus::Failed;
                self.pending_category = None;
            }
        }
    }

    fn rebuild_markers(&mut self, map: MapId, category: Category) {
        self.pending_category = None;
        self.clear_markers();

        let catalog = Arc::clone(&self.catalog);
        let mut created = Vec::with_capacity(catalog.by_category(category).len());
        for place in catalog.by_category(category) {
            let spec = MarkerSpec {
                position: place.position,
                title: place.name.clone(),
                icon: place.icon(),
            };
            match self.provider.create_marker(map, &spec) {
                Ok(marker) => created.push((marker, place.id)),
                Err(err) => {
                    error!(%category, "marker creation failed for {}: {err}", place.id);
                    for (marker, _) in created {
                        self.provider.remove_marker(marker);
                    }
                    return;
                }
            }
        }
        debug!(%category, count = created.len(), "markers synced");
        self.markers = created;
        self.marker_category = Some(category);
    }

    fn clear_markers(&mut self) {
        for (marker, _) in self.markers.drain(..) {
            self.provider.remove_marker(marker);
        }
        self.marker_category = None;
    }

    fn place_overlay(&mut self, map: MapId, position: LatLng) {
        if let Some(previous) = self.overlay.take() {
            self.provider.remove_overlay(previous);
        }
        match self.provider.create_overlay(map, position) {
            Ok(overlay) => self.overlay = Some(overlay),
            Err(err) => warn!(%position, "location overlay failed: {err}"),
        }
    }
}

impl<P: MapProvider> Drop for MapRenderingAdapter<P> {
    fn drop(&mut self) {
        self.dispose();
    }
}
