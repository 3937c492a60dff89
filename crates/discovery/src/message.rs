use catalog::Category;
use foundation::{LatLng, PlaceId};
use mapping::{MarkerHandle, ProviderError};

use crate::geolocation::{GeolocationError, LocateTicket};

/// Everything that can happen to a mounted page: user input, provider
/// callbacks and completions of async work. Delivered wrapped in a
/// [`runtime::Envelope`] addressed to one page instance.
#[derive(Debug, Clone, PartialEq)]
pub enum PageMessage {
    ProviderLoaded(Result<(), ProviderError>),
    MarkerClicked(MarkerHandle),
    ListItemClicked(PlaceId),
    CategorySelected(Category),
    DetailClosed,
    ViewportVisibility { fraction: f64 },
    GeolocationResolved {
        ticket: LocateTicket,
        result: Result<LatLng, GeolocationError>,
    },
    PointerEntered,
    PointerMoved { x: f64, y: f64 },
    PointerLeft,
    SidebarToggled,
    /// Actions on the open detail panel.
    OpenInMaps,
    OpenSocial,
    OpenPreview,
}

impl PageMessage {
    /// Short name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            PageMessage::ProviderLoaded(_) => "provider_loaded",
            PageMessage::MarkerClicked(_) => "marker_clicked",
            PageMessage::ListItemClicked(_) => "list_item_clicked",
            PageMessage::CategorySelected(_) => "category_selected",
            PageMessage::DetailClosed => "detail_closed",
            PageMessage::ViewportVisibility { .. } => "viewport_visibility",
            PageMessage::GeolocationResolved { .. } => "geolocation_resolved",
            PageMessage::PointerEntered => "pointer_entered",
            PageMessage::PointerMoved { .. } => "pointer_moved",
            PageMessage::PointerLeft => "pointer_left",
            PageMessage::SidebarToggled => "sidebar_toggled",
            PageMessage::OpenInMaps => "open_in_maps",
            PageMessage::OpenSocial => "open_social",
            PageMessage::OpenPreview => "open_preview",
        }
    }
}
