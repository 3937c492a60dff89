//! Serializable view models handed to whatever renders the page.

use catalog::{Category, Place};
use mapping::ProviderStatus;
use serde::Serialize;

use crate::links;
use crate::selection::SelectionState;

pub const SIDEBAR_FOOTER: &str = "Click on any place to view it on the map.";
pub const MAP_LOADING_TEXT: &str = "Loading Map...";
pub const MAP_FAILED_TEXT: &str = "Failed to load the map.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTab {
    pub key: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceItem {
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Icon file shown next to the entry; same as the marker icon.
    pub icon: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarView {
    pub open: bool,
    pub tabs: Vec<CategoryTab>,
    pub title: &'static str,
    pub places: Vec<PlaceItem>,
    pub footer: &'static str,
}

impl SidebarView {
    pub fn build(open: bool, active: Category, places: &[Place], selection: SelectionState) -> Self {
        let selected = selection.selected();
        Self {
            open,
            tabs: Category::ALL
                .iter()
                .map(|&c| CategoryTab {
                    key: c.key(),
                    label: c.label(),
                    active: c == active,
                })
                .collect(),
            title: active.label(),
            places: places
                .iter()
                .map(|p| PlaceItem {
                    id: p.id.get(),
                    name: p.name.clone(),
                    description: p.description.clone(),
                    icon: p.icon().name,
                    selected: selected == Some(p.id),
                })
                .collect(),
            footer: SIDEBAR_FOOTER,
        }
    }

    pub fn selected(&self) -> Vec<u32> {
        self.places.iter().filter(|p| p.selected).map(|p| p.id).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub maps_url: Option<String>,
    pub social_url: String,
    pub preview_path: String,
}

impl DetailView {
    pub fn build(place: &Place) -> Self {
        Self {
            id: place.id.get(),
            name: place.name.clone(),
            description: place.description.clone(),
            image: place.image.clone(),
            category: place.category.label(),
            lat: place.position.lat,
            lng: place.position.lng,
            maps_url: links::maps_search_url(place.position),
            social_url: links::social_tag_url(&place.name),
            preview_path: links::preview_path(&place.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapPhase {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipView {
    pub visible: bool,
    pub text: &'static str,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapStatusView {
    pub phase: MapPhase,
    /// Placeholder text while the map is not drawable.
    pub message: Option<&'static str>,
    pub markers: usize,
    pub locating: bool,
    /// `[lat, lng]` of the user marker, once known.
    pub user_location: Option<[f64; 2]>,
    pub tooltip: TooltipView,
}

impl MapPhase {
    pub fn from_status(status: ProviderStatus) -> Self {
        match status {
            ProviderStatus::Loading => MapPhase::Loading,
            ProviderStatus::Ready => MapPhase::Ready,
            ProviderStatus::Failed => MapPhase::Failed,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            MapPhase::Loading => Some(MAP_LOADING_TEXT),
            MapPhase::Ready => None,
            MapPhase::Failed => Some(MAP_FAILED_TEXT),
        }
    }
}
