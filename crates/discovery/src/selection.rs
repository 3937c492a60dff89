//! Selection state machine shared by the sidebar list, the map markers and the
//! detail panel.
//!
//! ```text
//!            list click             marker click
//!   Idle ───────────────▶ Highlighted ─────────────▶ DetailOpen
//!    ▲                      ▲    ▲                      │
//!    │  category change     │    └──── detail close ────┘
//!    └──────────────────────┴── (from any state) ────────
//! ```
//!
//! Transitions never touch the map directly; they return the [`Effect`]s the
//! page must apply, so the coordinator stays a pure function of its inputs.

use std::sync::Arc;

use catalog::{Category, PlaceCatalog};
use foundation::{LatLng, PlaceId};
use tracing::debug;

/// `DetailOpen` carries the same id as the highlight, so an open detail panel
/// without a selection is unrepresentable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Highlighted(PlaceId),
    DetailOpen(PlaceId),
}

impl SelectionState {
    pub fn selected(&self) -> Option<PlaceId> {
        match *self {
            SelectionState::Idle => None,
            SelectionState::Highlighted(id) | SelectionState::DetailOpen(id) => Some(id),
        }
    }

    pub fn detail(&self) -> Option<PlaceId> {
        match *self {
            SelectionState::DetailOpen(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_detail_open(&self) -> bool {
        matches!(self, SelectionState::DetailOpen(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PanTo { position: LatLng, zoom: u8 },
    SyncMarkers(Category),
    HideTooltip,
}

/// Effects produced by one transition, in application order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transition {
    pub effects: Vec<Effect>,
}

impl Transition {
    fn none() -> Self {
        Self::default()
    }

    fn with(effects: Vec<Effect>) -> Self {
        Self { effects }
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SelectionCoordinator {
    catalog: Arc<PlaceCatalog>,
    active_category: Category,
    state: SelectionState,
    detail_zoom: u8,
}

impl SelectionCoordinator {
    pub fn new(catalog: Arc<PlaceCatalog>, initial_category: Category, detail_zoom: u8) -> Self {
        Self {
            catalog,
            active_category: initial_category,
            state: SelectionState::Idle,
            detail_zoom,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn active_category(&self) -> Category {
        self.active_category
    }

    /// Effects needed to bring a fresh map in line with the active category.
    pub fn on_mount(&self) -> Transition {
        Transition::with(vec![Effect::SyncMarkers(self.active_category)])
    }

    /// Sidebar item click: highlight and fly to the place.
    pub fn on_list_item_click(&mut self, id: PlaceId) -> Transition {
        let Some(position) = self.position_in_active(id) else {
            return self.place_not_found(id);
        };
        self.state = SelectionState::Highlighted(id);
        Transition::with(vec![Effect::PanTo {
            position,
            zoom: self.detail_zoom,
        }])
    }

    /// Marker click: highlight, fly to the place and open its detail panel.
    ///
    /// Clicking the marker whose panel is already open changes nothing; the
    /// panel closes only through [`Self::on_detail_close`].
    pub fn on_marker_click(&mut self, id: PlaceId) -> Transition {
        if self.state == SelectionState::DetailOpen(id) {
            return Transition::none();
        }
        let Some(position) = self.position_in_active(id) else {
            return self.place_not_found(id);
        };
        self.state = SelectionState::DetailOpen(id);
        Transition::with(vec![
            Effect::PanTo {
                position,
                zoom: self.detail_zoom,
            },
            Effect::HideTooltip,
        ])
    }

    /// Closes the detail panel but keeps the highlight.
    pub fn on_detail_close(&mut self) -> Transition {
        if let SelectionState::DetailOpen(id) = self.state {
            self.state = SelectionState::Highlighted(id);
        }
        Transition::none()
    }

    /// Switches the active category. The previous selection pointed into a
    /// marker set that is about to be replaced, so it is dropped.
    pub fn on_category_change(&mut self, category: Category) -> Transition {
        debug!(from = %self.active_category, to = %category, "category change");
        self.active_category = category;
        self.state = SelectionState::Idle;
        Transition::with(vec![Effect::SyncMarkers(category)])
    }

    fn position_in_active(&self, id: PlaceId) -> Option<LatLng> {
        self.catalog
            .find_in(self.active_category, id)
            .ok()
            .map(|p| p.position)
    }

    fn place_not_found(&mut self, id: PlaceId) -> Transition {
        debug!(%id, category = %self.active_category, "place not in active category; resetting selection");
        self.state = SelectionState::Idle;
        Transition::none()
    }
}
