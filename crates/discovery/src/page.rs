//! The mounted discovery page.
//!
//! `MapPage` owns every component for one page instance and is the only thing
//! that mutates them. Input arrives as [`PageMessage`]s addressed by
//! [`PageId`]; messages for another instance, or for this one after teardown,
//! are dropped before they reach any component.

use std::sync::Arc;

use catalog::{Category, Place, PlaceCatalog};
use foundation::LatLng;
use mapping::{MapProvider, MapRenderingAdapter, MapStyle};
use runtime::{Envelope, Mailbox, PageId};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, PageConfig};
use crate::geolocation::{GeolocationError, LocateControl, LocateTicket};
use crate::links::{self, Navigator};
use crate::message::PageMessage;
use crate::notice::{Notice, NoticeBoard};
use crate::presentation::{DetailView, MapPhase, MapStatusView, SidebarView, TooltipView};
use crate::selection::{Effect, SelectionCoordinator, SelectionState, Transition};
use crate::tooltip::CursorTooltip;
use crate::visibility::{SidebarState, ViewportVisibilityTrigger};

/// Category shown when the page first mounts.
pub const INITIAL_CATEGORY: Category = Category::TouristSpots;

pub struct MapPage<P: MapProvider, N: Navigator> {
    id: PageId,
    config: PageConfig,
    catalog: Arc<PlaceCatalog>,
    adapter: MapRenderingAdapter<P>,
    selection: SelectionCoordinator,
    trigger: ViewportVisibilityTrigger,
    sidebar: SidebarState,
    tooltip: CursorTooltip,
    locate: LocateControl,
    current_location: Option<LatLng>,
    notices: NoticeBoard,
    navigator: N,
    torn_down: bool,
}

impl<P: MapProvider, N: Navigator> MapPage<P, N> {
    /// Mounts a page: requests the map surface and queues the initial marker
    /// sync. Both are deferred by the adapter until the provider is ready.
    pub fn mount(
        id: PageId,
        catalog: Arc<PlaceCatalog>,
        provider: P,
        navigator: N,
        config: PageConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut adapter = MapRenderingAdapter::new(provider, catalog.clone(), MapStyle::night());
        let handle = adapter.initialize(&config.container, config.initial_center, config.initial_zoom);
        info!(page = %id, ?handle, places = catalog.len(), "page mounted");

        let mut page = Self {
            id,
            selection: SelectionCoordinator::new(catalog.clone(), INITIAL_CATEGORY, config.detail_zoom),
            trigger: ViewportVisibilityTrigger::new(config.visibility_threshold),
            config,
            catalog,
            adapter,
            sidebar: SidebarState::new(),
            tooltip: CursorTooltip::new(),
            locate: LocateControl::new(),
            current_location: None,
            notices: NoticeBoard::new(),
            navigator,
            torn_down: false,
        };
        let mount = page.selection.on_mount();
        page.apply(mount);
        Ok(page)
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn selection(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn active_category(&self) -> Category {
        self.selection.active_category()
    }

    pub fn current_location(&self) -> Option<LatLng> {
        self.current_location
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar.is_open()
    }

    pub fn is_locating(&self) -> bool {
        self.locate.is_loading()
    }

    pub fn adapter(&self) -> &MapRenderingAdapter<P> {
        &self.adapter
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Handles one message. Returns `false` if it was dropped unhandled.
    pub fn dispatch(&mut self, envelope: Envelope<PageMessage>) -> bool {
        let Envelope { page, message } = envelope;
        if page != self.id {
            debug!(to = %page, me = %self.id, kind = message.kind(), "message for another page dropped");
            return false;
        }
        if self.torn_down {
            debug!(page = %self.id, kind = message.kind(), "message after teardown dropped");
            return false;
        }
        self.handle(message);
        true
    }

    /// Drains `mailbox` in arrival order. Returns how many messages were handled.
    pub fn pump(&mut self, mailbox: &mut Mailbox<PageMessage>) -> usize {
        let mut handled = 0;
        while let Some(envelope) = mailbox.pop() {
            if self.dispatch(envelope) {
                handled += 1;
            }
        }
        handled
    }

    /// Starts a "locate me" request. `None` while one is already in flight or
    /// after teardown; the caller runs the lookup and posts
    /// [`PageMessage::GeolocationResolved`] with the ticket.
    pub fn begin_locate(&mut self) -> Option<LocateTicket> {
        if self.torn_down {
            return None;
        }
        let ticket = self.locate.begin();
        if ticket.is_none() {
            debug!(page = %self.id, "locate already in progress");
        }
        ticket
    }

    /// Releases the map and stops accepting messages. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.current_location = None;
        self.notices.clear();
        self.locate.reset();
        self.tooltip.force_hide();
        self.adapter.dispose();
        info!(page = %self.id, "page torn down");
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }

    pub fn sidebar_view(&self) -> SidebarView {
        let category = self.selection.active_category();
        SidebarView::build(
            self.sidebar.is_open(),
            category,
            self.catalog.by_category(category),
            self.selection.state(),
        )
    }

    /// Present exactly while the selection is `DetailOpen`.
    pub fn detail_view(&self) -> Option<DetailView> {
        self.detail_place().map(DetailView::build)
    }

    pub fn map_status_view(&self) -> MapStatusView {
        let phase = MapPhase::from_status(self.adapter.status());
        let (x, y) = self.tooltip.position();
        MapStatusView {
            message: phase.message(),
            phase,
            markers: self.adapter.marker_places().len(),
            locating: self.locate.is_loading(),
            user_location: self.current_location.map(|p| [p.lat, p.lng]),
            tooltip: TooltipView {
                visible: self.tooltip.is_visible(),
                text: CursorTooltip::TEXT,
                x,
                y,
            },
        }
    }

    fn handle(&mut self, message: PageMessage) {
        match message {
            PageMessage::ProviderLoaded(outcome) => self.adapter.on_provider_status(outcome),
            PageMessage::MarkerClicked(marker) => match self.adapter.resolve_marker(marker) {
                Some(id) => {
                    let t = self.selection.on_marker_click(id);
                    self.apply(t);
                }
                None => debug!(?marker, "click on a marker that is no longer live"),
            },
            PageMessage::ListItemClicked(id) => {
                let t = self.selection.on_list_item_click(id);
                self.apply(t);
            }
            PageMessage::CategorySelected(category) => {
                let t = self.selection.on_category_change(category);
                self.apply(t);
            }
            PageMessage::DetailClosed => {
                let t = self.selection.on_detail_close();
                self.apply(t);
            }
            PageMessage::ViewportVisibility { fraction } => {
                if self.trigger.observe(fraction) {
                    self.sidebar.auto_open_once();
                }
            }
            PageMessage::GeolocationResolved { ticket, result } => self.on_located(ticket, result),
            PageMessage::PointerEntered => {
                self.tooltip.pointer_enter(self.selection.state().is_detail_open())
            }
            PageMessage::PointerMoved { x, y } => self.tooltip.pointer_move(x, y),
            PageMessage::PointerLeft => self.tooltip.pointer_leave(),
            PageMessage::SidebarToggled => self.sidebar.toggle(),
            PageMessage::OpenInMaps => {
                let url = self.detail_place().and_then(|p| links::maps_search_url(p.position));
                match url {
                    Some(url) => self.navigator.open_external(&url),
                    None => debug!("no directions target"),
                }
            }
            PageMessage::OpenSocial => {
                if let Some(url) = self.detail_place().map(|p| links::social_tag_url(&p.name)) {
                    self.navigator.open_external(&url);
                }
            }
            PageMessage::OpenPreview => {
                if let Some(path) = self.detail_place().map(|p| links::preview_path(&p.name)) {
                    self.navigator.navigate(&path);
                }
            }
        }
    }

    fn on_located(&mut self, ticket: LocateTicket, result: Result<LatLng, GeolocationError>) {
        if !self.locate.finish(ticket) {
            debug!(?ticket, "geolocation result for a request that is not pending");
            return;
        }
        match result {
            Ok(position) => {
                info!(%position, "user located");
                self.current_location = Some(position);
                self.adapter.show_user_location(position);
                self.adapter.pan_to(position, self.config.locate_zoom);
            }
            Err(err) => {
                warn!("locate failed: {err}");
                self.notices.push(Notice::geolocation(err));
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        for effect in transition.effects {
            match effect {
                Effect::PanTo { position, zoom } => self.adapter.pan_to(position, zoom),
                Effect::SyncMarkers(category) => self.adapter.sync_markers(category),
                Effect::HideTooltip => self.tooltip.force_hide(),
            }
        }
    }

    fn detail_place(&self) -> Option<&Place> {
        let id = self.selection.state().detail()?;
        self.catalog.find(id).ok()
    }
}

impl<P: MapProvider, N: Navigator> Drop for MapPage<P, N> {
    fn drop(&mut self) {
        self.teardown();
    }
}
