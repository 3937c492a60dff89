//! End-to-end page behaviour driven through the message interface.

use std::collections::BTreeSet;
use std::sync::Arc;

use catalog::{Category, Place, PlaceCatalog};
use discovery::{
    FixedGeolocation, GeolocationError, GeolocationService, MapPage, PageConfig, PageMessage,
    RecordingNavigator, SelectionState,
};
use foundation::{LatLng, PlaceId};
use mapping::{InMemoryMapProvider, MarkerHandle};
use pretty_assertions::assert_eq;
use runtime::{Envelope, Mailbox, PageIds};

type Page = MapPage<InMemoryMapProvider, RecordingNavigator>;

const P1: PlaceId = PlaceId(1);
const P2: PlaceId = PlaceId(2);
const P3: PlaceId = PlaceId(3);

fn place(id: u32, name: &str, lat: f64, lng: f64, category: Category) -> Place {
    Place {
        id: PlaceId(id),
        name: name.to_string(),
        description: format!("{name} description"),
        position: LatLng::new(lat, lng),
        image: String::new(),
        category,
    }
}

fn small_catalog() -> Arc<PlaceCatalog> {
    let places = vec![
        place(1, "First Falls", 23.1, 85.1, Category::TouristSpots),
        place(2, "Second Hill", 23.2, 85.2, Category::TouristSpots),
        place(3, "Tiger Reserve", 23.9, 84.2, Category::Wildlife),
    ];
    Arc::new(PlaceCatalog::from_places(places).unwrap())
}

fn mount(catalog: Arc<PlaceCatalog>) -> Page {
    let mut ids = PageIds::new();
    MapPage::mount(
        ids.next_id(),
        catalog,
        InMemoryMapProvider::new(),
        RecordingNavigator::default(),
        PageConfig::default(),
    )
    .unwrap()
}

fn ready_page() -> Page {
    let mut page = mount(small_catalog());
    send(&mut page, PageMessage::ProviderLoaded(Ok(())));
    page
}

fn send(page: &mut Page, message: PageMessage) {
    let id = page.id();
    assert!(page.dispatch(Envelope::new(id, message)));
}

fn marker_for(page: &Page, id: PlaceId) -> MarkerHandle {
    page.adapter()
        .markers()
        .find(|(_, place)| *place == id)
        .map(|(marker, _)| marker)
        .unwrap()
}

/// Places represented by live provider markers, checked one-to-one.
fn live_marker_places(page: &Page) -> BTreeSet<PlaceId> {
    let provider = page.adapter().provider();
    assert_eq!(provider.marker_count(), page.adapter().marker_places().len());
    let places: BTreeSet<PlaceId> = page.adapter().marker_places().into_iter().collect();
    assert_eq!(places.len(), provider.marker_count());
    places
}

fn map_center(page: &Page) -> (LatLng, u8) {
    let (_, map) = page.adapter().provider().maps().next().unwrap();
    (map.center, map.zoom)
}

#[test]
fn scenario_a_category_change_resets_detail_and_markers() {
    let mut page = ready_page();
    let marker = marker_for(&page, P1);
    send(&mut page, PageMessage::MarkerClicked(marker));
    assert_eq!(page.selection(), SelectionState::DetailOpen(P1));

    send(&mut page, PageMessage::CategorySelected(Category::Wildlife));
    assert_eq!(page.selection(), SelectionState::Idle);
    assert_eq!(page.detail_view(), None);
    assert_eq!(live_marker_places(&page), BTreeSet::from([P3]));
}

#[test]
fn scenario_b_list_click_highlights_and_pans() {
    let mut page = ready_page();
    send(&mut page, PageMessage::ListItemClicked(P2));
    assert_eq!(page.selection(), SelectionState::Highlighted(P2));
    assert_eq!(map_center(&page), (LatLng::new(23.2, 85.2), 14));

    send(&mut page, PageMessage::DetailClosed);
    assert_eq!(page.selection(), SelectionState::Highlighted(P2));
}

#[test]
fn scenario_c_detail_close_retains_selection() {
    let mut page = ready_page();
    let marker = marker_for(&page, P2);
    send(&mut page, PageMessage::MarkerClicked(marker));
    assert_eq!(page.selection(), SelectionState::DetailOpen(P2));
    assert_eq!(page.detail_view().map(|d| d.id), Some(2));

    send(&mut page, PageMessage::DetailClosed);
    assert_eq!(page.selection(), SelectionState::Highlighted(P2));
    assert_eq!(page.sidebar_view().selected(), vec![2]);
}

#[tokio::test]
async fn scenario_d_permission_denied_leaves_location_unset() {
    let mut page = ready_page();
    let service = GeolocationService::new(FixedGeolocation::failing(GeolocationError::PermissionDenied));

    let ticket = page.begin_locate().unwrap();
    let result = service.request_current_position().await;
    send(&mut page, PageMessage::GeolocationResolved { ticket, result });

    assert_eq!(page.current_location(), None);
    assert!(!page.adapter().has_user_overlay());
    assert_eq!(page.adapter().provider().overlays().count(), 0);
    let notices = page.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(!page.is_locating());
}

#[tokio::test]
async fn locate_success_places_single_overlay() {
    let mut page = ready_page();
    let here = LatLng::new(23.35, 85.32);
    let service = GeolocationService::new(FixedGeolocation::at(here));

    for _ in 0..2 {
        let ticket = page.begin_locate().unwrap();
        let result = service.request_current_position().await;
        send(&mut page, PageMessage::GeolocationResolved { ticket, result });
    }
    assert_eq!(page.current_location(), Some(here));
    assert_eq!(page.adapter().provider().overlays().count(), 1);
    assert_eq!(map_center(&page), (here, 14));
}

#[test]
fn scenario_e_rapid_category_changes_before_provider_ready() {
    let mut page = mount(Arc::new(PlaceCatalog::builtin()));
    send(&mut page, PageMessage::CategorySelected(Category::Wildlife));
    send(&mut page, PageMessage::CategorySelected(Category::HiddenGems));
    send(&mut page, PageMessage::ProviderLoaded(Ok(())));

    let expected: BTreeSet<PlaceId> = PlaceCatalog::builtin()
        .by_category(Category::HiddenGems)
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(live_marker_places(&page), expected);
    assert_eq!(page.adapter().provider().stats().markers_created, 4);
}

#[test]
fn scenario_e_rapid_category_changes_on_live_map() {
    let mut page = mount(Arc::new(PlaceCatalog::builtin()));
    send(&mut page, PageMessage::ProviderLoaded(Ok(())));
    send(&mut page, PageMessage::CategorySelected(Category::Wildlife));
    send(&mut page, PageMessage::CategorySelected(Category::HiddenGems));

    assert_eq!(page.adapter().marker_category(), Some(Category::HiddenGems));
    assert_eq!(live_marker_places(&page).len(), 4);
}

#[test]
fn callbacks_after_teardown_are_dropped() {
    let mut page = mount(small_catalog());
    let id = page.id();
    let ticket = page.begin_locate().unwrap();
    let mut mailbox = Mailbox::new();
    mailbox.post(id, PageMessage::ProviderLoaded(Ok(())));
    mailbox.post(
        id,
        PageMessage::GeolocationResolved {
            ticket,
            result: Ok(LatLng::new(23.0, 85.0)),
        },
    );

    page.teardown();
    assert_eq!(page.pump(&mut mailbox), 0);
    assert_eq!(page.adapter().provider().map_count(), 0);
    assert_eq!(page.current_location(), None);
}

#[test]
fn remount_ignores_messages_for_previous_instance() {
    let mut ids = PageIds::new();
    let catalog = small_catalog();
    let first = ids.next_id();
    let second = ids.next_id();
    let mut page = MapPage::mount(
        second,
        catalog,
        InMemoryMapProvider::new(),
        RecordingNavigator::default(),
        PageConfig::default(),
    )
    .unwrap();

    assert!(!page.dispatch(Envelope::new(first, PageMessage::ProviderLoaded(Ok(())))));
    assert!(page.dispatch(Envelope::new(second, PageMessage::ProviderLoaded(Ok(())))));
    assert_eq!(page.adapter().provider().map_count(), 1);
}

#[test]
fn teardown_twice_matches_teardown_once() {
    let mut page = ready_page();
    let here = LatLng::new(23.0, 85.0);
    let ticket = page.begin_locate().unwrap();
    send(&mut page, PageMessage::GeolocationResolved { ticket, result: Ok(here) });
    assert_eq!(page.current_location(), Some(here));

    page.teardown();
    assert!(page.is_torn_down());
    assert_eq!(page.current_location(), None);
    assert_eq!(page.map_status_view().user_location, None);
    assert_eq!(page.adapter().user_location(), None);
    let once = page.adapter().provider().stats();
    page.teardown();
    let twice = page.adapter().provider().stats();
    assert_eq!(once, twice);
    assert_eq!(twice.maps_disposed, 1);
    assert_eq!(twice.stale_releases, 0);
    assert_eq!(page.adapter().provider().marker_count(), 0);
    assert_eq!(page.adapter().provider().overlays().count(), 0);
}

#[test]
fn catalog_and_sidebar_survive_provider_failure() {
    let mut page = mount(small_catalog());
    send(
        &mut page,
        PageMessage::ProviderLoaded(Err(mapping::ProviderError::LoadFailed("blocked".into()))),
    );
    send(&mut page, PageMessage::CategorySelected(Category::Wildlife));
    let sidebar = page.sidebar_view();
    assert_eq!(sidebar.places.len(), 1);
    assert_eq!(sidebar.places[0].name, "Tiger Reserve");
    assert_eq!(page.map_status_view().message, Some("Failed to load the map."));
}
