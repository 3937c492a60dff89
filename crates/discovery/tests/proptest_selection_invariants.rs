//! Property-based invariant tests for the discovery page.
//!
//! 1. After any category change the marker set is in bijection with the
//!    category's places
//! 2. An open detail panel always has a matching selection
//! 3. The visibility latch opens the sidebar at most once
//! 4. Arbitrary event sequences never panic and never leak provider objects

use std::collections::BTreeSet;
use std::sync::Arc;

use catalog::{Category, PlaceCatalog};
use discovery::{
    MapPage, PageConfig, PageMessage, RecordingNavigator, SelectionState, ViewportVisibilityTrigger,
};
use foundation::{LatLng, PlaceId};
use mapping::InMemoryMapProvider;
use proptest::prelude::*;
use runtime::{Envelope, PageId};

type Page = MapPage<InMemoryMapProvider, RecordingNavigator>;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    ProviderReady,
    Category(Category),
    ListClick(u32),
    /// Index into the current marker list.
    MarkerClick(usize),
    DetailClose,
    Visibility(f64),
    ToggleSidebar,
    Locate(bool),
    PointerEnter,
    PointerLeave,
}

fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::ProviderReady),
        3 => category_strategy().prop_map(Op::Category),
        3 => (0u32..20).prop_map(Op::ListClick),
        3 => (0usize..6).prop_map(Op::MarkerClick),
        2 => Just(Op::DetailClose),
        2 => (0.0f64..1.0).prop_map(Op::Visibility),
        1 => Just(Op::ToggleSidebar),
        1 => any::<bool>().prop_map(Op::Locate),
        1 => Just(Op::PointerEnter),
        1 => Just(Op::PointerLeave),
    ]
}

fn mount() -> Page {
    MapPage::mount(
        PageId(1),
        Arc::new(PlaceCatalog::builtin()),
        InMemoryMapProvider::new(),
        RecordingNavigator::default(),
        PageConfig::default(),
    )
    .unwrap()
}

fn send(page: &mut Page, message: PageMessage) {
    page.dispatch(Envelope::new(PageId(1), message));
}

fn apply(page: &mut Page, op: &Op) {
    match op {
        Op::ProviderReady => send(page, PageMessage::ProviderLoaded(Ok(()))),
        Op::Category(c) => send(page, PageMessage::CategorySelected(*c)),
        Op::ListClick(id) => send(page, PageMessage::ListItemClicked(PlaceId(*id))),
        Op::MarkerClick(i) => {
            let marker = page.adapter().markers().nth(*i).map(|(m, _)| m);
            if let Some(marker) = marker {
                send(page, PageMessage::MarkerClicked(marker));
            }
        }
        Op::DetailClose => send(page, PageMessage::DetailClosed),
        Op::Visibility(f) => send(page, PageMessage::ViewportVisibility { fraction: *f }),
        Op::ToggleSidebar => send(page, PageMessage::SidebarToggled),
        Op::Locate(ok) => {
            if let Some(ticket) = page.begin_locate() {
                let result = if *ok {
                    Ok(LatLng::new(23.3, 85.3))
                } else {
                    Err(discovery::GeolocationError::Unavailable)
                };
                send(page, PageMessage::GeolocationResolved { ticket, result });
            }
        }
        Op::PointerEnter => send(page, PageMessage::PointerEntered),
        Op::PointerLeave => send(page, PageMessage::PointerLeft),
    }
}

fn expected_places(category: Category) -> BTreeSet<PlaceId> {
    PlaceCatalog::builtin()
        .by_category(category)
        .iter()
        .map(|p| p.id)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Marker set bijection
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn markers_match_category_after_change(
        ops in prop::collection::vec(op_strategy(), 0..40),
        last in category_strategy(),
    ) {
        let mut page = mount();
        send(&mut page, PageMessage::ProviderLoaded(Ok(())));
        for op in &ops {
            apply(&mut page, op);
        }
        send(&mut page, PageMessage::CategorySelected(last));

        let markers = page.adapter().marker_places();
        let unique: BTreeSet<PlaceId> = markers.iter().copied().collect();
        prop_assert_eq!(unique.len(), markers.len());
        prop_assert_eq!(unique, expected_places(last));
        prop_assert_eq!(page.adapter().provider().marker_count(), markers.len());
        prop_assert_eq!(page.selection(), SelectionState::Idle);
    }

    #[test]
    fn deferred_syncs_collapse_to_last_category(
        categories in prop::collection::vec(category_strategy(), 1..8),
    ) {
        let mut page = mount();
        for c in &categories {
            send(&mut page, PageMessage::CategorySelected(*c));
        }
        send(&mut page, PageMessage::ProviderLoaded(Ok(())));

        let last = *categories.last().unwrap();
        let places: BTreeSet<PlaceId> = page.adapter().marker_places().into_iter().collect();
        prop_assert_eq!(places, expected_places(last));
        prop_assert_eq!(
            page.adapter().provider().stats().markers_created as usize,
            expected_places(last).len()
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Detail implies selection
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn detail_never_open_without_selection(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut page = mount();
        for op in &ops {
            apply(&mut page, op);
            let state = page.selection();
            if let Some(detail) = state.detail() {
                prop_assert_eq!(state.selected(), Some(detail));
                prop_assert!(page.detail_view().is_some());
                prop_assert!(!page.map_status_view().tooltip.visible);
            } else {
                prop_assert!(page.detail_view().is_none());
            }
            if let Some(selected) = state.selected() {
                let active = page.active_category();
                prop_assert!(PlaceCatalog::builtin().find_in(active, selected).is_ok());
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Visibility latch
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn visibility_latch_fires_at_most_once(
        threshold in 0.01f64..1.0,
        fractions in prop::collection::vec(0.0f64..1.0, 0..50),
    ) {
        let mut trigger = ViewportVisibilityTrigger::new(threshold);
        let fired = fractions.iter().filter(|f| trigger.observe(**f)).count();
        prop_assert!(fired <= 1);
        let crossed = fractions.iter().any(|f| *f >= threshold);
        prop_assert_eq!(fired == 1, crossed);
        prop_assert_eq!(trigger.has_fired(), crossed);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. No leaks
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn teardown_releases_everything(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut page = mount();
        for op in &ops {
            apply(&mut page, op);
        }
        prop_assert!(page.adapter().provider().overlays().count() <= 1);

        page.teardown();
        page.teardown();
        let provider = page.adapter().provider();
        let stats = provider.stats();
        prop_assert_eq!(provider.map_count(), 0);
        prop_assert_eq!(provider.marker_count(), 0);
        prop_assert_eq!(provider.overlays().count(), 0);
        prop_assert_eq!(stats.stale_releases, 0);
        prop_assert_eq!(stats.markers_created, stats.markers_removed);
    }
}
