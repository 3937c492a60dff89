use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use catalog::{Category, PlaceCatalog};
use clap::{Parser, Subcommand};
use discovery::{
    DetailView, FixedGeolocation, GeolocationError, GeolocationService, MapPage, MapStatusView,
    Notice, PageConfig, PageMessage, RecordingNavigator, SidebarView,
};
use foundation::{LatLng, PlaceId};
use mapping::{InMemoryMapProvider, ProviderError};
use runtime::{Envelope, PageIds};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the place discovery page")]
struct Args {
    /// Catalog JSON document (default: built-in catalog)
    #[arg(long, env = "DISCOVERY_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the catalog as JSON
    Catalog,

    /// Mount a page, replay a short session against it and print the views
    Session {
        /// Category tab to switch to (touristSpots, wildlife, hiddenGems, culturalSites)
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,

        /// Place id to pick from the sidebar list
        #[arg(long)]
        select: Option<u32>,

        /// Place id whose map marker is clicked
        #[arg(long)]
        open: Option<u32>,

        /// Locate result: `lat,lng` or one of denied, unsupported, unavailable
        #[arg(long, value_parser = parse_locate)]
        locate: Option<FixedGeolocation>,

        /// Simulate a map provider that fails to load
        #[arg(long)]
        provider_fails: bool,

        /// Delay before the map provider finishes loading
        #[arg(long, default_value_t = 50)]
        load_delay_ms: u64,
    },
}

#[derive(Serialize)]
struct SessionReport {
    sidebar: SidebarView,
    detail: Option<DetailView>,
    map: MapStatusView,
    notices: Vec<Notice>,
    external_links: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let catalog = Arc::new(load_catalog(args.catalog.as_deref())?);

    match args.command {
        Command::Catalog => println!("{}", catalog.to_json()?),
        Command::Session {
            category,
            select,
            open,
            locate,
            provider_fails,
            load_delay_ms,
        } => {
            let session = Session {
                category,
                select: select.map(PlaceId),
                open: open.map(PlaceId),
                locate,
                provider_fails,
                load_delay: Duration::from_millis(load_delay_ms),
            };
            let report = run_session(catalog, session).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<PlaceCatalog, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(PlaceCatalog::builtin());
    };
    let raw = std::fs::read_to_string(path)?;
    let catalog = PlaceCatalog::from_json(&raw)?;
    info!(path = %path.display(), places = catalog.len(), "catalog loaded");
    Ok(catalog)
}

struct Session {
    category: Option<Category>,
    select: Option<PlaceId>,
    open: Option<PlaceId>,
    locate: Option<FixedGeolocation>,
    provider_fails: bool,
    load_delay: Duration,
}

async fn run_session(
    catalog: Arc<PlaceCatalog>,
    session: Session,
) -> Result<SessionReport, Box<dyn std::error::Error>> {
    let config = PageConfig::from_env()?;
    let mut ids = PageIds::new();
    let id = ids.next_id();
    let mut page = MapPage::mount(
        id,
        catalog,
        InMemoryMapProvider::new(),
        RecordingNavigator::default(),
        config,
    )?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Envelope<PageMessage>>();

    let loader = tx.clone();
    let fails = session.provider_fails;
    let delay = session.load_delay;
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let outcome = if fails {
            Err(ProviderError::LoadFailed("provider script blocked".to_string()))
        } else {
            Ok(())
        };
        let _ = loader.send(Envelope::new(id, PageMessage::ProviderLoaded(outcome)));
    });

    let observer = tx.clone();
    tokio::spawn(async move {
        for fraction in [0.0, 0.05, 0.4, 1.0] {
            let _ = observer.send(Envelope::new(id, PageMessage::ViewportVisibility { fraction }));
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    });

    if let Some(provider) = session.locate {
        if let Some(ticket) = page.begin_locate() {
            let reply = tx.clone();
            tokio::spawn(async move {
                let service = GeolocationService::new(provider);
                let result = service.request_current_position().await;
                let _ = reply.send(Envelope::new(id, PageMessage::GeolocationResolved { ticket, result }));
            });
        }
    }

    // Posted while the provider may still be loading; the adapter keeps only
    // the latest marker sync.
    if let Some(category) = session.category {
        let _ = tx.send(Envelope::new(id, PageMessage::CategorySelected(category)));
    }
    drop(tx);

    while let Some(envelope) = rx.recv().await {
        page.dispatch(envelope);
    }

    if let Some(place) = session.select {
        page.dispatch(Envelope::new(id, PageMessage::ListItemClicked(place)));
    }
    if let Some(place) = session.open {
        let marker = page
            .adapter()
            .markers()
            .find(|(_, p)| *p == place)
            .and_then(|(m, _)| page.adapter().provider().click(m));
        match marker {
            Some(marker) => {
                page.dispatch(Envelope::new(id, PageMessage::MarkerClicked(marker)));
                page.dispatch(Envelope::new(id, PageMessage::OpenInMaps));
                page.dispatch(Envelope::new(id, PageMessage::OpenSocial));
            }
            None => warn!(%place, "no live marker for place"),
        }
    }

    let report = SessionReport {
        sidebar: page.sidebar_view(),
        detail: page.detail_view(),
        map: page.map_status_view(),
        notices: page.take_notices(),
        external_links: page.navigator().external.clone(),
    };
    page.teardown();
    Ok(report)
}

fn parse_category(raw: &str) -> Result<Category, String> {
    Category::from_key(raw).ok_or_else(|| {
        let keys: Vec<&str> = Category::ALL.iter().map(|c| c.key()).collect();
        format!("unknown category `{raw}` (expected one of {})", keys.join(", "))
    })
}

fn parse_locate(raw: &str) -> Result<FixedGeolocation, String> {
    match raw {
        "denied" => return Ok(FixedGeolocation::failing(GeolocationError::PermissionDenied)),
        "unsupported" => return Ok(FixedGeolocation::failing(GeolocationError::Unsupported)),
        "unavailable" => return Ok(FixedGeolocation::failing(GeolocationError::Unavailable)),
        _ => {}
    }
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected lat,lng, got `{raw}`"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude: {e}"))?;
    let lng: f64 = lng.trim().parse().map_err(|e| format!("longitude: {e}"))?;
    Ok(FixedGeolocation::at(LatLng::new(lat, lng)))
}

#[cfg(test)]
mod tests {
    use super::{parse_category, parse_locate};
    use catalog::Category;

    #[test]
    fn parses_category_keys() {
        assert_eq!(parse_category("hiddenGems"), Ok(Category::HiddenGems));
        assert!(parse_category("beaches").is_err());
    }

    #[test]
    fn parses_locate_forms() {
        assert!(parse_locate("23.3,85.3").is_ok());
        assert!(parse_locate("denied").is_ok());
        assert!(parse_locate("north").is_err());
        assert!(parse_locate("23.3,east").is_err());
    }
}
