//! Categorized, read-only place reference data.
//!
//! A `PlaceCatalog` is built once at startup and never mutated afterwards, so it
//! can be shared freely (`Arc<PlaceCatalog>`) between the sidebar, the map
//! adapter and the selection coordinator without locking.

use std::collections::BTreeMap;

use foundation::{LatLng, PlaceId};
use serde::{Deserialize, Serialize};

mod seed;

/// Fixed set of place groupings. Declaration order is tab order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    TouristSpots,
    Wildlife,
    HiddenGems,
    CulturalSites,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::TouristSpots,
        Category::Wildlife,
        Category::HiddenGems,
        Category::CulturalSites,
    ];

    /// Stable key used in JSON documents and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Category::TouristSpots => "touristSpots",
            Category::Wildlife => "wildlife",
            Category::HiddenGems => "hiddenGems",
            Category::CulturalSites => "culturalSites",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::TouristSpots => "Tourist Spots",
            Category::Wildlife => "Wildlife",
            Category::HiddenGems => "Hidden Gems",
            Category::CulturalSites => "Cultural Sites",
        }
    }

    /// Marker icon shared by every place of this category.
    pub fn icon(self) -> MarkerIcon {
        match self {
            Category::TouristSpots => MarkerIcon::new("tourist", "#2980B9"),
            Category::Wildlife => MarkerIcon::new("wildlife", "#27AE60"),
            Category::HiddenGems => MarkerIcon::new("hidden-gem", "#8E44AD"),
            Category::CulturalSites => MarkerIcon::new("cultural", "#D35400"),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Square marker glyph, anchored at the bottom-centre of the image.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerIcon {
    pub name: &'static str,
    pub fill: &'static str,
    pub size_px: u32,
    pub anchor_px: (u32, u32),
}

impl MarkerIcon {
    pub const SIZE_PX: u32 = 40;

    const fn new(name: &'static str, fill: &'static str) -> Self {
        Self {
            name,
            fill,
            size_px: Self::SIZE_PX,
            anchor_px: (Self::SIZE_PX / 2, Self::SIZE_PX),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub description: String,
    pub position: LatLng,
    /// Opaque image reference, resolved by whoever renders it.
    pub image: String,
    pub category: Category,
}

impl Place {
    pub fn icon(&self) -> MarkerIcon {
        self.category.icon()
    }
}

/// One place as it appears in a catalog JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    NotFound(PlaceId),
    DuplicateId(PlaceId),
    InvalidPosition { id: PlaceId, position: LatLng },
    Corrupt(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NotFound(id) => write!(f, "{id} not found in catalog"),
            CatalogError::DuplicateId(id) => write!(f, "{id} appears more than once"),
            CatalogError::InvalidPosition { id, position } => {
                write!(f, "{id} has an invalid position: {position}")
            }
            CatalogError::Corrupt(msg) => write!(f, "catalog document corrupt: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Immutable place catalog partitioned by category.
///
/// Ordering contract:
/// - `by_category` yields places in insertion order.
/// - `iter` yields categories in declaration order, then insertion order.
#[derive(Debug, Default, Clone)]
pub struct PlaceCatalog {
    groups: BTreeMap<Category, Vec<Place>>,
    index: BTreeMap<PlaceId, (Category, usize)>,
}

impl PlaceCatalog {
    /// The Jharkhand catalog shipped with the site.
    pub fn builtin() -> Self {
        let mut catalog = PlaceCatalog::default();
        for place in seed::places() {
            catalog.push(place);
        }
        catalog
    }

    pub fn from_places(places: impl IntoIterator<Item = Place>) -> Result<Self, CatalogError> {
        let mut catalog = PlaceCatalog::default();
        for place in places {
            if !place.position.is_valid() {
                return Err(CatalogError::InvalidPosition {
                    id: place.id,
                    position: place.position,
                });
            }
            if catalog.index.contains_key(&place.id) {
                return Err(CatalogError::DuplicateId(place.id));
            }
            catalog.push(place);
        }
        Ok(catalog)
    }

    fn push(&mut self, place: Place) {
        let group = self.groups.entry(place.category).or_default();
        self.index.insert(place.id, (place.category, group.len()));
        group.push(place);
    }

    /// Parses a document shaped `{ "<categoryKey>": [ {id, name, ...}, ... ], ... }`.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let doc: BTreeMap<String, Vec<PlaceRecord>> =
            serde_json::from_str(raw).map_err(|e| CatalogError::Corrupt(e.to_string()))?;

        let mut places = Vec::new();
        // Category order, not document key order, so insertion order is stable.
        for category in Category::ALL {
            let Some(records) = doc.get(category.key()) else {
                continue;
            };
            places.extend(records.iter().map(|r| Place {
                id: PlaceId(r.id),
                name: r.name.clone(),
                description: r.description.clone(),
                position: LatLng::new(r.lat, r.lng),
                image: r.image.clone(),
                category,
            }));
        }
        if let Some(unknown) = doc.keys().find(|k| Category::from_key(k).is_none()) {
            return Err(CatalogError::Corrupt(format!("unknown category `{unknown}`")));
        }
        Self::from_places(places)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        let doc: BTreeMap<&str, Vec<PlaceRecord>> = self
            .groups
            .iter()
            .map(|(category, places)| {
                let records = places
                    .iter()
                    .map(|p| PlaceRecord {
                        id: p.id.get(),
                        name: p.name.clone(),
                        description: p.description.clone(),
                        lat: p.position.lat,
                        lng: p.position.lng,
                        image: p.image.clone(),
                    })
                    .collect();
                (category.key(), records)
            })
            .collect();
        serde_json::to_string_pretty(&doc).map_err(|e| CatalogError::Corrupt(e.to_string()))
    }

    pub fn by_category(&self, category: Category) -> &[Place] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, id: PlaceId) -> Result<&Place, CatalogError> {
        let (category, pos) = self.index.get(&id).ok_or(CatalogError::NotFound(id))?;
        Ok(&self.groups[category][*pos])
    }

    /// Looks `id` up within one category's slice only.
    pub fn find_in(&self, category: Category, id: PlaceId) -> Result<&Place, CatalogError> {
        match self.find(id) {
            Ok(place) if place.category == category => Ok(place),
            _ => Err(CatalogError::NotFound(id)),
        }
    }

    /// Categories that have at least one place, in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.groups.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Place> + '_ {
        self.groups.values().flatten()
    }
}
