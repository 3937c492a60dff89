use std::env;

use foundation::LatLng;

/// Page-level tunables.
///
/// Defaults match the deployed site; each field can be overridden from a
/// `DISCOVERY_*` environment variable via [`PageConfig::from_env`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    /// Element id the map surface is mounted into.
    pub container: String,
    pub initial_center: LatLng,
    pub initial_zoom: u8,
    /// Zoom used when a place is highlighted or opened.
    pub detail_zoom: u8,
    /// Zoom used when centring on the user's own position.
    pub locate_zoom: u8,
    /// Visible fraction of the map region that opens the sidebar.
    pub visibility_threshold: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            container: "map-container".to_string(),
            initial_center: LatLng::new(23.3431, 85.3096),
            initial_zoom: 9,
            detail_zoom: 14,
            locate_zoom: 14,
            visibility_threshold: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
    OutOfRange { key: &'static str, detail: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{key}: cannot parse `{value}`")
            }
            ConfigError::OutOfRange { key, detail } => write!(f, "{key}: {detail}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Highest zoom level accepted by common tile providers.
pub const MAX_ZOOM: u8 = 22;

impl PageConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup (environment, test map, ...).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let d = Self::default();
        let cfg = Self {
            container: lookup("DISCOVERY_CONTAINER").unwrap_or(d.container),
            initial_center: LatLng::new(
                parse_or(&lookup, "DISCOVERY_CENTER_LAT", d.initial_center.lat)?,
                parse_or(&lookup, "DISCOVERY_CENTER_LNG", d.initial_center.lng)?,
            ),
            initial_zoom: parse_or(&lookup, "DISCOVERY_INITIAL_ZOOM", d.initial_zoom)?,
            detail_zoom: parse_or(&lookup, "DISCOVERY_DETAIL_ZOOM", d.detail_zoom)?,
            locate_zoom: parse_or(&lookup, "DISCOVERY_LOCATE_ZOOM", d.locate_zoom)?,
            visibility_threshold: parse_or(
                &lookup,
                "DISCOVERY_VISIBILITY_THRESHOLD",
                d.visibility_threshold,
            )?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_center.is_valid() {
            return Err(ConfigError::OutOfRange {
                key: "DISCOVERY_CENTER_LAT/LNG",
                detail: format!("{} is not a WGS84 position", self.initial_center),
            });
        }
        for (key, zoom) in [
            ("DISCOVERY_INITIAL_ZOOM", self.initial_zoom),
            ("DISCOVERY_DETAIL_ZOOM", self.detail_zoom),
            ("DISCOVERY_LOCATE_ZOOM", self.locate_zoom),
        ] {
            if zoom > MAX_ZOOM {
                return Err(ConfigError::OutOfRange {
                    key,
                    detail: format!("zoom {zoom} exceeds {MAX_ZOOM}"),
                });
            }
        }
        let t = self.visibility_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(ConfigError::OutOfRange {
                key: "DISCOVERY_VISIBILITY_THRESHOLD",
                detail: format!("{t} is outside (0, 1]"),
            });
        }
        Ok(())
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{ConfigError, PageConfig};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = PageConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(cfg, PageConfig::default());
        assert_eq!(cfg.detail_zoom, 14);
    }

    #[test]
    fn overrides_apply() {
        let cfg = PageConfig::from_lookup(lookup(&[
            ("DISCOVERY_DETAIL_ZOOM", "16"),
            ("DISCOVERY_VISIBILITY_THRESHOLD", " 0.3 "),
            ("DISCOVERY_CONTAINER", "atlas"),
        ]))
        .expect("config");
        assert_eq!(cfg.detail_zoom, 16);
        assert_eq!(cfg.visibility_threshold, 0.3);
        assert_eq!(cfg.container, "atlas");
    }

    #[test]
    fn rejects_unparsable_and_out_of_range() {
        let err = PageConfig::from_lookup(lookup(&[("DISCOVERY_INITIAL_ZOOM", "far")]));
        assert!(matches!(err, Err(ConfigError::InvalidValue { key: "DISCOVERY_INITIAL_ZOOM", .. })));

        let err = PageConfig::from_lookup(lookup(&[("DISCOVERY_VISIBILITY_THRESHOLD", "0")]));
        assert!(matches!(err, Err(ConfigError::OutOfRange { .. })));

        let err = PageConfig::from_lookup(lookup(&[("DISCOVERY_LOCATE_ZOOM", "30")]));
        assert!(matches!(err, Err(ConfigError::OutOfRange { .. })));
    }
}
