use serde::Serialize;

/// Provider-neutral map styling: a list of colour rules.
///
/// Serializes to the `[{featureType?, elementType, stylers: [{color}]}]` shape
/// most hosted map SDKs accept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapStyle {
    pub rules: Vec<StyleRule>,
    #[serde(rename = "disableDefaultUI")]
    pub disable_default_ui: bool,
    #[serde(rename = "zoomControl")]
    pub zoom_control: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<&'static str>,
    pub element_type: &'static str,
    pub stylers: [Styler; 1],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Styler {
    pub color: &'static str,
}

const fn rule(
    feature_type: Option<&'static str>,
    element_type: &'static str,
    color: &'static str,
) -> StyleRule {
    StyleRule {
        feature_type,
        element_type,
        stylers: [Styler { color }],
    }
}

const NIGHT: &[StyleRule] = &[
    rule(None, "geometry", "#1d2c4d"),
    rule(None, "labels.text.fill", "#8ec3b9"),
    rule(None, "labels.text.stroke", "#1a3646"),
    rule(Some("administrative.country"), "geometry.stroke", "#4b6878"),
    rule(Some("administrative.land_parcel"), "labels.text.fill", "#64779e"),
    rule(Some("administrative.province"), "geometry.stroke", "#4b6878"),
    rule(Some("landscape.man_made"), "geometry.stroke", "#334e87"),
    rule(Some("landscape.natural"), "geometry", "#023e58"),
    rule(Some("poi"), "geometry", "#283d6a"),
    rule(Some("poi"), "labels.text.fill", "#6f9ba5"),
    rule(Some("poi"), "labels.text.stroke", "#1d2c4d"),
    rule(Some("poi.park"), "geometry.fill", "#023e58"),
    rule(Some("poi.park"), "labels.text.fill", "#3C7680"),
    rule(Some("road"), "geometry", "#304a7d"),
    rule(Some("road"), "labels.text.fill", "#98a5be"),
    rule(Some("road"), "labels.text.stroke", "#1d2c4d"),
    rule(Some("road.highway"), "geometry", "#2c6675"),
    rule(Some("road.highway"), "geometry.stroke", "#255763"),
    rule(Some("road.highway"), "labels.text.fill", "#b0d5ce"),
    rule(Some("road.highway"), "labels.text.stroke", "#023e58"),
    rule(Some("transit"), "labels.text.fill", "#98a5be"),
    rule(Some("transit"), "labels.text.stroke", "#1d2c4d"),
    rule(Some("transit.line"), "geometry.fill", "#283d6a"),
    rule(Some("transit.station"), "geometry", "#3a4762"),
    rule(Some("water"), "geometry", "#0e1626"),
    rule(Some("water"), "labels.text.fill", "#4e6d70"),
];

impl MapStyle {
    /// Dark navy theme used by the discovery page.
    pub fn night() -> Self {
        Self {
            rules: NIGHT.to_vec(),
            disable_default_ui: true,
            zoom_control: true,
        }
    }
}

impl Default for MapStyle {
    fn default() -> Self {
        Self::night()
    }
}
