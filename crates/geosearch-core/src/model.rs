// crates/geosearch-core/src/model.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider-assigned identity of a place.
///
/// Photon sends OSM ids as integers, other providers use strings; both are
/// accepted and compared as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlaceId {
    Num(i64),
    Text(String),
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceId::Num(n) => write!(f, "{n}"),
            PlaceId::Text(s) => f.write_str(s),
        }
    }
}

/// A WGS84 coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both components are finite numbers (no NaN, no infinities).
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Bounding box of an area result, in provider order
/// `[min_lon, min_lat, max_lon, max_lat]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Extent {
    pub fn from_array([min_lon, min_lat, max_lon, max_lat]: [f64; 4]) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// South-west corner.
    pub fn south_west(&self) -> LatLon {
        LatLon::new(self.min_lat, self.min_lon)
    }

    /// North-east corner.
    pub fn north_east(&self) -> LatLon {
        LatLon::new(self.max_lat, self.max_lon)
    }
}

/// How a selected result should be framed on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceType {
    /// Has a bounding extent; the map fits to it.
    Area,
    /// A single coordinate; the map centers and zooms.
    Point,
}

/// A place candidate returned by the provider or read back from the cache.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PlaceId>,
    /// Display name. Empty when the provider sent none.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Provider category key (`osm_key`), e.g. `highway`, `place`, `amenity`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Provider place type (`type`), e.g. `street`, `city`, `house`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub position: LatLon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,
}

impl SearchResult {
    /// Minimal result with just a name and a position.
    pub fn new(name: impl Into<String>, position: LatLon) -> Self {
        Self {
            id: None,
            name: name.into(),
            city: None,
            street: None,
            state: None,
            country: None,
            category: None,
            kind: None,
            position,
            extent: None,
        }
    }

    pub fn with_id(mut self, id: PlaceId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Streets and roads: `osm_key=highway` or `type=street`.
    pub fn is_thoroughfare(&self) -> bool {
        self.category.as_deref() == Some("highway") || self.kind.as_deref() == Some("street")
    }

    pub fn place_type(&self) -> PlaceType {
        if self.extent.is_some() {
            PlaceType::Area
        } else {
            PlaceType::Point
        }
    }

    /// One-line label for result lists: name, street, city, state, country,
    /// skipping blanks and parts equal to the one before.
    pub fn label(&self) -> String {
        let parts = [
            Some(self.name.as_str()),
            self.street.as_deref(),
            self.city.as_deref(),
            self.state.as_deref(),
            self.country.as_deref(),
        ];

        let mut out: Vec<&str> = Vec::with_capacity(parts.len());
        for part in parts.into_iter().flatten() {
            let part = part.trim();
            if part.is_empty() || out.last() == Some(&part) {
                continue;
            }
            out.push(part);
        }
        out.join(", ")
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_skips_blanks_and_repeats() {
        let r = SearchResult::new("Curitiba", LatLon::new(-25.43, -49.27))
            .with_city("Curitiba")
            .with_street(" ")
            .with_country("Brasil");
        assert_eq!(r.label(), "Curitiba, Brasil");
    }

    #[test]
    fn place_id_accepts_numbers_and_strings() {
        let ids: Vec<PlaceId> = serde_json::from_str(r#"[42, "N42"]"#).unwrap();
        assert_eq!(ids, vec![PlaceId::Num(42), PlaceId::Text("N42".into())]);
    }

    #[test]
    fn area_versus_point() {
        let point = SearchResult::new("Praça Tiradentes", LatLon::new(-25.42, -49.27));
        assert_eq!(point.place_type(), PlaceType::Point);

        let area = point
            .clone()
            .with_extent(Extent::from_array([-49.4, -25.6, -49.1, -25.3]));
        assert_eq!(area.place_type(), PlaceType::Area);
    }

    #[test]
    fn thoroughfare_by_category_or_kind() {
        let mut r = SearchResult::new("Rua XV de Novembro", LatLon::new(0.0, 0.0));
        assert!(!r.is_thoroughfare());
        r.category = Some("highway".into());
        assert!(r.is_thoroughfare());
        r.category = Some("place".into());
        r.kind = Some("street".into());
        assert!(r.is_thoroughfare());
    }
}
