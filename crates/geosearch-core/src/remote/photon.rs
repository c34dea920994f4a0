// crates/geosearch-core/src/remote/photon.rs

//! Wire format of the Photon geocoder: a GeoJSON feature collection.
//! These types mirror the provider and are not exposed.

use crate::dedup::canonical_country;
use crate::error::NetworkError;
use crate::model::{Extent, LatLon, PlaceId, SearchResult};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Properties,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// `[longitude, latitude]`
    #[serde(default)]
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(default)]
    osm_id: Option<PlaceId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    street: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    osm_key: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    /// `[min_lon, min_lat, max_lon, max_lat]`
    #[serde(default)]
    extent: Option<Vec<f64>>,
}

/// Decodes a provider response body into results, in provider order.
///
/// Features without a usable `[lon, lat]` pair are skipped; a body that is
/// not a feature collection at all is a [`NetworkError::Decode`].
pub(crate) fn parse_features(body: &str) -> Result<Vec<SearchResult>, NetworkError> {
    let collection: FeatureCollection =
        serde_json::from_str(body).map_err(|e| NetworkError::Decode {
            message: e.to_string(),
        })?;

    Ok(collection
        .features
        .into_iter()
        .filter_map(into_result)
        .collect())
}

fn into_result(feature: Feature) -> Option<SearchResult> {
    let coords = feature.geometry?.coordinates;
    let (lon, lat) = match coords.as_slice() {
        [lon, lat, ..] => (*lon, *lat),
        _ => return None,
    };

    let p = feature.properties;
    let extent = match p.extent.as_deref() {
        Some(&[min_lon, min_lat, max_lon, max_lat]) => {
            Some(Extent::from_array([min_lon, min_lat, max_lon, max_lat]))
        }
        _ => None,
    };

    Some(SearchResult {
        id: p.osm_id,
        name: p.name.unwrap_or_default(),
        city: p.city,
        street: p.street,
        state: p.state,
        country: p.country.map(|c| canonical_country(&c).to_owned()),
        category: p.osm_key,
        kind: p.kind,
        position: LatLon::new(lat, lon),
        extent,
    })
}
