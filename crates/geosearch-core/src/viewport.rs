// crates/geosearch-core/src/viewport.rs

//! The map, as seen from the search subsystem.
//!
//! Rendering, markers and clustering live elsewhere. Search only needs to
//! ask where the user is looking (to bias results) and to move the map when
//! a result is picked.

use crate::model::{Extent, LatLon, PlaceType, SearchResult};
use tracing::debug;

/// Zoom level used when centering on a point result.
pub const SEARCH_ZOOM: u8 = 16;
/// Upper zoom bound when fitting an area result.
pub const FIT_BOUNDS_MAX_ZOOM: u8 = 16;
/// Padding, in pixels, kept around a fitted area.
pub const FIT_BOUNDS_PADDING: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitOptions {
    pub padding: u32,
    pub max_zoom: u8,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding: FIT_BOUNDS_PADDING,
            max_zoom: FIT_BOUNDS_MAX_ZOOM,
        }
    }
}

/// Map capabilities the search controller depends on.
pub trait MapViewport {
    /// Current center of the visible map, if a map is attached.
    fn viewport_center(&self) -> Option<LatLon>;

    fn pan_to(&mut self, center: LatLon, zoom: u8);

    fn fit_bounds(&mut self, extent: Extent, options: FitOptions);

    /// Frames a picked result: areas are fitted to their extent, points are
    /// centered at [`SEARCH_ZOOM`].
    fn on_result_selected(&mut self, result: &SearchResult) {
        match (result.place_type(), result.extent) {
            (PlaceType::Area, Some(extent)) => self.fit_bounds(extent, FitOptions::default()),
            _ => self.pan_to(result.position, SEARCH_ZOOM),
        }
    }
}

/// A viewport movement, as recorded by [`RecordingViewport`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportMove {
    PanTo { center: LatLon, zoom: u8 },
    FitBounds { extent: Extent, options: FitOptions },
}

/// A headless viewport: a fixed center and a log of requested moves.
///
/// Stands in for a real map in the CLI and in tests. Moves update the
/// center so a following search is biased toward the last selection.
#[derive(Debug, Clone, Default)]
pub struct RecordingViewport {
    center: Option<LatLon>,
    moves: Vec<ViewportMove>,
}

impl RecordingViewport {
    pub fn new(center: Option<LatLon>) -> Self {
        Self {
            center,
            moves: Vec::new(),
        }
    }

    pub fn moves(&self) -> &[ViewportMove] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<&ViewportMove> {
        self.moves.last()
    }

    pub fn set_center(&mut self, center: Option<LatLon>) {
        self.center = center;
    }
}

impl MapViewport for RecordingViewport {
    fn viewport_center(&self) -> Option<LatLon> {
        self.center
    }

    fn pan_to(&mut self, center: LatLon, zoom: u8) {
        debug!(lat = center.lat, lon = center.lon, zoom, "pan map");
        self.center = Some(center);
        self.moves.push(ViewportMove::PanTo { center, zoom });
    }

    fn fit_bounds(&mut self, extent: Extent, options: FitOptions) {
        debug!(?extent, "fit map to bounds");
        let sw = extent.south_west();
        let ne = extent.north_east();
        self.center = Some(LatLon::new((sw.lat + ne.lat) / 2.0, (sw.lon + ne.lon) / 2.0));
        self.moves.push(ViewportMove::FitBounds { extent, options });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_results_pan_and_zoom() {
        let mut map = RecordingViewport::default();
        let r = SearchResult::new("Jardim Botânico", LatLon::new(-25.44, -49.24));
        map.on_result_selected(&r);

        assert_eq!(
            map.last_move(),
            Some(&ViewportMove::PanTo {
                center: LatLon::new(-25.44, -49.24),
                zoom: SEARCH_ZOOM
            })
        );
        assert_eq!(map.viewport_center(), Some(LatLon::new(-25.44, -49.24)));
    }

    #[test]
    fn area_results_fit_extent() {
        let mut map = RecordingViewport::new(None);
        let extent = Extent::from_array([-50.0, -26.0, -48.0, -24.0]);
        let r = SearchResult::new("Curitiba", LatLon::new(-25.43, -49.27)).with_extent(extent);
        map.on_result_selected(&r);

        assert_eq!(
            map.last_move(),
            Some(&ViewportMove::FitBounds {
                extent,
                options: FitOptions::default()
            })
        );
        assert_eq!(map.viewport_center(), Some(LatLon::new(-25.0, -49.0)));
    }
}
