//! Map scene: colored day routes, numbered markers and the view bounds.

use crate::catalog::{CategoryPresentation, DAY_COLORS};
use crate::format::format_time;
use crate::model::Day;
use crate::view::{DayFilter, resolve_category_presentation, sort_items};

/// Route opacity when every day is shown.
pub const ROUTE_OPACITY_ALL: f64 = 0.8;
/// Route opacity of the focused day.
pub const ROUTE_OPACITY_ACTIVE: f64 = 0.9;
/// Route opacity of days out of focus.
pub const ROUTE_OPACITY_DIMMED: f64 = 0.3;
/// Marker opacity of days out of focus.
pub const MARKER_OPACITY_DIMMED: f64 = 0.4;

const STATIC_MAP_BASE: &str = "https://api.mapbox.com/styles/v1/mapbox/streets-v12/static";

#[derive(Debug, Clone, Copy, PartialEq)]
/// WGS84 position.
pub struct GeoPoint {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Latitude/longitude box.
pub struct Bounds {
    /// Southern edge.
    pub south: f64,
    /// Western edge.
    pub west: f64,
    /// Northern edge.
    pub north: f64,
    /// Eastern edge.
    pub east: f64,
}

impl Bounds {
    /// Smallest box containing every point, `None` for no points.
    pub fn around<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        points.into_iter().fold(None, |bounds: Option<Bounds>, point| {
            Some(match bounds {
                None => Bounds {
                    south: point.latitude,
                    west: point.longitude,
                    north: point.latitude,
                    east: point.longitude,
                },
                Some(bounds) => Bounds {
                    south: bounds.south.min(point.latitude),
                    west: bounds.west.min(point.longitude),
                    north: bounds.north.max(point.latitude),
                    east: bounds.east.max(point.longitude),
                },
            })
        })
    }

    /// Grow each side by `fraction` of the span, with a small floor so a
    /// single point still yields a visible area.
    #[must_use]
    pub fn padded(self, fraction: f64) -> Self {
        let lat_pad = ((self.north - self.south) * fraction).max(0.01);
        let lon_pad = ((self.east - self.west) * fraction).max(0.01);
        Bounds {
            south: self.south - lat_pad,
            west: self.west - lon_pad,
            north: self.north + lat_pad,
            east: self.east + lon_pad,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Polyline of one day.
pub struct RouteLayer {
    /// Day drawn.
    pub day_number: u32,
    /// Hex color from [`DAY_COLORS`].
    pub color: &'static str,
    /// Stroke opacity.
    pub opacity: f64,
    /// Whether the day is out of focus.
    pub dimmed: bool,
    /// Stops in visit order.
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq)]
/// Numbered stop marker.
pub struct MapMarker {
    /// Running number across all days, starting at 1.
    pub number: usize,
    /// Day the stop belongs to.
    pub day_number: u32,
    /// Day color.
    pub color: &'static str,
    /// Fill opacity.
    pub opacity: f64,
    /// Whether the day is out of focus.
    pub dimmed: bool,
    /// Location.
    pub position: GeoPoint,
    /// Place name for the popup.
    pub name: String,
    /// `HH:MM` for the popup.
    pub time: String,
    /// Category badge for the popup.
    pub category: CategoryPresentation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Legend row.
pub struct LegendEntry {
    /// Day number.
    pub day_number: u32,
    /// Day color.
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
/// Everything the map draws for a given focus.
pub struct MapScene {
    /// Focus the scene was built for.
    pub filter: DayFilter,
    /// One route per day that has stops.
    pub routes: Vec<RouteLayer>,
    /// Markers of every day.
    pub markers: Vec<MapMarker>,
    /// One row per day.
    pub legend: Vec<LegendEntry>,
    /// Area to fit, `None` when there are no stops at all.
    pub bounds: Option<Bounds>,
}

/// Color of the day at `index` in the day list.
#[must_use]
pub fn day_color(index: usize) -> &'static str {
    DAY_COLORS
        .get(index % DAY_COLORS.len())
        .copied()
        .unwrap_or("#6b7280")
}

impl MapScene {
    /// Build the scene for `days` focused on `filter`.
    ///
    /// Days out of focus stay on the map, dimmed.
    #[must_use]
    pub fn build(days: &[Day], filter: DayFilter) -> Self {
        let mut routes = Vec::new();
        let mut markers = Vec::new();
        let mut legend = Vec::new();
        let mut counter = 0;

        for (index, day) in days.iter().enumerate() {
            let color = day_color(index);
            let focused = filter.includes(day.day_number);
            let dimmed = !focused;
            legend.push(LegendEntry {
                day_number: day.day_number,
                color,
            });

            let items = sort_items(day);
            if items.is_empty() {
                continue;
            }

            let route_opacity = match filter {
                DayFilter::All => ROUTE_OPACITY_ALL,
                DayFilter::Day(_) if focused => ROUTE_OPACITY_ACTIVE,
                DayFilter::Day(_) => ROUTE_OPACITY_DIMMED,
            };
            routes.push(RouteLayer {
                day_number: day.day_number,
                color,
                opacity: route_opacity,
                dimmed,
                points: items
                    .iter()
                    .map(|item| GeoPoint {
                        latitude: item.poi.latitude,
                        longitude: item.poi.longitude,
                    })
                    .collect(),
            });

            for item in items {
                counter += 1;
                markers.push(MapMarker {
                    number: counter,
                    day_number: day.day_number,
                    color,
                    opacity: if dimmed { MARKER_OPACITY_DIMMED } else { 1.0 },
                    dimmed,
                    position: GeoPoint {
                        latitude: item.poi.latitude,
                        longitude: item.poi.longitude,
                    },
                    name: item.poi.name.clone(),
                    time: format_time(&item.visit_time),
                    category: resolve_category_presentation(&item.poi.categories),
                });
            }
        }

        let focused_bounds = Bounds::around(
            markers
                .iter()
                .filter(|marker| !marker.dimmed)
                .map(|marker| marker.position),
        );
        let bounds = focused_bounds
            .or_else(|| Bounds::around(markers.iter().map(|marker| marker.position)));

        Self {
            filter,
            routes,
            markers,
            legend,
            bounds,
        }
    }

    /// Markers in focus.
    pub fn focused_markers(&self) -> impl Iterator<Item = &MapMarker> {
        self.markers.iter().filter(|marker| !marker.dimmed)
    }

    /// Static image URL of the focused markers, `None` without a token.
    #[must_use]
    pub fn static_map_url(&self, token: &str) -> Option<String> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        let pins: Vec<String> = self
            .focused_markers()
            .map(|marker| {
                let color = marker.color.trim_start_matches('#');
                let label = if marker.number < 100 {
                    format!("-{}", marker.number)
                } else {
                    String::new()
                };
                format!(
                    "pin-s{label}+{color}({:.5},{:.5})",
                    marker.position.longitude, marker.position.latitude
                )
            })
            .collect();
        if pins.is_empty() {
            return None;
        }

        Some(format!(
            "{STATIC_MAP_BASE}/{}/auto/600x400?access_token={token}",
            pins.join(",")
        ))
    }
}
