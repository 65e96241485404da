use chrono::NaiveDateTime;
use serde::Serialize;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Returns `None` for values that cannot describe a real GPS fix: non-finite numbers,
    /// out-of-range degrees, or the exact (0, 0) point cameras write when they have no fix.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        if latitude == 0.0 && longitude == 0.0 {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
        })
    }
}

/// A city returned by a gazetteer query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoCandidate {
    pub name: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub candidate: GeoCandidate,
    pub distance_km: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocation {
    pub label: String,
    pub status: String,
}

/// Raw signals read from a photo's EXIF block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExifSignals {
    pub taken_at: Option<NaiveDateTime>,
    pub coordinate: Option<Coordinate>,
}

/// Per-photo inputs to caption assembly, built once from the EXIF signals and the file path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoMetadata {
    pub date_label: String,
    pub full_date_label: String,
    pub coordinate: Option<Coordinate>,
    pub folder_label: String,
    pub gps_status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LocationSource {
    Gps,
    Folder,
    None,
}

/// Everything the driver needs to log and persist for one photo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionOutcome {
    pub caption: String,
    pub full_date: String,
    pub gps_status: String,
    pub location_source: LocationSource,
}
