//! Caption resolution: turns a photo's EXIF signals and folder names into `"Lieu - Mois Année"`.

pub mod assemble;
pub mod date;
pub mod geo;
pub mod normalize;
pub mod rules;

use std::path::Path;

use crate::model::{CaptionOutcome, ExifSignals, LocationSource, PhotoMetadata};

pub use assemble::assemble_caption;
pub use date::{date_from_path, full_date_from_path, full_date_label, month_year_label};
pub use geo::{resolve_location, Gazetteer};
pub use normalize::{capitalize_first, normalize_folder_name};
pub use rules::LabelRules;

pub const GPS_STATUS_NONE: &str = "Aucun";
pub const GPS_STATUS_READ_ERROR: &str = "Erreur lecture EXIF";
pub const GPS_STATUS_NO_CITY: &str = "Aucune ville proche";

/// Build the per-photo metadata. `signals` is `None` when the EXIF block could not be read;
/// the photo then relies on its folder names only.
pub fn describe_photo(
    file_path: &Path,
    signals: Option<&ExifSignals>,
    rules: &LabelRules,
) -> PhotoMetadata {
    let (date_label, full_date_label) = match signals.and_then(|s| s.taken_at) {
        Some(taken_at) => (
            month_year_label(&taken_at, rules),
            full_date_label(&taken_at, rules),
        ),
        None => (
            date_from_path(file_path, rules),
            full_date_from_path(file_path, rules),
        ),
    };

    let folder = date::informative_folder_name(file_path, rules);

    PhotoMetadata {
        date_label,
        full_date_label,
        coordinate: signals.and_then(|s| s.coordinate),
        folder_label: normalize_folder_name(&folder, &rules.noise_words),
        gps_status: match signals {
            Some(_) => GPS_STATUS_NONE.to_string(),
            None => GPS_STATUS_READ_ERROR.to_string(),
        },
    }
}

/// Resolve the caption for one photo. GPS wins over the folder label when a city is found.
pub fn caption_photo<G: Gazetteer + ?Sized>(
    metadata: &PhotoMetadata,
    gazetteer: &G,
    rules: &LabelRules,
) -> CaptionOutcome {
    let mut gps_status = metadata.gps_status.clone();
    let mut location = String::new();
    let mut location_source = LocationSource::None;

    if let Some(coordinate) = metadata.coordinate {
        match resolve_location(coordinate, gazetteer, rules) {
            Some(resolved) => {
                location = resolved.label;
                gps_status = resolved.status;
                location_source = LocationSource::Gps;
            }
            None => gps_status = GPS_STATUS_NO_CITY.to_string(),
        }
    }

    if location.is_empty() && !metadata.folder_label.is_empty() {
        location = metadata.folder_label.clone();
        location_source = LocationSource::Folder;
    }

    CaptionOutcome {
        caption: assemble_caption(&location, &metadata.date_label, capitalize_first),
        full_date: metadata.full_date_label.clone(),
        gps_status,
        location_source,
    }
}
