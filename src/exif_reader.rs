use chrono::{NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

use crate::error::Error;
use crate::model::{Coordinate, ExifSignals};

/// Reads the capture date and GPS position of a photo.
pub trait SignalReader {
    fn read(&self, path: &Path) -> Result<ExifSignals, Error>;
}

/// [`SignalReader`] backed by `kamadak-exif`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifReader;

impl SignalReader for ExifReader {
    fn read(&self, path: &Path) -> Result<ExifSignals, Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let exif = match exif::Reader::new().read_from_container(&mut reader) {
            Ok(exif) => exif,
            // A photo without an EXIF block simply carries no signal.
            Err(exif::Error::NotFound(_)) => {
                trace!("No EXIF block in {}", path.display());
                return Ok(ExifSignals::default());
            }
            Err(err) => return Err(err.into()),
        };

        Ok(ExifSignals {
            taken_at: capture_time(&exif),
            coordinate: gps_coordinate(&exif),
        })
    }
}

fn capture_time(exif: &exif::Exif) -> Option<NaiveDateTime> {
    let field = exif.get_field(exif::Tag::DateTimeOriginal, exif::In::PRIMARY)?;
    let raw = match &field.value {
        exif::Value::Ascii(values) => values.first()?,
        _ => return None,
    };
    let dt = exif::DateTime::from_ascii(raw).ok()?;
    NaiveDate::from_ymd_opt(dt.year.into(), dt.month.into(), dt.day.into())?.and_hms_opt(
        dt.hour.into(),
        dt.minute.into(),
        dt.second.into(),
    )
}

fn gps_coordinate(exif: &exif::Exif) -> Option<Coordinate> {
    let latitude = signed_degrees(
        exif.get_field(exif::Tag::GPSLatitude, exif::In::PRIMARY)?,
        exif.get_field(exif::Tag::GPSLatitudeRef, exif::In::PRIMARY),
        b'S',
    )?;
    let longitude = signed_degrees(
        exif.get_field(exif::Tag::GPSLongitude, exif::In::PRIMARY)?,
        exif.get_field(exif::Tag::GPSLongitudeRef, exif::In::PRIMARY),
        b'W',
    )?;
    Coordinate::new(latitude, longitude)
}

/// Decimal degrees from a DMS field, negated when the hemisphere reference is `negative`.
/// A missing reference counts as north/east.
fn signed_degrees(
    value: &exif::Field,
    reference: Option<&exif::Field>,
    negative: u8,
) -> Option<f64> {
    let degrees = parse_dms(&value.value)?;
    let is_negative = reference.map_or(false, |field| match &field.value {
        exif::Value::Ascii(values) => values
            .first()
            .and_then(|v| v.first())
            .map_or(false, |c| c.eq_ignore_ascii_case(&negative)),
        _ => false,
    });
    Some(if is_negative { -degrees } else { degrees })
}

/// Degrees, minutes and seconds as EXIF rationals.
fn parse_dms(value: &exif::Value) -> Option<f64> {
    match value {
        exif::Value::Rational(parts) if parts.len() >= 3 => {
            let degrees = parts[0].to_f64();
            let minutes = parts[1].to_f64();
            let seconds = parts[2].to_f64();
            Some(degrees + minutes / 60.0 + seconds / 3600.0)
        }
        _ => None,
    }
}
