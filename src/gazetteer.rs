use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::config::GazetteerConfig;
use crate::error::Error;
use crate::labels::geo::haversine_km;
use crate::labels::Gazetteer;
use crate::model::{Coordinate, GeoCandidate};

// Column positions in a GeoNames `cities*.txt` dump.
const COL_NAME: usize = 1;
const COL_LATITUDE: usize = 4;
const COL_LONGITUDE: usize = 5;
const COL_COUNTRY: usize = 8;
const COL_POPULATION: usize = 14;

/// In-memory city table answering nearest-first queries.
#[derive(Debug, Clone)]
pub struct GeoNamesGazetteer {
    cities: Vec<GeoCandidate>,
    max_results: usize,
    max_distance_km: Option<f64>,
}

impl GeoNamesGazetteer {
    pub fn open(config: &GazetteerConfig) -> Result<Self, Error> {
        let path = Path::new(&config.path);
        info!("Loading gazetteer from {}", path.display());
        let file = std::fs::File::open(path)?;
        let gazetteer = Self::from_reader(file, config)?;
        info!("{} cities loaded", gazetteer.len());
        Ok(gazetteer)
    }

    pub fn from_reader<R: Read>(reader: R, config: &GazetteerConfig) -> Result<Self, Error> {
        let mut rows = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let mut cities = Vec::new();
        let mut skipped = 0usize;
        for record in rows.records() {
            match parse_city(&record?) {
                Some(city) => cities.push(city),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("Skipped {} malformed gazetteer rows", skipped);
        }

        Ok(Self::from_cities(cities, config))
    }

    pub fn from_cities(cities: Vec<GeoCandidate>, config: &GazetteerConfig) -> Self {
        Self {
            cities,
            max_results: config.max_results,
            max_distance_km: config.max_distance_km,
        }
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

fn parse_city(record: &StringRecord) -> Option<GeoCandidate> {
    let name = record.get(COL_NAME)?.trim();
    if name.is_empty() {
        return None;
    }
    let latitude: f64 = record.get(COL_LATITUDE)?.trim().parse().ok()?;
    let longitude: f64 = record.get(COL_LONGITUDE)?.trim().parse().ok()?;
    // GeoNames leaves population empty for some places.
    let population = record
        .get(COL_POPULATION)
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(0);

    Some(GeoCandidate {
        name: name.to_string(),
        country_code: record.get(COL_COUNTRY)?.trim().to_uppercase(),
        latitude,
        longitude,
        population,
    })
}

impl Gazetteer for GeoNamesGazetteer {
    fn nearby(&self, coordinate: Coordinate) -> Vec<GeoCandidate> {
        let mut by_distance: Vec<(f64, &GeoCandidate)> = self
            .cities
            .iter()
            .map(|city| {
                let distance = haversine_km(
                    coordinate.latitude,
                    coordinate.longitude,
                    city.latitude,
                    city.longitude,
                );
                (distance, city)
            })
            .filter(|(distance, _)| self.max_distance_km.map_or(true, |max| *distance <= max))
            .collect();

        by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
        by_distance
            .into_iter()
            .take(self.max_results)
            .map(|(_, city)| city.clone())
            .collect()
    }
}
