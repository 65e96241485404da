use config::{Config, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub source_dirs: Vec<String>,
    pub dest_dir: String,
    pub image_count: usize,
    pub screen_width: u32,
    pub screen_height: u32,
    pub jpeg_quality: u8,
    pub extensions: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub seed: Option<u64>,
    pub purge_destination: bool,
    pub gazetteer: GazetteerConfig,
    pub labels: LabelsConfig,
    pub sidecar: SidecarConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_dirs: Vec::new(),
            dest_dir: String::new(),
            image_count: 50,
            screen_width: 1920,
            screen_height: 1080,
            jpeg_quality: 85,
            extensions: vec!["jpg".to_string(), "jpeg".to_string()],
            ignore_patterns: Vec::new(),
            seed: None,
            purge_destination: false,
            gazetteer: GazetteerConfig::default(),
            labels: LabelsConfig::default(),
            sidecar: SidecarConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GazetteerConfig {
    /// GeoNames `cities*.txt` dump (tab separated).
    pub path: String,
    pub max_results: usize,
    pub max_distance_km: Option<f64>,
}

impl Default for GazetteerConfig {
    fn default() -> Self {
        Self {
            path: "cities1000.txt".to_string(),
            max_results: 10,
            max_distance_km: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CountryName {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CityOverride {
    pub name: String,
    pub display: String,
}

// Tables are arrays of records rather than maps: the config crate folds keys to lowercase,
// which would break exact city-name matching.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub home_country_code: String,
    pub month_names: Vec<String>,
    pub generic_folder_words: Vec<String>,
    pub noise_words: Vec<String>,
    pub country_names: Vec<CountryName>,
    pub city_overrides: Vec<CityOverride>,
    pub max_candidates: usize,
    pub distance_decay: f64,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            home_country_code: "FR".to_string(),
            month_names: strings(&[
                "Janvier",
                "Février",
                "Mars",
                "Avril",
                "Mai",
                "Juin",
                "Juillet",
                "Août",
                "Septembre",
                "Octobre",
                "Novembre",
                "Décembre",
            ]),
            generic_folder_words: strings(&["dcim", "camera", "export", "100apple"]),
            noise_words: strings(&["année", "annee", "chargement appareil photo"]),
            country_names: Vec::new(),
            city_overrides: Vec::new(),
            max_candidates: 50,
            distance_decay: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SidecarConfig {
    pub full_date_line: bool,
    pub source_path_line: bool,
}

/// Load `Config.toml` (or the given file) layered with `SLIDE__*` environment variables.
pub fn load_configuration(path: Option<&Path>) -> Result<AppConfig, Error> {
    let file_source = match path {
        Some(path) => ConfigFile::from(path).required(true),
        None => ConfigFile::with_name("Config").required(false),
    };
    let builder = Config::builder()
        .add_source(file_source)
        .add_source(Environment::with_prefix("SLIDE").separator("__"))
        .build()?;
    let config = builder.try_deserialize::<AppConfig>()?;
    config.validate_lookup()?;
    Ok(config)
}

impl AppConfig {
    /// Everything a slideshow run needs: paths, output settings and the lookup tables.
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |msg: &str| Err(Error::InvalidConfig(msg.to_string()));

        if self.source_dirs.iter().all(|dir| dir.trim().is_empty()) {
            return invalid("source_dirs must name at least one directory");
        }
        if self.dest_dir.trim().is_empty() {
            return invalid("dest_dir must be set");
        }
        if self.image_count == 0 {
            return invalid("image_count must be greater than 0");
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return invalid("screen_width and screen_height must be greater than 0");
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return invalid("jpeg_quality must be between 1 and 100");
        }
        if self.extensions.is_empty() {
            return invalid("extensions must list at least one file extension");
        }
        self.validate_lookup()
    }

    /// Settings used to caption a single photo or coordinate: gazetteer and label tables.
    pub fn validate_lookup(&self) -> Result<(), Error> {
        let invalid = |msg: &str| Err(Error::InvalidConfig(msg.to_string()));

        if self.gazetteer.max_results == 0 {
            return invalid("gazetteer.max_results must be greater than 0");
        }
        if let Some(max) = self.gazetteer.max_distance_km {
            if !max.is_finite() || max <= 0.0 {
                return invalid("gazetteer.max_distance_km must be a positive number");
            }
        }
        self.labels.validate()
    }
}

impl LabelsConfig {
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |msg: String| Err(Error::InvalidConfig(msg));

        if self.month_names.len() != 12 {
            return invalid(format!(
                "labels.month_names must have 12 entries, found {}",
                self.month_names.len()
            ));
        }
        let home = &self.home_country_code;
        if home.len() != 2 || !home.chars().all(|c| c.is_ascii_alphabetic()) {
            return invalid(format!(
                "labels.home_country_code must be a 2-letter ISO code, found '{}'",
                home
            ));
        }
        if self.max_candidates == 0 {
            return invalid("labels.max_candidates must be greater than 0".to_string());
        }
        if !self.distance_decay.is_finite() || self.distance_decay < 0.0 {
            return invalid("labels.distance_decay must be a finite, non-negative number".to_string());
        }
        if let Some(word) = self.generic_folder_words.iter().find(|w| w.trim().is_empty()) {
            return invalid(format!("labels.generic_folder_words contains a blank entry '{}'", word));
        }
        Ok(())
    }
}

/// Remove directories that are subdirectories of other directories in the list.
pub fn non_overlapping_directories(dirs: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();

    for dir in dirs {
        if dir.trim().is_empty() {
            continue;
        }
        let dir_path = Path::new(&dir);
        let mut should_add = true;

        // Walk a snapshot so nested roots already collected can be dropped in place.
        for res_dir in result.clone() {
            let res_dir_path = Path::new(&res_dir);

            if dir_path.starts_with(res_dir_path) {
                should_add = false;
                break;
            }

            if res_dir_path.starts_with(dir_path) {
                result.retain(|x| x != &res_dir);
            }
        }

        if should_add {
            result.push(dir);
        }
    }

    result
}
