use ahash::AHashMap;

use crate::config::LabelsConfig;
use crate::error::Error;

/// Immutable lookup tables used by the resolvers, built once from [`LabelsConfig`].
#[derive(Debug, Clone)]
pub struct LabelRules {
    pub home_country_code: String,
    pub month_names: [String; 12],
    /// Lowercased.
    pub generic_folder_words: Vec<String>,
    /// Lowercased.
    pub noise_words: Vec<String>,
    /// Keyed by uppercase ISO code.
    pub country_names: AHashMap<String, String>,
    pub city_overrides: AHashMap<String, String>,
    pub max_candidates: usize,
    pub distance_decay: f64,
}

impl LabelRules {
    pub fn from_config(config: &LabelsConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &LabelsConfig) -> Self {
        let month_names: [String; 12] =
            std::array::from_fn(|i| config.month_names.get(i).cloned().unwrap_or_default());

        let country_names = config
            .country_names
            .iter()
            .map(|c| (c.code.trim().to_uppercase(), c.name.clone()))
            .collect();
        let city_overrides = config
            .city_overrides
            .iter()
            .map(|o| (o.name.clone(), o.display.clone()))
            .collect();

        Self {
            home_country_code: config.home_country_code.trim().to_uppercase(),
            month_names,
            generic_folder_words: lowercase_all(&config.generic_folder_words),
            noise_words: lowercase_all(&config.noise_words),
            country_names,
            city_overrides,
            max_candidates: config.max_candidates,
            distance_decay: config.distance_decay,
        }
    }

    pub fn month_name(&self, month: u32) -> Option<&str> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        self.month_names.get(index).map(String::as_str)
    }

    pub fn country_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.country_names
            .get(&code.to_uppercase())
            .map(String::as_str)
            .unwrap_or(code)
    }
}

impl Default for LabelRules {
    fn default() -> Self {
        Self::build(&LabelsConfig::default())
    }
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}
