use std::path::Path;

use slide_picker::config::{CityOverride, CountryName, LabelsConfig};
use slide_picker::labels::geo::{haversine_km, rank_candidates, score};
use slide_picker::labels::{
    assemble_caption, capitalize_first, date_from_path, normalize_folder_name, resolve_location,
    Gazetteer, LabelRules,
};
use slide_picker::model::{Coordinate, GeoCandidate};

struct ListGazetteer(Vec<GeoCandidate>);

impl Gazetteer for ListGazetteer {
    fn nearby(&self, _coordinate: Coordinate) -> Vec<GeoCandidate> {
        self.0.clone()
    }
}

fn city(name: &str, country: &str, lat: f64, lon: f64, population: u64) -> GeoCandidate {
    GeoCandidate {
        name: name.to_string(),
        country_code: country.to_string(),
        latitude: lat,
        longitude: lon,
        population,
    }
}

/// Degrees of latitude spanning `km` along a meridian.
fn km_to_lat(km: f64) -> f64 {
    (km / 6371.0).to_degrees()
}

#[test]
fn test_paris_beats_gentilly() {
    let rules = LabelRules::default();
    let at = Coordinate::new(48.858, 2.294).unwrap();
    let gazetteer = ListGazetteer(vec![
        city("Gentilly", "FR", 48.858 - km_to_lat(2.0), 2.294, 17_000),
        city("Paris", "FR", 48.858 + km_to_lat(0.5), 2.294, 2_000_000),
    ]);

    let resolved = resolve_location(at, &gazetteer, &rules).unwrap();
    assert_eq!(resolved.label, "Paris");
    assert!(
        resolved.status.starts_with("Trouvé : Paris (0.5km)"),
        "status was {}",
        resolved.status
    );
    assert!(resolved.status.contains(" [Match: Paris("));
    assert!(resolved.status.contains(") > Gentilly(2429)]"));
}

#[test]
fn test_every_non_empty_gazetteer_gives_a_label() {
    let rules = LabelRules::default();
    let gazetteer = ListGazetteer(vec![
        city("Ghost Town", "US", 40.0, -100.0, 0),
        city("Brest", "FR", 48.39, -4.49, 139_000),
    ]);
    for (lat, lon) in [(48.39, -4.49), (-33.9, 151.2), (64.1, -21.9), (1.3, 103.8)] {
        let at = Coordinate::new(lat, lon).unwrap();
        let resolved = resolve_location(at, &gazetteer, &rules).unwrap();
        assert!(!resolved.label.is_empty());
    }
}

#[test]
fn test_empty_gazetteer_gives_none() {
    let rules = LabelRules::default();
    for (lat, lon) in [(48.39, -4.49), (-33.9, 151.2)] {
        let at = Coordinate::new(lat, lon).unwrap();
        assert!(resolve_location(at, &ListGazetteer(vec![]), &rules).is_none());
    }
}

#[test]
fn test_score_is_monotonic() {
    let distances = [0.0, 0.1, 1.0, 5.0, 50.0, 500.0];
    for pair in distances.windows(2) {
        assert!(score(10_000, pair[0], 3.0) > score(10_000, pair[1], 3.0));
    }
    let populations = [1, 10, 1_000, 1_000_000];
    for pair in populations.windows(2) {
        assert!(score(pair[0], 2.0, 3.0) < score(pair[1], 2.0, 3.0));
    }
}

#[test]
fn test_ties_keep_gazetteer_order() {
    let rules = LabelRules::default();
    let at = Coordinate::new(45.0, 5.0).unwrap();
    let north = 45.0 + km_to_lat(3.0);
    // Same population at the same spot: identical scores.
    let candidates = vec![
        city("Premier", "FR", north, 5.0, 4_000),
        city("Second", "FR", north, 5.0, 4_000),
        city("Grande", "FR", 45.0, 5.0, 90_000),
    ];
    let ranked = rank_candidates(at, candidates.clone(), &rules);
    let names: Vec<&str> = ranked.iter().map(|c| c.candidate.name.as_str()).collect();
    assert_eq!(names, vec!["Grande", "Premier", "Second"]);

    let mut reversed = candidates;
    reversed.swap(0, 1);
    let ranked = rank_candidates(at, reversed, &rules);
    let names: Vec<&str> = ranked.iter().map(|c| c.candidate.name.as_str()).collect();
    assert_eq!(names, vec!["Grande", "Second", "Premier"]);
}

#[test]
fn test_scores_and_distances_are_non_negative() {
    let rules = LabelRules::default();
    let at = Coordinate::new(-45.0, 170.0).unwrap();
    let ranked = rank_candidates(
        at,
        vec![
            city("A", "NZ", -45.87, 170.5, 120_000),
            city("B", "NZ", -45.0, 170.0, 0),
            city("C", "FJ", -18.1, 178.4, 80_000),
        ],
        &rules,
    );
    assert!(ranked.iter().all(|c| c.distance_km >= 0.0 && c.score >= 0.0));
    assert!(haversine_km(-45.0, 170.0, -45.0, -170.0) > 0.0);
}

#[test]
fn test_configured_tables_drive_the_label() {
    let mut config = LabelsConfig::default();
    config.home_country_code = "BE".to_string();
    config.country_names.push(CountryName {
        code: "FR".to_string(),
        name: "France".to_string(),
    });
    config.city_overrides.push(CityOverride {
        name: "Arrondissement de Lille".to_string(),
        display: "Lille".to_string(),
    });
    let rules = LabelRules::from_config(&config).unwrap();

    let at = Coordinate::new(50.63, 3.06).unwrap();
    let gazetteer = ListGazetteer(vec![
        city("Arrondissement de Lille", "FR", 50.63, 3.06, 230_000),
        city("Tournai", "BE", 50.6, 3.39, 69_000),
    ]);
    let resolved = resolve_location(at, &gazetteer, &rules).unwrap();
    assert_eq!(resolved.label, "Lille (France)");
    assert!(resolved.status.starts_with("Trouvé : Lille (0.0km)"));
    assert!(resolved.status.contains("[Match: Arrondissement de Lille("));
}

#[test]
fn test_text_examples() {
    let rules = LabelRules::default();
    assert_eq!(normalize_folder_name("Voyage_2019-05-12", &rules.noise_words), "Voyage");
    assert_eq!(
        normalize_folder_name("Chargement appareil photo", &rules.noise_words),
        ""
    );
    assert_eq!(
        date_from_path(Path::new("/photos/2018-07-03/IMG_1.jpg"), &rules),
        "Juillet 2018"
    );
    assert_eq!(
        assemble_caption("paris", "Juillet 2018", capitalize_first),
        "Paris - Juillet 2018"
    );
    assert_eq!(assemble_caption("", "", capitalize_first), "");
}

#[test]
fn test_date_from_path_with_custom_generic_words() {
    let mut config = LabelsConfig::default();
    config.generic_folder_words = vec!["dcim".to_string()];
    let rules = LabelRules::from_config(&config).unwrap();

    let path = Path::new("/photos/2018-07-03/DCIM/IMG_1.jpg");
    assert_eq!(date_from_path(path, &rules), "Juillet 2018");

    // "camera" is no longer generic, so the folder is read as is.
    let path = Path::new("/photos/2018-07-03/Camera/IMG_1.jpg");
    assert_eq!(date_from_path(path, &rules), "");
}
