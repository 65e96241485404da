use crate::model::{Coordinate, GeoCandidate, ResolvedLocation, ScoredCandidate};

use super::LabelRules;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Source of cities near a point, nearest first.
pub trait Gazetteer {
    fn nearby(&self, coordinate: Coordinate) -> Vec<GeoCandidate>;
}

/// Great-circle distance in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Population weighted by an inverse-distance decay; the `+ 1` keeps distance 0 finite.
pub fn score(population: u64, distance_km: f64, decay: f64) -> f64 {
    population as f64 / (distance_km * decay + 1.0)
}

/// Score the first `max_candidates` cities and order them best first. Equal scores keep
/// the gazetteer order.
pub fn rank_candidates(
    coordinate: Coordinate,
    candidates: Vec<GeoCandidate>,
    rules: &LabelRules,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .take(rules.max_candidates)
        .map(|candidate| {
            let distance_km = haversine_km(
                coordinate.latitude,
                coordinate.longitude,
                candidate.latitude,
                candidate.longitude,
            );
            let score = score(candidate.population, distance_km, rules.distance_decay);
            ScoredCandidate {
                candidate,
                distance_km,
                score,
            }
        })
        .collect();

    // `sort_by` is stable.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Pick the most plausible city around `coordinate`. `None` when the gazetteer has nothing.
pub fn resolve_location<G: Gazetteer + ?Sized>(
    coordinate: Coordinate,
    gazetteer: &G,
    rules: &LabelRules,
) -> Option<ResolvedLocation> {
    let ranked = rank_candidates(coordinate, gazetteer.nearby(coordinate), rules);
    let best = ranked.first()?;

    let city = rules
        .city_overrides
        .get(&best.candidate.name)
        .cloned()
        .unwrap_or_else(|| best.candidate.name.clone());

    let country = &best.candidate.country_code;
    let label = if country.eq_ignore_ascii_case(&rules.home_country_code) {
        city.clone()
    } else {
        format!("{} ({})", city, rules.country_name(country))
    };

    let mut status = format!("Trouvé : {} ({:.1}km)", city, best.distance_km);
    if let Some(runner_up) = ranked.get(1) {
        status.push_str(&format!(
            " [Match: {}({}) > {}({})]",
            best.candidate.name,
            best.score.round(),
            runner_up.candidate.name,
            runner_up.score.round(),
        ));
    }

    Some(ResolvedLocation { label, status })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<GeoCandidate>);

    impl Gazetteer for Fixed {
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

    fn here() -> Coordinate {
        Coordinate::new(48.858, 2.294).unwrap()
    }

    #[test]
    fn test_haversine_known_distance() {
        // Paris to London, roughly 344 km.
        let d = haversine_km(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((d - 343.5).abs() < 1.0, "got {}", d);
        assert_eq!(haversine_km(10.0, 20.0, 10.0, 20.0), 0.0);
    }

    #[test]
    fn test_haversine_antipodes_stay_finite() {
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        for i in 0..200 {
            let lat = -89.5 + i as f64 * 0.9;
            let lon = -179.0 + i as f64 * 1.79;
            let anti_lon = if lon > 0.0 { lon - 180.0 } else { lon + 180.0 };
            let d = haversine_km(lat, lon, -lat, anti_lon);
            assert!(d.is_finite(), "NaN distance for ({}, {})", lat, lon);
            assert!((d - half_circumference).abs() < 1.0, "got {}", d);
        }
    }

    #[test]
    fn test_antipodal_candidate_keeps_status_finite() {
        let gazetteer = Fixed(vec![
            city("Near", "AQ", -87.843, -176.79, 1_000_000),
            city("Antipode", "GL", 87.843, 3.21, 5_000),
        ]);
        let rules = LabelRules::default();
        let at = Coordinate::new(-87.843, -176.79).unwrap();

        let ranked = rank_candidates(at, gazetteer.0.clone(), &rules);
        assert!(ranked.iter().all(|c| c.distance_km.is_finite() && c.score.is_finite()));

        let resolved = resolve_location(at, &gazetteer, &rules).unwrap();
        assert!(!resolved.status.contains("NaN"), "{}", resolved.status);
        assert!(resolved.status.ends_with("> Antipode(0)]"), "{}", resolved.status);
    }

    #[test]
    fn test_score_monotonicity() {
        assert!(score(1000, 1.0, 3.0) > score(1000, 2.0, 3.0));
        assert!(score(2000, 1.0, 3.0) > score(1000, 1.0, 3.0));
        assert_eq!(score(1000, 0.0, 3.0), 1000.0);
        assert_eq!(score(0, 5.0, 3.0), 0.0);
    }

    #[test]
    fn test_empty_gazetteer_resolves_nothing() {
        let rules = LabelRules::default();
        assert!(resolve_location(here(), &Fixed(vec![]), &rules).is_none());
    }

    #[test]
    fn test_equal_scores_keep_gazetteer_order() {
        let rules = LabelRules::default();
        let candidates = vec![
            city("Alpha", "FR", 48.858, 2.294, 500),
            city("Beta", "FR", 48.858, 2.294, 500),
            city("Gamma", "FR", 48.858, 2.294, 500),
        ];
        let ranked = rank_candidates(here(), candidates, &rules);
        let names: Vec<&str> = ranked.iter().map(|c| c.candidate.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_candidate_cap() {
        let mut rules = LabelRules::default();
        rules.max_candidates = 2;
        let candidates = vec![
            city("Near", "FR", 48.858, 2.294, 10),
            city("Small", "FR", 48.86, 2.30, 20),
            city("Huge", "FR", 48.87, 2.31, 10_000_000),
        ];
        let ranked = rank_candidates(here(), candidates, &rules);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|c| c.candidate.name != "Huge"));
    }

    #[test]
    fn test_single_candidate_has_no_margin() {
        let rules = LabelRules::default();
        let gazetteer = Fixed(vec![city("Paris", "FR", 48.8566, 2.3522, 2_000_000)]);
        let resolved = resolve_location(here(), &gazetteer, &rules).unwrap();
        assert_eq!(resolved.label, "Paris");
        assert!(resolved.status.starts_with("Trouvé : Paris ("));
        assert!(!resolved.status.contains("[Match:"));
    }

    #[test]
    fn test_foreign_country_suffix_and_override() {
        let mut rules = LabelRules::default();
        rules
            .country_names
            .insert("ES".to_string(), "Espagne".to_string());
        rules
            .city_overrides
            .insert("Barcelona".to_string(), "Barcelone".to_string());

        let gazetteer = Fixed(vec![
            city("Barcelona", "ES", 41.3888, 2.159, 1_620_000),
            city("L'Hospitalet de Llobregat", "ES", 41.3597, 2.0998, 257_000),
            city("Porto", "PT", 41.15, -8.61, 237_000),
        ]);
        let at = Coordinate::new(41.3888, 2.16).unwrap();
        let resolved = resolve_location(at, &gazetteer, &rules).unwrap();

        assert_eq!(resolved.label, "Barcelone (Espagne)");
        assert!(resolved.status.starts_with("Trouvé : Barcelone (0.1km)"));
        assert!(resolved.status.contains("[Match: Barcelona("));
        assert!(resolved.status.contains(") > L'Hospitalet de Llobregat("));
    }

    #[test]
    fn test_unknown_country_uses_code() {
        let rules = LabelRules::default();
        let gazetteer = Fixed(vec![city("Roma", "IT", 41.89, 12.48, 2_300_000)]);
        let at = Coordinate::new(41.9, 12.5).unwrap();
        let resolved = resolve_location(at, &gazetteer, &rules).unwrap();
        assert_eq!(resolved.label, "Roma (IT)");
    }
}
