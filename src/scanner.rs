use glob::{MatchOptions, Pattern};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Collect every photo under `root_paths` whose extension is listed in `extensions`
/// (case-insensitive), skipping paths matched by the glob `ignore_globs`.
/// Unreadable directories are logged and skipped. The result is sorted.
pub fn find_photos(
    root_paths: &[String],
    extensions: &[String],
    ignore_globs: &[String],
) -> Vec<PathBuf> {
    let ignore_patterns: Vec<Pattern> = ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    let extensions: Vec<String> = extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_lowercase())
        .collect();

    let mut photos = Vec::new();
    for root in root_paths {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_ignored(entry.path(), &ignore_patterns));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    error!("Error walking {}: {}", root, err);
                    continue;
                }
            };
            if entry.file_type().is_file() && has_extension(entry.path(), &extensions) {
                photos.push(entry.into_path());
            }
        }
    }

    photos.sort();
    debug!("{} photos found under {:?}", photos.len(), root_paths);
    photos
}

fn is_ignored(path: &Path, patterns: &[Pattern]) -> bool {
    patterns
        .iter()
        .any(|pattern| pattern.matches_path_with(path, MATCH_OPTIONS))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map_or(false, |ext| extensions.iter().any(|e| *e == ext))
}

/// Draw up to `count` photos at random. A fixed `seed` reproduces the same draw.
pub fn sample(mut photos: Vec<PathBuf>, count: usize, seed: Option<u64>) -> Vec<PathBuf> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    photos.shuffle(&mut rng);
    photos.truncate(count);
    photos
}
