use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::config::{self, AppConfig};
use crate::error::Error;
use crate::exif_reader::SignalReader;
use crate::imaging::{self, ScreenSize};
use crate::labels::{self, Gazetteer, LabelRules};
use crate::model::{CaptionOutcome, Coordinate, LocationSource, ResolvedLocation};
use crate::progress::ProgressReporter;
use crate::scanner;
use crate::sidecar;

pub struct SlideshowEngine {
    config: AppConfig,
    rules: LabelRules,
    gazetteer: Box<dyn Gazetteer>,
    reader: Box<dyn SignalReader>,
    dry_run: bool,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub scan_duration: Duration,
    pub process_duration: Duration,
    pub photos_found: usize,
    pub selected: usize,
    pub written: usize,
    pub failed: usize,
    pub located_by_gps: usize,
    pub located_by_folder: usize,
}

impl SlideshowEngine {
    pub fn new(
        config: AppConfig,
        gazetteer: Box<dyn Gazetteer>,
        reader: Box<dyn SignalReader>,
    ) -> Result<Self, Error> {
        config.validate_lookup()?;
        let rules = LabelRules::from_config(&config.labels)?;
        Ok(Self {
            config,
            rules,
            gazetteer,
            reader,
            dry_run: false,
        })
    }

    /// Compute and log captions without touching the destination directory.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn rules(&self) -> &LabelRules {
        &self.rules
    }

    /// Run the slideshow refresh:
    /// 1. Walk the source trees for photos
    /// 2. Draw `image_count` of them at random
    /// 3. For each, one at a time: resolve the caption, write `NNN.jpg` and `NNN.txt`
    ///
    /// A photo that fails is logged and counted; the run carries on with the next one.
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<RunSummary, Error> {
        self.config.validate()?;
        let dest = PathBuf::from(&self.config.dest_dir);
        if !self.dry_run && !dest.is_dir() {
            return Err(Error::DestinationMissing(dest));
        }

        let roots = config::non_overlapping_directories(self.config.source_dirs.clone());
        info!("Scanning directories: {:?}", roots);

        reporter.on_scan_start();
        let scan_start = Instant::now();
        let photos = scanner::find_photos(
            &roots,
            &self.config.extensions,
            &self.config.ignore_patterns,
        );
        let scan_duration = scan_start.elapsed();
        reporter.on_scan_complete(photos.len(), scan_duration.as_secs_f64());
        info!("Photos trouvées : {}", photos.len());

        let mut summary = RunSummary {
            scan_duration,
            photos_found: photos.len(),
            ..RunSummary::default()
        };
        if photos.is_empty() {
            return Ok(summary);
        }

        let selection = scanner::sample(photos, self.config.image_count, self.config.seed);
        summary.selected = selection.len();

        if self.config.purge_destination && !self.dry_run {
            let removed = purge_previous_slides(&dest)?;
            debug!("Removed {} files from a previous run", removed);
        }

        reporter.on_process_start(selection.len());
        let process_start = Instant::now();
        let width = slide_id_width(selection.len());
        for (i, photo) in selection.iter().enumerate() {
            let id = format!("{:0width$}", i + 1, width = width);
            info!("[{}/{}]", id, selection.len());

            let outcome = self.caption_for(photo);
            info!("  Source : {}", photo.display());
            info!("  GPS    : {}", outcome.gps_status);
            info!("  Label  : {}", outcome.caption);

            match outcome.location_source {
                LocationSource::Gps => summary.located_by_gps += 1,
                LocationSource::Folder => summary.located_by_folder += 1,
                LocationSource::None => {}
            }

            if !self.dry_run {
                match self.write_slide(photo, &dest, &id, &outcome) {
                    Ok(()) => summary.written += 1,
                    Err(err) => {
                        error!("  ! Erreur image : {}", err);
                        summary.failed += 1;
                    }
                }
            }
            reporter.on_photo_complete(i + 1, selection.len(), &outcome.caption);
        }
        summary.process_duration = process_start.elapsed();
        reporter.on_process_complete(
            summary.written,
            summary.failed,
            summary.process_duration.as_secs_f64(),
        );

        Ok(summary)
    }

    /// Caption a single photo. EXIF read failures degrade to folder-derived labels.
    pub fn caption_for(&self, photo: &Path) -> CaptionOutcome {
        let signals = match self.reader.read(photo) {
            Ok(signals) => Some(signals),
            Err(err) => {
                warn!("Cannot read EXIF from {}: {}", photo.display(), err);
                None
            }
        };
        let metadata = labels::describe_photo(photo, signals.as_ref(), &self.rules);
        labels::caption_photo(&metadata, self.gazetteer.as_ref(), &self.rules)
    }

    pub fn locate(&self, coordinate: Coordinate) -> Option<ResolvedLocation> {
        labels::resolve_location(coordinate, self.gazetteer.as_ref(), &self.rules)
    }

    fn write_slide(
        &self,
        photo: &Path,
        dest: &Path,
        id: &str,
        outcome: &CaptionOutcome,
    ) -> Result<(), Error> {
        let screen = ScreenSize {
            width: self.config.screen_width,
            height: self.config.screen_height,
        };
        imaging::render_slide(
            photo,
            &dest.join(format!("{}.jpg", id)),
            screen,
            self.config.jpeg_quality,
        )?;
        sidecar::write_sidecar(
            &dest.join(format!("{}.txt", id)),
            outcome,
            photo,
            &self.config.sidecar,
        )
    }
}

fn slide_id_width(count: usize) -> usize {
    count.to_string().len().max(3)
}

/// Delete `NNN.jpg` / `NNN.txt` files left by an earlier run. Other files are kept.
fn purge_previous_slides(dest: &Path) -> Result<usize, Error> {
    let mut removed = 0;
    for entry in fs::read_dir(dest)? {
        let path = entry?.path();
        if !path.is_file() || !is_slide_file(&path) {
            continue;
        }
        fs::remove_file(&path)?;
        removed += 1;
    }
    Ok(removed)
}

fn is_slide_file(path: &Path) -> bool {
    let numeric_stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map_or(false, |s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()));
    let slide_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e == "jpg" || e == "txt");
    numeric_stem && slide_ext
}
