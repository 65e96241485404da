/// Trait for reporting run progress.
///
/// The CLI implements it with an indicatif bar. All methods have default no-op implementations.
pub trait ProgressReporter {
    fn on_scan_start(&self) {}
    fn on_scan_complete(&self, _total_photos: usize, _duration_secs: f64) {}
    fn on_process_start(&self, _selected: usize) {}
    fn on_photo_complete(&self, _index: usize, _total: usize, _caption: &str) {}
    fn on_process_complete(&self, _written: usize, _failed: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
