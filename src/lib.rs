pub mod config;
pub mod engine;
pub mod error;
pub mod exif_reader;
pub mod gazetteer;
pub mod imaging;
pub mod labels;
pub mod model;
pub mod progress;
pub mod scanner;
pub mod sidecar;

pub use config::AppConfig;
pub use engine::{RunSummary, SlideshowEngine};
pub use error::Error;
pub use exif_reader::{ExifReader, SignalReader};
pub use gazetteer::GeoNamesGazetteer;
pub use progress::{ProgressReporter, SilentReporter};
