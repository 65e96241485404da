use std::fs;
use std::path::Path;

use crate::config::SidecarConfig;
use crate::error::Error;
use crate::model::CaptionOutcome;

/// Text stored next to a slide: the caption, then optionally the full date and the source path.
/// Empty optional lines are left out.
pub fn render_sidecar(outcome: &CaptionOutcome, source: &Path, config: &SidecarConfig) -> String {
    let mut lines = vec![outcome.caption.clone()];
    if config.full_date_line && !outcome.full_date.is_empty() {
        lines.push(outcome.full_date.clone());
    }
    if config.source_path_line {
        lines.push(source.display().to_string());
    }
    lines.join("\n")
}

pub fn write_sidecar(
    dest: &Path,
    outcome: &CaptionOutcome,
    source: &Path,
    config: &SidecarConfig,
) -> Result<(), Error> {
    fs::write(dest, render_sidecar(outcome, source, config))?;
    Ok(())
}
