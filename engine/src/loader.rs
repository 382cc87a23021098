//! Dive set loading and the synthetic fallback policy.

use std::path::Path;

use crate::dive::Dive;
use crate::synth::{self, SynthParams};

/// Failures reaching or decoding a dive data source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source file could not be read.
    #[error("read {path}: {source}")]
    Io {
        /// Path of the unreachable source.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// The source was reachable but is not valid dive JSON.
    #[error("parse {path}: {source}")]
    Parse {
        /// Path of the malformed source.
        path: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

/// Load a dive set from a JSON file holding an array of dive records.
pub fn load_dives(path: &Path) -> Result<Vec<Dive>, LoadError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| LoadError::Io { path: path.display().to_string(), source: e })?;
    serde_json::from_str(&raw)
        .map_err(|e| LoadError::Parse { path: path.display().to_string(), source: e })
}

/// Load `path`, falling back to a synthesized placeholder set on failure.
///
/// The fallback is an explicit policy applied here, not hidden inside
/// the loader: the failure is logged, a previously cached synthetic set
/// is reused when available, and a freshly synthesized set is written to
/// `cache` for the next run. The caller always receives a renderable
/// set; a missing data source never crashes the scene.
pub fn load_or_synthesize(path: &Path, cache: Option<&Path>, params: SynthParams) -> Vec<Dive> {
    match load_dives(path) {
        Ok(dives) => {
            log::info!("[loader] {} dives from {}", dives.len(), path.display());
            dives
        }
        Err(e) => {
            log::warn!("[loader] {e}; falling back to synthetic set");
            if let Some(c) = cache {
                if let Ok(dives) = load_dives(c) {
                    log::info!("[loader] {} dives from cache {}", dives.len(), c.display());
                    return dives;
                }
            }
            let dives = synth::synthesize(params);
            if let Some(c) = cache {
                match serde_json::to_string(&dives) {
                    Ok(json) => {
                        if let Err(e) = std::fs::write(c, json) {
                            log::warn!("[loader] cache write {}: {e}", c.display());
                        }
                    }
                    Err(e) => log::warn!("[loader] cache encode: {e}"),
                }
            }
            dives
        }
    }
}
