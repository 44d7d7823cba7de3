//! Manifest loading.
//!
//! The default manifest is compiled in; an external YAML file replaces it
//! entirely when a path is given.

use std::fs;
use std::path::Path;

use keepsake_core::error::DomainError;
use tracing::{debug, info};

use crate::domain::manifest::Manifest;

/// The built-in presentation content.
pub const DEFAULT_MANIFEST: &str = include_str!("../default_manifest.yaml");

/// Parses and validates a YAML manifest.
///
/// # Errors
///
/// Returns `DomainError::Content` if the YAML is malformed or the manifest
/// fails validation.
pub fn parse_manifest(yaml: &str) -> Result<Manifest, DomainError> {
    let manifest: Manifest = serde_yaml::from_str(yaml)
        .map_err(|e| DomainError::Content(format!("manifest is not valid YAML: {e}")))?;
    manifest.validate()?;
    debug!(
        photos = manifest.gallery.photos.len(),
        tracks = manifest.playlist.tracks.len(),
        "manifest validated"
    );
    Ok(manifest)
}

/// Loads the manifest at `path`, or the built-in one when `path` is `None`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the file cannot be read and
/// `DomainError::Content` if it does not parse or validate.
pub fn load_manifest(path: Option<&Path>) -> Result<Manifest, DomainError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading manifest from file");
            let yaml = fs::read_to_string(path).map_err(|e| {
                DomainError::Infrastructure(format!(
                    "failed to read manifest {}: {e}",
                    path.display()
                ))
            })?;
            parse_manifest(&yaml)
        }
        None => {
            info!("using built-in manifest");
            parse_manifest(DEFAULT_MANIFEST)
        }
    }
}
