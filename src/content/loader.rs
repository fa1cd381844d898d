//! Loader for RON content files at startup.

use bevy::prelude::*;
use ron::Options;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::ContentRegistry;
use crate::animation::{Clip, ClipLibrary};

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// One character's clips in clips.ron.
#[derive(Debug, Clone, Deserialize)]
pub struct ClipSetDef {
    pub prefix: String,
    pub clips: Vec<Clip>,
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Parse RON text into `T`, reporting failures against `file`.
pub fn parse_ron<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load a RON file containing a DataFile<T> wrapper.
fn load_data_file<T>(path: &Path) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> Deserialize<'de>,
{
    let contents = read(path)?;
    let data: DataFile<T> = parse_ron(&path.display().to_string(), &contents)?;
    Ok(data.items)
}

/// Load a single RON struct (not wrapped in DataFile).
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> Deserialize<'de>,
{
    let contents = read(path)?;
    parse_ron(&path.display().to_string(), &contents)
}

/// Build a clip library from parsed clip sets.
pub fn build_clip_library(sets: Vec<ClipSetDef>) -> ClipLibrary {
    let mut library = ClipLibrary::default();
    for set in sets {
        for clip in set.clips {
            library.insert(&set.prefix, clip);
        }
    }
    library
}

/// Load all content from assets/data/*.ron.
///
/// A missing controller.ron or clips.ron falls back to built-in defaults.
/// level.ron is required. Parse errors in any present file are returned.
pub fn load_all_content(
    base_path: &Path,
) -> Result<(ContentRegistry, ClipLibrary), Vec<ContentLoadError>> {
    let mut errors = Vec::new();

    let controller_path = base_path.join("controller.ron");
    let controller = if controller_path.exists() {
        load_single_file::<ControllerDef>(&controller_path).unwrap_or_else(|e| {
            errors.push(e);
            ControllerDef::default()
        })
    } else {
        warn!(
            "{} not found, using built-in controller defaults",
            controller_path.display()
        );
        ControllerDef::default()
    };

    let clips_path = base_path.join("clips.ron");
    let clips = if clips_path.exists() {
        match load_data_file::<ClipSetDef>(&clips_path) {
            Ok(sets) => build_clip_library(sets),
            Err(e) => {
                errors.push(e);
                ClipLibrary::default()
            }
        }
    } else {
        warn!(
            "{} not found, every animation will use the default clip",
            clips_path.display()
        );
        ClipLibrary::default()
    };

    let level = match load_single_file::<LevelDef>(&base_path.join("level.ron")) {
        Ok(level) => Some(level),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    if errors.is_empty() {
        let registry = ContentRegistry {
            controller,
            level,
            clip_count: clips.len(),
        };
        Ok((registry, clips))
    } else {
        Err(errors)
    }
}
