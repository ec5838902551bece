use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, instrument};

use crate::authoring::{MeasureInfo, SongDocument};

#[instrument(skip(song), fields(song_id = %song.id, path = %path.display()))]
pub fn save_song(path: &Path, song: &SongDocument) -> Result<()> {
    write_json_atomic(path, song).context("failed to save song")?;
    info!(elements = song.elements.len(), "song saved");
    Ok(())
}

#[instrument(fields(path = %path.display()))]
pub fn load_song(path: &Path) -> Result<SongDocument> {
    let song: SongDocument = read_json(path).context("invalid song json")?;
    info!(song_id = %song.id, elements = song.elements.len(), "song loaded");
    Ok(song)
}

#[instrument(fields(path = %path.display()))]
pub fn load_measure_map(path: &Path) -> Result<Vec<MeasureInfo>> {
    let measures: Vec<MeasureInfo> = read_json(path).context("invalid measure map json")?;
    debug!(measures = measures.len(), "measure map loaded");
    Ok(measures)
}

#[instrument(skip(measures), fields(measures = measures.len(), path = %path.display()))]
pub fn save_measure_map(path: &Path, measures: &[MeasureInfo]) -> Result<()> {
    write_json_atomic(path, measures).context("failed to save measure map")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(serde_json::from_slice(&content)?)
}

/// Serializes next to `path` and renames over it, so readers never see a
/// half-written file.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    fs::create_dir_all(&parent)
        .with_context(|| format!("failed to create directory: {}", parent.display()))?;

    let json = serde_json::to_vec_pretty(value).context("failed to serialize json")?;
    let mut temp_file =
        tempfile::NamedTempFile::new_in(&parent).context("failed to create temp file")?;
    temp_file
        .write_all(&json)
        .context("failed to write temp file")?;
    temp_file
        .persist(path)
        .map_err(|error| anyhow::anyhow!(error.error))
        .with_context(|| format!("failed to persist {}", path.display()))?;
    Ok(())
}
