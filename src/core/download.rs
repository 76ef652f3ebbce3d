//! Download of the `.torrent` file of a torrent.
//!
//! The file is saved as `<name up to the first dot>.torrent`. For example,
//! the torrent of `ubuntu-22.04.iso` is saved as `ubuntu-22.torrent`.
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use torrust_tracker_dashboard_primitives::torrent::Torrent;

use crate::core::api::Api;
use crate::core::transport;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to download the torrent file: {source}")]
    Transport {
        #[from]
        source: transport::Error,
    },

    #[error("Failed to save the torrent file to {path}: {source}")]
    Io { path: Utf8PathBuf, source: io::Error },
}

/// Downloads the torrent file and saves it in `dir`, which is created if it
/// does not exist.
///
/// It returns the path of the saved file. An existing file with the same
/// name is overwritten.
///
/// # Errors
///
/// Will return an error if the file can't be downloaded or written.
pub async fn save_torrent_file<A: Api + ?Sized>(api: &A, torrent: &Torrent, dir: &Utf8Path) -> Result<Utf8PathBuf, Error> {
    let bytes = api.download(&torrent.info_hash).await?;

    tokio::fs::create_dir_all(dir).await.map_err(|err| Error::Io {
        path: dir.to_path_buf(),
        source: err,
    })?;

    let path = dir.join(torrent.torrent_file_name());

    tokio::fs::write(&path, &bytes).await.map_err(|err| Error::Io {
        path: path.clone(),
        source: err,
    })?;

    tracing::info!(info_hash = %torrent.info_hash, %path, bytes = bytes.len(), "torrent file saved");

    Ok(path)
}
