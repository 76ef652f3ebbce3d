use std::io;
use std::path::Path;

use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use reqwest::multipart::Part;
use reqwest::Body;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use super::ProgressReporter;

/// Size of the chunks the file is streamed in.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// A file to upload, read as a stream of chunks so it's never fully loaded in
/// memory.
pub struct UploadFile {
    name: String,
    length: Option<u64>,
    chunks: BoxStream<'static, io::Result<Vec<u8>>>,
}

impl UploadFile {
    /// Opens a file from the local file system.
    ///
    /// # Errors
    ///
    /// Will return an error if the file can't be opened or it's not a regular
    /// file.
    pub async fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path).await?;
        let metadata = file.metadata().await?;

        if !metadata.is_file() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("{} is not a file", path.display())));
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            name,
            length: Some(metadata.len()),
            chunks: read_chunks(file),
        })
    }

    #[must_use]
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Self {
        let chunks: Vec<io::Result<Vec<u8>>> = bytes.chunks(CHUNK_SIZE).map(|chunk| Ok(chunk.to_vec())).collect();

        Self {
            name: name.to_string(),
            length: Some(bytes.len() as u64),
            chunks: stream::iter(chunks).boxed(),
        }
    }

    /// A file whose content comes from any stream of chunks. The length is
    /// optional; without it upload progress is indeterminate.
    #[must_use]
    pub fn from_stream(name: &str, length: Option<u64>, chunks: BoxStream<'static, io::Result<Vec<u8>>>) -> Self {
        Self {
            name: name.to_string(),
            length,
            chunks,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn length(&self) -> Option<u64> {
        self.length
    }

    /// Converts the file into a multipart part. Every chunk pulled by the
    /// HTTP client is reported to `progress`.
    #[must_use]
    pub fn into_part(self, mut progress: ProgressReporter) -> Part {
        let chunks = self.chunks.inspect_ok(move |chunk| progress.advance(chunk.len() as u64));

        let body = Body::wrap_stream(chunks);

        let part = match self.length {
            Some(length) => Part::stream_with_length(body, length),
            None => Part::stream(body),
        };

        part.file_name(self.name)
    }
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

fn read_chunks(file: File) -> BoxStream<'static, io::Result<Vec<u8>>> {
    stream::try_unfold(file, |mut file| async move {
        let mut chunk = vec![0; CHUNK_SIZE];

        let read = file.read(&mut chunk).await?;

        if read == 0 {
            return Ok(None);
        }

        chunk.truncate(read);

        Ok(Some((chunk, file)))
    })
    .boxed()
}
