//! File handles.
//!
//! A [`File`] is one value that can be read (the download stream), written
//! (bytes buffered until release), stat-ed and listed. Each role is a separate
//! capability so code can depend on just the part it uses: reading, writing
//! and seeking go through `std::io::{Read, Write, Seek}`; the rest through
//! [`Stat`], [`ReadDir`] and [`Close`].
//!
//! Buffered writes are sent as a single overwrite upload by [`Close::close`].
//! Nothing is uploaded if nothing was written. Dropping an unclosed handle
//! discards its buffer, so an early return never replaces the remote file
//! with partial content.

use crate::error::{Error, ReadDirError, Result};
use crate::files::{DownloadOutput, Files};
use crate::listing::collect_entries;
use crate::types::{DownloadInput, GetMetadataInput, Metadata, UploadInput, WriteMode};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Metadata lookup for the handle's path.
pub trait Stat {
    fn stat(&self) -> Result<FileInfo>;
}

/// Directory enumeration for the handle's path.
pub trait ReadDir {
    /// Up to `n` entries; `n <= 0` means all of them.
    fn read_dir(&self, n: i64) -> std::result::Result<Vec<FileInfo>, ReadDirError<FileInfo>>;
}

/// Explicit release, reporting what implicit release can only log.
pub trait Close {
    fn close(self) -> Result<()>;
}

/// `Stat` view over [`Metadata`].
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    metadata: Metadata,
}

impl FileInfo {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Byte size; always 0 for folders.
    pub fn size(&self) -> u64 {
        self.metadata.file_size()
    }

    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }

    /// Server-side modification time. Folders have none.
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.metadata.server_modified
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn into_metadata(self) -> Metadata {
        self.metadata
    }
}

impl From<Metadata> for FileInfo {
    fn from(metadata: Metadata) -> Self {
        Self { metadata }
    }
}

/// Handle onto a single Dropbox path.
pub struct File {
    files: Files,
    path: String,
    inbound: Option<DownloadOutput>,
    pending: Vec<u8>,
    closed: bool,
}

impl std::fmt::Debug for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("File")
            .field("path", &self.path)
            .field("readable", &self.inbound.is_some())
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl Files {
    /// Open `path` for reading, writing, stat and listing.
    ///
    /// The download starts immediately. When `path` is a folder the handle is
    /// still returned, with reads at EOF, so it can be stat-ed and listed.
    /// Every other failure, `not_found` included, is returned.
    pub fn open(&self, path: &str) -> Result<File> {
        let input = DownloadInput {
            path: path.to_string(),
        };
        let inbound = match self.download(&input) {
            Ok(out) => Some(out),
            Err(Error::Api(e)) if e.is_not_file() => {
                debug!("open {path}: folder, no content stream");
                None
            }
            Err(e) => return Err(e),
        };
        Ok(File::new(self.clone(), path, inbound))
    }

    /// A write-only handle for `path`; nothing is downloaded.
    pub fn create(&self, path: &str) -> File {
        File::new(self.clone(), path, None)
    }
}

impl File {
    fn new(files: Files, path: &str, inbound: Option<DownloadOutput>) -> Self {
        Self {
            files,
            path: path.to_string(),
            inbound,
            pending: Vec::new(),
            closed: false,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Bytes written but not yet uploaded.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Release the stream and upload any pending bytes. Runs at most once.
    fn finish(&mut self) -> Result<()> {
        self.inbound = None;
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.pending.is_empty() {
            return Ok(());
        }

        let body = std::mem::take(&mut self.pending);
        debug!("uploading {} buffered bytes to {}", body.len(), self.path);
        let input = UploadInput {
            path: self.path.clone(),
            mode: WriteMode::Overwrite,
            mute: true,
            ..Default::default()
        };
        self.files.upload(&input, body)?;
        Ok(())
    }
}

impl Stat for File {
    fn stat(&self) -> Result<FileInfo> {
        let metadata = self.files.get_metadata(&GetMetadataInput {
            path: self.path.clone(),
            include_media_info: false,
        })?;
        Ok(metadata.into())
    }
}

impl ReadDir for File {
    fn read_dir(&self, n: i64) -> std::result::Result<Vec<FileInfo>, ReadDirError<FileInfo>> {
        collect_entries(self.files.list_directory(&self.path, false), n)
            .map(|entries| entries.into_iter().map(FileInfo::from).collect())
            .map_err(|e| ReadDirError {
                entries: e.entries.into_iter().map(FileInfo::from).collect(),
                error: e.error,
            })
    }
}

impl Close for File {
    fn close(mut self) -> Result<()> {
        self.finish()
    }
}

impl Read for File {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inbound.as_mut() {
            Some(body) => body.read(buf),
            None => Ok(0),
        }
    }
}

impl Write for File {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    /// Keeps the bytes buffered; the upload happens on close.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for File {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            Error::Unsupported("seek"),
        ))
    }
}

impl Drop for File {
    fn drop(&mut self) {
        self.inbound = None;
        if !self.closed && !self.pending.is_empty() {
            warn!(
                "discarding {} buffered bytes for {}: handle dropped without close",
                self.pending.len(),
                self.path
            );
        }
        self.pending = Vec::new();
    }
}
