//! Dropbox content hash.
//!
//! The input is split into 4 MiB blocks, each block is SHA-256 hashed, and the
//! concatenated block digests are hashed once more. The hex encoding of that
//! outer digest is what the API reports as `content_hash`.
//!
//! Block boundaries depend only on byte offsets, never on how the input was
//! chunked or how many bytes a single `read` returned.

use crate::error::Result;
use sha2::{Digest, Sha256};
use std::io::{self, Read, Write};
use std::path::Path;

/// Block size used by the content hash.
pub const CONTENT_HASH_BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// Content hash of an in-memory buffer.
pub fn content_hash(data: &[u8]) -> String {
    let mut hasher = ContentHasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Content hash of everything `reader` yields until EOF.
pub fn content_hash_reader<R: Read>(mut reader: R) -> Result<String> {
    let mut hasher = ContentHasher::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(hasher.finalize())
}

/// Content hash of a local file.
pub fn file_content_hash<P: AsRef<Path>>(path: P) -> Result<String> {
    let file = std::fs::File::open(path)?;
    content_hash_reader(io::BufReader::new(file))
}

/// Incremental content hasher for data that arrives in pieces.
///
/// Implements [`Write`], so `std::io::copy` can feed it directly.
#[derive(Clone)]
pub struct ContentHasher {
    /// Concatenated block digests, hashed as they complete.
    digests: Sha256,
    /// The block currently being filled.
    open: Sha256,
    /// Bytes already fed into `open`.
    filled: usize,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self {
            digests: Sha256::new(),
            open: Sha256::new(),
            filled: 0,
        }
    }

    pub fn update(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            let room = CONTENT_HASH_BLOCK_SIZE - self.filled;
            let (head, tail) = data.split_at(room.min(data.len()));
            self.open.update(head);
            self.filled += head.len();
            if self.filled == CONTENT_HASH_BLOCK_SIZE {
                self.seal_block();
            }
            data = tail;
        }
    }

    /// Hash the trailing partial block (unpadded) and return the hex digest.
    pub fn finalize(mut self) -> String {
        if self.filled != 0 {
            self.seal_block();
        }
        hex::encode(self.digests.finalize())
    }

    fn seal_block(&mut self) {
        let block = std::mem::take(&mut self.open);
        self.digests.update(block.finalize());
        self.filled = 0;
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ContentHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentHasher")
            .field("filled", &self.filled)
            .finish_non_exhaustive()
    }
}

impl Write for ContentHasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
