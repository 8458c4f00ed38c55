//! # SortOfRemote NG – Dropbox API Client
//!
//! Typed, blocking client for the Dropbox HTTP API v2:
//!
//! - **Transport** — RPC (JSON body) and content (header argument, raw body)
//!   calling conventions over one shared `reqwest` client
//! - **Errors** — status ≥ 400 decoded into [`ApiError`] with the API's
//!   `error_summary`
//! - **Files** — metadata, folders, copy/move/delete, search, revisions,
//!   upload, download, thumbnails and previews
//! - **Listing** — lazy iteration over cursor-paginated folder listings
//! - **File handles** — read, buffered write-on-close, stat and readdir on
//!   one [`File`]
//! - **Content hash** — Dropbox's block-wise SHA-256 `content_hash`
//! - **Users / Sharing** — account info, space usage, shared links and
//!   shared folders
//!
//! ```no_run
//! use sorng_dropbox_client::{Config, Dropbox};
//! use std::io::Write;
//!
//! # fn main() -> sorng_dropbox_client::Result<()> {
//! let dbx = Dropbox::new(Config::from_env()?);
//! for entry in dbx.files.list_directory("/", false) {
//!     println!("{}", entry?.name);
//! }
//!
//! let mut f = dbx.files.create("/hello.txt");
//! f.write_all(b"hello world")?;
//! sorng_dropbox_client::Close::close(f)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod file;
pub mod files;
pub mod hash;
pub mod listing;
pub mod sharing;
pub mod types;
pub mod users;

pub use client::{ContentResponse, DropboxClient};
pub use config::Config;
pub use error::{ApiError, Error, ReadDirError, Result};
pub use file::{Close, File, FileInfo, ReadDir, Stat};
pub use files::{normalize_path, DownloadOutput, Files};
pub use hash::{content_hash, content_hash_reader, file_content_hash, ContentHasher};
pub use listing::ListFolderIter;
pub use sharing::Sharing;
pub use users::Users;

/// All resource clients for one account, sharing a single transport.
#[derive(Debug, Clone)]
pub struct Dropbox {
    pub users: Users,
    pub files: Files,
    pub sharing: Sharing,
}

impl Dropbox {
    pub fn new(config: Config) -> Self {
        let client = DropboxClient::new(config);
        Self {
            users: client.clone().into(),
            files: client.clone().into(),
            sharing: client.into(),
        }
    }
}
