//! Files resource: metadata, folder, relocation, search, revisions and
//! content transfer endpoints.
//!
//! Listing iteration lives in [`crate::listing`]; file handles in
//! [`crate::file`]. Both extend [`Files`].

use crate::client::{ContentResponse, DropboxClient};
use crate::config::Config;
use crate::error::Result;
use crate::types::*;
use reqwest::blocking::Body;
use std::io::{self, Read};
use std::path::Path;

/// Map the conventional root `/` to the API's root, the empty string.
pub fn normalize_path(path: &str) -> &str {
    if path == "/" {
        ""
    } else {
        path
    }
}

/// Body of a content endpoint plus what its headers said about it.
#[derive(Debug)]
pub struct DownloadOutput {
    pub body: ContentResponse,
    /// Declared byte count, when the server sent `Content-Length`.
    pub length: Option<u64>,
    /// Metadata from the `Dropbox-API-Result` header.
    pub metadata: Option<Metadata>,
}

impl DownloadOutput {
    fn from_response(body: ContentResponse) -> Self {
        Self {
            length: body.content_length(),
            metadata: body.api_result(),
            body,
        }
    }

    /// Drain the body into memory.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        self.body.into_bytes()
    }
}

impl Read for DownloadOutput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.body.read(buf)
    }
}

/// Client for the `/files/*` endpoints.
#[derive(Debug, Clone)]
pub struct Files {
    pub(crate) client: DropboxClient,
}

impl From<DropboxClient> for Files {
    fn from(client: DropboxClient) -> Self {
        Self { client }
    }
}

impl Files {
    pub fn new(config: Config) -> Self {
        DropboxClient::new(config).into()
    }

    pub fn client(&self) -> &DropboxClient {
        &self.client
    }

    // ── Metadata & folders ──────────────────────────────────────────

    pub fn get_metadata(&self, input: &GetMetadataInput) -> Result<Metadata> {
        self.client.rpc("/files/get_metadata", input)
    }

    pub fn create_folder(&self, input: &CreateFolderInput) -> Result<FolderMetadata> {
        self.client.rpc("/files/create_folder", input)
    }

    /// Delete a file or folder and its contents (recoverable).
    pub fn delete(&self, input: &DeleteInput) -> Result<Metadata> {
        self.client.rpc("/files/delete", input)
    }

    /// Delete a file or folder beyond recovery.
    pub fn permanently_delete(&self, input: &DeleteInput) -> Result<()> {
        self.client.rpc_raw("/files/permanently_delete", input)?;
        Ok(())
    }

    pub fn copy(&self, input: &RelocationInput) -> Result<Metadata> {
        self.client.rpc("/files/copy", input)
    }

    pub fn move_to(&self, input: &RelocationInput) -> Result<Metadata> {
        self.client.rpc("/files/move", input)
    }

    /// Restore a file to the given revision.
    pub fn restore(&self, input: &RestoreInput) -> Result<Metadata> {
        self.client.rpc("/files/restore", input)
    }

    pub fn list_revisions(&self, input: &ListRevisionsInput) -> Result<ListRevisionsOutput> {
        self.client.rpc("/files/list_revisions", input)
    }

    // ── Listing & search ────────────────────────────────────────────

    /// First page of a folder listing. `/` is accepted for the root.
    pub fn list_folder(&self, input: &ListFolderInput) -> Result<ListFolderOutput> {
        let input = ListFolderInput {
            path: normalize_path(&input.path).to_string(),
            ..input.clone()
        };
        self.client.rpc("/files/list_folder", &input)
    }

    /// Next page for a cursor returned by [`Files::list_folder`].
    pub fn list_folder_continue(
        &self,
        input: &ListFolderContinueInput,
    ) -> Result<ListFolderOutput> {
        self.client.rpc("/files/list_folder/continue", input)
    }

    /// Search under `path`. Without an explicit mode only file names match.
    pub fn search(&self, input: &SearchInput) -> Result<SearchOutput> {
        let input = SearchInput {
            path: normalize_path(&input.path).to_string(),
            mode: Some(input.mode.unwrap_or_default()),
            ..input.clone()
        };
        self.client.rpc("/files/search", &input)
    }

    // ── Content ─────────────────────────────────────────────────────

    /// Upload a file of up to 150 MB in one request.
    pub fn upload(&self, input: &UploadInput, body: impl Into<Body>) -> Result<Metadata> {
        self.client
            .content("/files/upload", input, Some(body.into()))?
            .into_json()
    }

    /// Upload the contents of a local file, streamed from disk.
    pub fn upload_file<P: AsRef<Path>>(&self, input: &UploadInput, local: P) -> Result<Metadata> {
        let file = std::fs::File::open(local)?;
        self.upload(input, file)
    }

    pub fn download(&self, input: &DownloadInput) -> Result<DownloadOutput> {
        let body = self.client.content("/files/download", input, None)?;
        Ok(DownloadOutput::from_response(body))
    }

    pub fn get_thumbnail(&self, input: &GetThumbnailInput) -> Result<DownloadOutput> {
        let body = self.client.content("/files/get_thumbnail", input, None)?;
        Ok(DownloadOutput::from_response(body))
    }

    /// PDF or HTML preview of an office document.
    pub fn get_preview(&self, input: &GetPreviewInput) -> Result<DownloadOutput> {
        let body = self.client.content("/files/get_preview", input, None)?;
        Ok(DownloadOutput::from_response(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::testing::mock_config;
    use httpmock::prelude::*;
    use serde_json::json;

    fn file_json(name: &str, size: u64) -> serde_json::Value {
        json!({
            ".tag": "file",
            "name": name,
            "path_lower": format!("/{}", name.to_lowercase()),
            "path_display": format!("/{name}"),
            "id": "id:a4ayc_80_OEAAAAAAAAAXw",
            "client_modified": "2015-05-12T15:50:38Z",
            "server_modified": "2015-05-12T15:50:38Z",
            "rev": "a1c10ce0dd78",
            "size": size
        })
    }

    #[test]
    fn normalize_root() {
        assert_eq!(normalize_path("/"), "");
        assert_eq!(normalize_path(""), "");
        assert_eq!(normalize_path("/Docs"), "/Docs");
    }

    #[test]
    fn get_metadata_decodes_file() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/2/files/get_metadata")
                .json_body(json!({"path": "/Readme.md", "include_media_info": false}));
            then.status(200).json_body(file_json("Readme.md", 42));
        });

        let files = Files::new(mock_config(&server));
        let meta = files
            .get_metadata(&GetMetadataInput {
                path: "/Readme.md".into(),
                ..Default::default()
            })
            .unwrap();

        mock.assert();
        assert!(meta.is_file());
        assert_eq!(meta.size, Some(42));
        assert_eq!(meta.path_display.as_deref(), Some("/Readme.md"));
    }

    #[test]
    fn get_metadata_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/2/files/get_metadata");
            then.status(409)
                .json_body(json!({"error_summary": "path/not_found/.", "error": {".tag": "path"}}));
        });

        let files = Files::new(mock_config(&server));
        let err = files
            .get_metadata(&GetMetadataInput {
                path: "/missing".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.as_api().unwrap().summary, "path/not_found/.");
    }

    #[test]
    fn create_folder_returns_folder() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/2/files/create_folder")
                .json_body(json!({"path": "/Homework/math"}));
            then.status(200).json_body(json!({
                "name": "math",
                "path_lower": "/homework/math",
                "id": "id:a4ayc_80_OEAAAAAAAAAXz"
            }));
        });

        let files = Files::new(mock_config(&server));
        let folder = files
            .create_folder(&CreateFolderInput {
                path: "/Homework/math".into(),
            })
            .unwrap();
        assert_eq!(folder.name, "math");
        assert_eq!(folder.path_lower.as_deref(), Some("/homework/math"));
    }

    #[test]
    fn permanently_delete_uses_its_own_route() {
        let server = MockServer::start();
        let permanent = server.mock(|when, then| {
            when.method(POST)
                .path("/2/files/permanently_delete")
                .json_body(json!({"path": "/old"}));
            then.status(200).body("null");
        });
        let soft = server.mock(|when, then| {
            when.method(POST).path("/2/files/delete");
            then.status(200).json_body(file_json("old", 1));
        });

        let files = Files::new(mock_config(&server));
        files
            .permanently_delete(&DeleteInput { path: "/old".into() })
            .unwrap();

        permanent.assert_hits(1);
        soft.assert_hits(0);
    }

    #[test]
    fn copy_and_move_send_both_paths() {
        let server = MockServer::start();
        let copy = server.mock(|when, then| {
            when.method(POST)
                .path("/2/files/copy")
                .json_body(json!({"from_path": "/a.txt", "to_path": "/b.txt"}));
            then.status(200).json_body(file_json("b.txt", 3));
        });
        let mv = server.mock(|when, then| {
            when.method(POST)
                .path("/2/files/move")
                .json_body(json!({"from_path": "/b.txt", "to_path": "/c.txt"}));
            then.status(200).json_body(file_json("c.txt", 3));
        });

        let files = Files::new(mock_config(&server));
        let copied = files
            .copy(&RelocationInput {
                from_path: "/a.txt".into(),
                to_path: "/b.txt".into(),
            })
            .unwrap();
        let moved = files
            .move_to(&RelocationInput {
                from_path: "/b.txt".into(),
                to_path: "/c.txt".into(),
            })
            .unwrap();

        copy.assert();
        mv.assert();
        assert_eq!(copied.name, "b.txt");
        assert_eq!(moved.name, "c.txt");
    }

    #[test]
    fn restore_and_revisions() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/2/files/list_revisions")
                .json_body(json!({"path": "/a.txt", "limit": 2}));
            then.status(200).json_body(json!({
                "is_deleted": false,
                "entries": [file_json("a.txt", 3), file_json("a.txt", 2)]
            }));
        });
        let restore = server.mock(|when, then| {
            when.method(POST)
                .path("/2/files/restore")
                .json_body(json!({"path": "/a.txt", "rev": "a1c10ce0dd78"}));
            then.status(200).json_body(file_json("a.txt", 2));
        });

        let files = Files::new(mock_config(&server));
        let revs = files
            .list_revisions(&ListRevisionsInput {
                path: "/a.txt".into(),
                limit: Some(2),
            })
            .unwrap();
        assert!(!revs.is_deleted);
        assert_eq!(revs.entries.len(), 2);

        let rev = revs.entries[1].rev.clone().unwrap();
        let restored = files
            .restore(&RestoreInput {
                path: "/a.txt".into(),
                rev,
            })
            .unwrap();
        restore.assert();
        assert_eq!(restored.size, Some(2));
    }

    #[test]
    fn list_folder_normalizes_root() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/2/files/list_folder").json_body(json!({
                "path": "",
                "recursive": false,
                "include_media_info": false,
                "include_deleted": false
            }));
            then.status(200).json_body(json!({
                "cursor": "c1",
                "has_more": false,
                "entries": [file_json("a.txt", 1)]
            }));
        });

        let files = Files::new(mock_config(&server));
        let page = files
            .list_folder(&ListFolderInput {
                path: "/".into(),
                ..Default::default()
            })
            .unwrap();
        mock.assert();
        assert_eq!(page.entries.len(), 1);
        assert!(!page.has_more);
    }

    #[test]
    fn search_defaults_to_filename_mode() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/2/files/search")
                .json_body(json!({"path": "", "query": "hello", "mode": "filename"}));
            then.status(200).json_body(json!({
                "matches": [{"match_type": {".tag": "filename"}, "metadata": file_json("hello.txt", 5)}],
                "more": false,
                "start": 1
            }));
        });

        let files = Files::new(mock_config(&server));
        let out = files
            .search(&SearchInput {
                path: "/".into(),
                query: "hello".into(),
                ..Default::default()
            })
            .unwrap();
        mock.assert();
        assert_eq!(out.matches.len(), 1);
        assert_eq!(out.matches[0].match_type.tag, SearchMatchType::Filename);
        assert_eq!(out.start, 1);
    }

    #[test]
    fn upload_sends_arg_and_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/2/files/upload")
                .header(
                    "dropbox-api-arg",
                    r#"{"path":"/hello.txt","mode":"overwrite","autorename":false,"mute":true}"#,
                )
                .header("content-type", "application/octet-stream")
                .body("hello");
            then.status(200).json_body(file_json("hello.txt", 5));
        });

        let files = Files::new(mock_config(&server));
        let meta = files
            .upload(
                &UploadInput {
                    path: "/hello.txt".into(),
                    mode: WriteMode::Overwrite,
                    mute: true,
                    ..Default::default()
                },
                b"hello".to_vec(),
            )
            .unwrap();
        mock.assert();
        assert_eq!(meta.size, Some(5));
    }

    #[test]
    fn upload_file_streams_from_disk() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/2/files/upload").body("from disk");
            then.status(200).json_body(file_json("disk.txt", 9));
        });

        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut tmp, b"from disk").unwrap();

        let files = Files::new(mock_config(&server));
        files
            .upload_file(
                &UploadInput {
                    path: "/disk.txt".into(),
                    ..Default::default()
                },
                tmp.path(),
            )
            .unwrap();
        mock.assert();
    }

    #[test]
    fn download_carries_length_and_metadata() {
        let server = MockServer::start();
        let result = file_json("hello.txt", 5).to_string();
        server.mock(move |when, then| {
            when.method(POST)
                .path("/2/files/download")
                .header("dropbox-api-arg", r#"{"path":"/hello.txt"}"#);
            then.status(200)
                .header("dropbox-api-result", result.as_str())
                .body("hello");
        });

        let files = Files::new(mock_config(&server));
        let out = files
            .download(&DownloadInput {
                path: "/hello.txt".into(),
            })
            .unwrap();
        assert_eq!(out.length, Some(5));
        assert_eq!(out.metadata.as_ref().map(|m| m.name.as_str()), Some("hello.txt"));
        assert_eq!(out.into_bytes().unwrap(), b"hello");
    }

    #[test]
    fn thumbnail_and_preview_routes() {
        let server = MockServer::start();
        let thumb = server.mock(|when, then| {
            when.method(POST).path("/2/files/get_thumbnail").header(
                "dropbox-api-arg",
                r#"{"path":"/img.jpg","format":"png","size":"w128h128"}"#,
            );
            then.status(200).body([0x89u8, b'P', b'N', b'G']);
        });
        let preview = server.mock(|when, then| {
            when.method(POST)
                .path("/2/files/get_preview")
                .header("dropbox-api-arg", r#"{"path":"/doc.docx"}"#);
            then.status(200).body("%PDF");
        });

        let files = Files::new(mock_config(&server));
        let img = files
            .get_thumbnail(&GetThumbnailInput {
                path: "/img.jpg".into(),
                format: ThumbnailFormat::Png,
                size: ThumbnailSize::W128H128,
            })
            .unwrap()
            .into_bytes()
            .unwrap();
        let pdf = files
            .get_preview(&GetPreviewInput {
                path: "/doc.docx".into(),
            })
            .unwrap()
            .into_bytes()
            .unwrap();

        thumb.assert();
        preview.assert();
        assert_eq!(img.len(), 4);
        assert_eq!(pdf, b"%PDF");
    }
}
