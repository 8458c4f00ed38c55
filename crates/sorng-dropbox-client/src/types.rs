//! Request and response records for the Dropbox API v2.
//!
//! These mirror the remote API's JSON shapes. Unknown fields in responses are
//! ignored; optional fields default to `None`.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A bare `{".tag": "..."}` union value whose variants carry no payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    #[serde(rename = ".tag")]
    pub tag: String,
}

impl Tag {
    pub fn as_str(&self) -> &str {
        &self.tag
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Metadata — Files & Folders
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Tag used to discriminate file vs folder vs deleted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetadataTag {
    File,
    Folder,
    Deleted,
}

/// Unified metadata entry (Dropbox returns a union type).
///
/// `size`, `rev`, the timestamps and `content_hash` are only sent for files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    #[serde(rename = ".tag")]
    pub tag: MetadataTag,
    pub name: String,
    #[serde(default)]
    pub path_lower: Option<String>,
    #[serde(default)]
    pub path_display: Option<String>,
    #[serde(default)]
    pub id: Option<String>,

    // File-specific fields
    #[serde(default)]
    pub client_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub server_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rev: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_info: Option<MediaInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharing_info: Option<FileSharingInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

impl Metadata {
    pub fn is_dir(&self) -> bool {
        self.tag == MetadataTag::Folder
    }

    pub fn is_file(&self) -> bool {
        self.tag == MetadataTag::File
    }

    /// Byte size for files; zero for folders and deleted entries.
    pub fn file_size(&self) -> u64 {
        match self.tag {
            MetadataTag::File => self.size.unwrap_or(0),
            _ => 0,
        }
    }
}

/// Additional information for a photo or video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum MediaInfo {
    /// The server is still extracting media metadata.
    Pending,
    Metadata { metadata: MediaMetadata },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum MediaMetadata {
    Photo(PhotoMetadata),
    Video(VideoMetadata),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PhotoMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GpsCoordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VideoMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GpsCoordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<DateTime<Utc>>,
    /// Milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u64,
    pub height: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Sharing info for a file inside a shared folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSharingInfo {
    pub read_only: bool,
    pub parent_shared_folder_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
}

/// Folder record returned by `create_folder`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderMetadata {
    pub name: String,
    #[serde(default)]
    pub path_lower: Option<String>,
    #[serde(default)]
    pub path_display: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Metadata & folder operations
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetMetadataInput {
    pub path: String,
    #[serde(default)]
    pub include_media_info: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderInput {
    pub path: String,
}

/// Input for `delete` and `permanently_delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteInput {
    pub path: String,
}

/// Input for `copy` and `move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocationInput {
    pub from_path: String,
    pub to_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreInput {
    pub path: String,
    pub rev: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  List Folder
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListFolderInput {
    pub path: String,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub include_media_info: bool,
    #[serde(default)]
    pub include_deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFolderContinueInput {
    pub cursor: String,
}

/// One page of a folder listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFolderOutput {
    pub cursor: String,
    pub has_more: bool,
    #[serde(default)]
    pub entries: Vec<Metadata>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Search
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    Filename,
    FilenameAndContent,
    DeletedFilename,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchMatchType {
    Filename,
    Content,
    Both,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchMatchTypeTag {
    #[serde(rename = ".tag")]
    pub tag: SearchMatchType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchInput {
    pub path: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub start: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub max_results: u64,
    /// `None` searches file names only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SearchMode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMatch {
    pub match_type: SearchMatchTypeTag,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutput {
    #[serde(default)]
    pub matches: Vec<SearchMatch>,
    pub more: bool,
    #[serde(default)]
    pub start: u64,
}

fn is_zero(v: &u64) -> bool {
    *v == 0
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Upload / Download
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// What to do if the target file already exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WriteMode {
    #[default]
    Add,
    Overwrite,
    /// Only write if the current revision matches; conflicts fail.
    Update(String),
}

impl Serialize for WriteMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WriteMode::Add => serializer.serialize_str("add"),
            WriteMode::Overwrite => serializer.serialize_str("overwrite"),
            WriteMode::Update(rev) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(".tag", "update")?;
                map.serialize_entry("update", rev)?;
                map.end()
            }
        }
    }
}

/// Arguments for a single-request upload (≤ 150 MB).
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadInput {
    pub path: String,
    pub mode: WriteMode,
    pub autorename: bool,
    pub mute: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_api_time"
    )]
    pub client_modified: Option<DateTime<Utc>>,
}

/// The API only accepts whole-second UTC timestamps (`2015-05-12T15:50:38Z`).
fn serialize_api_time<S: Serializer>(
    time: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match time {
        Some(t) => serializer.serialize_str(&t.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
        None => serializer.serialize_none(),
    }
}

/// Input for `download` and `get_preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadInput {
    pub path: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Thumbnails
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailFormat {
    #[default]
    Jpeg,
    Png,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailSize {
    W32H32,
    #[default]
    W64H64,
    W128H128,
    W640H480,
    W1024H768,
}

/// Thumbnails are only generated for jpg, jpeg, png, tiff, tif, gif and bmp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetThumbnailInput {
    pub path: String,
    #[serde(default)]
    pub format: ThumbnailFormat,
    #[serde(default)]
    pub size: ThumbnailSize,
}

/// Previews are only generated for office documents and rtf.
pub type GetPreviewInput = DownloadInput;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  File Revisions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRevisionsInput {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRevisionsOutput {
    pub is_deleted: bool,
    #[serde(default)]
    pub entries: Vec<Metadata>,
    #[serde(default)]
    pub server_deleted: Option<DateTime<Utc>>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Account & Space
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAccountInput {
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountName {
    pub given_name: String,
    pub surname: String,
    pub familiar_name: String,
    pub display_name: String,
    #[serde(default)]
    pub abbreviated_name: Option<String>,
}

/// Public view of another account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicAccount {
    pub account_id: String,
    pub name: AccountName,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub is_teammate: Option<bool>,
    #[serde(default)]
    pub profile_photo_url: Option<String>,
}

/// The authorised user's own account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullAccount {
    pub account_id: String,
    pub name: AccountName,
    pub email: String,
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub disabled: Option<bool>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub referral_link: Option<String>,
    #[serde(default)]
    pub is_paired: bool,
    /// `basic`, `pro` or `business`.
    #[serde(default)]
    pub account_type: Option<Tag>,
    #[serde(default)]
    pub profile_photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceUsage {
    pub used: u64,
    pub allocation: SpaceAllocation,
}

/// `individual` carries `allocated`; `team` also carries the team's `used`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceAllocation {
    #[serde(rename = ".tag")]
    pub tag: String,
    #[serde(default)]
    pub allocated: Option<u64>,
    #[serde(default)]
    pub used: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Sharing — Links
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Who can open a shared link.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    TeamOnly,
    Password,
    TeamAndPassword,
    SharedFolderOnly,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharedLinkSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSharedLinkInput {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SharedLinkSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkPermissions {
    #[serde(default)]
    pub resolved_visibility: Option<Tag>,
    #[serde(default)]
    pub can_revoke: Option<bool>,
}

/// A created shared link. `tag` is `file` or `folder`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedLinkMetadata {
    #[serde(rename = ".tag", default)]
    pub tag: Option<String>,
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub path_lower: Option<String>,
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
    #[serde(default)]
    pub link_permissions: Option<LinkPermissions>,
}

impl SharedLinkMetadata {
    /// The visibility the server actually applied, e.g. `public`.
    pub fn visibility(&self) -> Option<&str> {
        self.link_permissions
            .as_ref()?
            .resolved_visibility
            .as_ref()
            .map(Tag::as_str)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Sharing — Folders
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSharedFoldersInput {
    pub limit: u32,
}

impl Default for ListSharedFoldersInput {
    fn default() -> Self {
        Self { limit: 1000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSharedFoldersContinueInput {
    pub cursor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedFolderMetadata {
    pub name: String,
    pub shared_folder_id: String,
    /// `owner`, `editor`, `viewer` ...
    pub access_type: Tag,
    #[serde(default)]
    pub is_team_folder: Option<bool>,
    #[serde(default)]
    pub path_lower: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub time_invited: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSharedFoldersOutput {
    #[serde(default)]
    pub entries: Vec<SharedFolderMetadata>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn metadata_file_with_media_info() {
        let v = json!({
            ".tag": "file",
            "name": "Prime_Numbers.jpg",
            "path_lower": "/homework/math/prime_numbers.jpg",
            "path_display": "/Homework/math/Prime_Numbers.jpg",
            "id": "id:a4ayc_80_OEAAAAAAAAAXw",
            "client_modified": "2015-05-12T15:50:38Z",
            "server_modified": "2015-05-12T15:50:38Z",
            "rev": "a1c10ce0dd78",
            "size": 7212,
            "content_hash": "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            "media_info": {
                ".tag": "metadata",
                "metadata": {
                    ".tag": "photo",
                    "dimensions": {"width": 640, "height": 480},
                    "location": {"latitude": 10.1, "longitude": -20.5},
                    "time_taken": "2015-05-12T15:50:38Z"
                }
            },
            "sharing_info": {
                "read_only": true,
                "parent_shared_folder_id": "84528192421",
                "modified_by": "dbid:AAH4f99T0taONIb-OurWxbNQ6ywGRopQngc"
            }
        });

        let m: Metadata = serde_json::from_value(v).unwrap();
        assert!(m.is_file());
        assert!(!m.is_dir());
        assert_eq!(m.file_size(), 7212);
        assert_eq!(
            m.server_modified,
            Some(Utc.with_ymd_and_hms(2015, 5, 12, 15, 50, 38).unwrap())
        );
        match m.media_info {
            Some(MediaInfo::Metadata {
                metadata: MediaMetadata::Photo(ref p),
            }) => {
                assert_eq!(
                    p.dimensions,
                    Some(Dimensions {
                        width: 640,
                        height: 480
                    })
                );
            }
            ref other => panic!("unexpected media info {other:?}"),
        }
        assert!(m.sharing_info.as_ref().unwrap().read_only);
    }

    #[test]
    fn metadata_folder_has_zero_size() {
        let m: Metadata = serde_json::from_value(json!({
            ".tag": "folder",
            "name": "math",
            "path_lower": "/homework/math",
            "id": "id:a4ayc_80_OEAAAAAAAAAXz"
        }))
        .unwrap();
        assert!(m.is_dir());
        assert_eq!(m.file_size(), 0);
        assert!(m.rev.is_none());
    }

    #[test]
    fn media_info_pending() {
        let info: MediaInfo = serde_json::from_value(json!({".tag": "pending"})).unwrap();
        assert_eq!(info, MediaInfo::Pending);
    }

    #[test]
    fn write_mode_serialization() {
        assert_eq!(serde_json::to_value(WriteMode::Add).unwrap(), json!("add"));
        assert_eq!(
            serde_json::to_value(WriteMode::Overwrite).unwrap(),
            json!("overwrite")
        );
        assert_eq!(
            serde_json::to_value(WriteMode::Update("a1c10ce0dd78".into())).unwrap(),
            json!({".tag": "update", "update": "a1c10ce0dd78"})
        );
    }

    #[test]
    fn upload_input_formats_client_modified() {
        let input = UploadInput {
            path: "/a.txt".into(),
            mode: WriteMode::Overwrite,
            mute: true,
            client_modified: Some(
                Utc.with_ymd_and_hms(2015, 5, 12, 15, 50, 38).unwrap()
                    + chrono::Duration::milliseconds(250),
            ),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "path": "/a.txt",
                "mode": "overwrite",
                "autorename": false,
                "mute": true,
                "client_modified": "2015-05-12T15:50:38Z"
            })
        );
    }

    #[test]
    fn upload_input_omits_missing_client_modified() {
        let v = serde_json::to_value(UploadInput {
            path: "/b".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(v.get("client_modified").is_none());
        assert_eq!(v["mode"], "add");
    }

    #[test]
    fn search_input_skips_zero_paging() {
        let v = serde_json::to_value(SearchInput {
            path: "".into(),
            query: "hello".into(),
            mode: Some(SearchMode::FilenameAndContent),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            v,
            json!({"path": "", "query": "hello", "mode": "filename_and_content"})
        );
    }

    #[test]
    fn thumbnail_defaults() {
        let v = serde_json::to_value(GetThumbnailInput {
            path: "/img.png".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(v, json!({"path": "/img.png", "format": "jpeg", "size": "w64h64"}));
        assert_eq!(
            serde_json::to_value(ThumbnailSize::W1024H768).unwrap(),
            json!("w1024h768")
        );
    }

    #[test]
    fn shared_link_settings_skip_unset() {
        let v = serde_json::to_value(CreateSharedLinkInput {
            path: "/doc.txt".into(),
            settings: Some(SharedLinkSettings {
                requested_visibility: Some(Visibility::TeamAndPassword),
                link_password: Some("hunter2".into()),
                expires: None,
            }),
        })
        .unwrap();
        assert_eq!(
            v,
            json!({
                "path": "/doc.txt",
                "settings": {"requested_visibility": "team_and_password", "link_password": "hunter2"}
            })
        );
    }

    #[test]
    fn shared_link_visibility() {
        let link: SharedLinkMetadata = serde_json::from_value(json!({
            ".tag": "file",
            "url": "https://www.dropbox.com/s/2sn712vy1ovegw8/Prime_Numbers.txt?dl=0",
            "name": "Prime_Numbers.txt",
            "path_lower": "/homework/math/prime_numbers.txt",
            "link_permissions": {
                "resolved_visibility": {".tag": "public"},
                "can_revoke": false
            }
        }))
        .unwrap();
        assert_eq!(link.visibility(), Some("public"));
    }

    #[test]
    fn space_usage_individual() {
        let u: SpaceUsage = serde_json::from_value(json!({
            "used": 314159265,
            "allocation": {".tag": "individual", "allocated": 10000000000u64}
        }))
        .unwrap();
        assert_eq!(u.allocation.tag, "individual");
        assert_eq!(u.allocation.allocated, Some(10_000_000_000));
    }
}
