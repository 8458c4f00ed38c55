//! Sharing resource: shared links and shared folder listing.

use crate::client::DropboxClient;
use crate::config::Config;
use crate::error::Result;
use crate::types::*;

#[derive(Debug, Clone)]
pub struct Sharing {
    client: DropboxClient,
}

impl From<DropboxClient> for Sharing {
    fn from(client: DropboxClient) -> Self {
        Self { client }
    }
}

impl Sharing {
    pub fn new(config: Config) -> Self {
        DropboxClient::new(config).into()
    }

    /// Create a shared link for `input.path`.
    ///
    /// Fails with `shared_link_already_exists` if the path already has one.
    pub fn create_shared_link(&self, input: &CreateSharedLinkInput) -> Result<SharedLinkMetadata> {
        self.client
            .rpc("/sharing/create_shared_link_with_settings", input)
    }

    /// First page of the folders shared with the current user.
    pub fn list_shared_folders(
        &self,
        input: &ListSharedFoldersInput,
    ) -> Result<ListSharedFoldersOutput> {
        self.client.rpc("/sharing/list_folders", input)
    }

    pub fn list_shared_folders_continue(
        &self,
        input: &ListSharedFoldersContinueInput,
    ) -> Result<ListSharedFoldersOutput> {
        self.client.rpc("/sharing/list_folders/continue", input)
    }

    /// Every shared folder, following cursors until the listing is exhausted.
    pub fn list_all_shared_folders(&self) -> Result<Vec<SharedFolderMetadata>> {
        let mut page = self.list_shared_folders(&ListSharedFoldersInput::default())?;
        let mut all = std::mem::take(&mut page.entries);

        while let Some(cursor) = page.cursor.take() {
            page = self.list_shared_folders_continue(&ListSharedFoldersContinueInput { cursor })?;
            all.append(&mut page.entries);
        }
        Ok(all)
    }
}
