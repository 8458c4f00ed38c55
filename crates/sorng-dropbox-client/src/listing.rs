//! Lazy, cursor-driven folder listing.
//!
//! `list_folder` returns the first page and a cursor; `list_folder/continue`
//! returns subsequent pages until `has_more` is false. [`ListFolderIter`]
//! stitches the pages into one sequence of entries in server order and only
//! fetches a page once every buffered entry has been handed out.
//!
//! Each iterator owns its own cursor walk. Listing the same folder twice
//! issues a fresh set of calls and may observe a different snapshot.

use crate::error::{Error, ReadDirError, Result};
use crate::files::Files;
use crate::types::{ListFolderContinueInput, ListFolderInput, ListFolderOutput, Metadata};
use log::debug;
use std::collections::VecDeque;

enum Cursor {
    NotStarted(ListFolderInput),
    Paging(String),
    Done,
}

/// Iterator over every entry of a folder listing.
///
/// Yields `Err` at most once: after a failed page call the iterator is fused.
pub struct ListFolderIter<'a> {
    files: &'a Files,
    buffered: VecDeque<Metadata>,
    cursor: Cursor,
}

impl<'a> ListFolderIter<'a> {
    pub(crate) fn new(files: &'a Files, input: ListFolderInput) -> Self {
        Self {
            files,
            buffered: VecDeque::new(),
            cursor: Cursor::NotStarted(input),
        }
    }

    fn fetch_page(&mut self) -> Result<()> {
        let page = match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::NotStarted(input) => self.files.list_folder(&input)?,
            Cursor::Paging(cursor) => self
                .files
                .list_folder_continue(&ListFolderContinueInput { cursor })?,
            Cursor::Done => return Ok(()),
        };
        self.accept(page);
        Ok(())
    }

    fn accept(&mut self, page: ListFolderOutput) {
        debug!(
            "list_folder page: {} entries, has_more={}",
            page.entries.len(),
            page.has_more
        );
        if page.has_more {
            self.cursor = Cursor::Paging(page.cursor);
        }
        self.buffered.extend(page.entries);
    }
}

impl Iterator for ListFolderIter<'_> {
    type Item = Result<Metadata>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.buffered.pop_front() {
                return Some(Ok(entry));
            }
            if matches!(self.cursor, Cursor::Done) {
                return None;
            }
            // An empty page with has_more set just means "ask again".
            if let Err(e) = self.fetch_page() {
                return Some(Err(e));
            }
        }
    }
}

impl std::iter::FusedIterator for ListFolderIter<'_> {}

impl Files {
    /// Lazily list `path` (`/` or `""` for the root).
    ///
    /// No request is made until the first entry is pulled.
    pub fn list_directory(&self, path: &str, recursive: bool) -> ListFolderIter<'_> {
        self.list_directory_with(ListFolderInput {
            path: path.to_string(),
            recursive,
            ..Default::default()
        })
    }

    /// As [`Files::list_directory`], with every listing flag available.
    pub fn list_directory_with(&self, input: ListFolderInput) -> ListFolderIter<'_> {
        ListFolderIter::new(self, input)
    }

    /// Collect up to `n` entries of `path`.
    ///
    /// `n <= 0` collects the whole listing and succeeds even when it is empty.
    /// A positive `n` that cannot be met fails with [`Error::EndOfData`],
    /// carrying whatever was collected. A failed page call also returns the
    /// entries gathered before it.
    pub fn read_entries(
        &self,
        path: &str,
        n: i64,
    ) -> std::result::Result<Vec<Metadata>, ReadDirError<Metadata>> {
        collect_entries(self.list_directory(path, false), n)
    }
}

pub(crate) fn collect_entries<I>(
    entries: I,
    n: i64,
) -> std::result::Result<Vec<Metadata>, ReadDirError<Metadata>>
where
    I: Iterator<Item = Result<Metadata>>,
{
    let limit = usize::try_from(n).ok().filter(|&n| n > 0);
    let mut collected = Vec::with_capacity(limit.unwrap_or(0).min(1024));

    for entry in entries {
        match entry {
            Ok(entry) => collected.push(entry),
            Err(error) => {
                return Err(ReadDirError {
                    entries: collected,
                    error,
                })
            }
        }
        if limit == Some(collected.len()) {
            return Ok(collected);
        }
    }

    match limit {
        Some(_) => Err(ReadDirError {
            entries: collected,
            error: Error::EndOfData,
        }),
        None => Ok(collected),
    }
}
