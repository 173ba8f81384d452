//! Depth-first, pre-order mirroring of a remote tree.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use futures::future::BoxFuture;
use treemirror::{config::DEFAULT_MAX_DEPTH, EntryKind};

use crate::storage::{Local, Remote};

/// Counters of a synchronization run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Listing requests issued, root included
    pub listings: usize,
    /// Sub-directories entered
    pub dirs: usize,
    pub downloaded: usize,
    pub skipped: usize,
    /// Entries of unknown type
    pub ignored: usize,
    /// Bytes written to local files
    pub bytes: u64,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} downloaded ({} bytes), {} skipped, {} directories entered, {} ignored",
            self.downloaded, self.bytes, self.skipped, self.dirs, self.ignored
        )
    }
}

/// State carried along one walk
#[derive(Debug, Default)]
struct Walk {
    /// Listing URLs from the root to the directory being synchronized
    ancestors: Vec<String>,
    report: Report,
}

/// Mirrors a remote tree into a local storage.
///
/// The mirror is additive: files are only downloaded when their local path
/// does not exist yet, and nothing is ever deleted.
#[derive(Debug)]
pub struct Synchronizer<R, L> {
    remote: R,
    local: L,
    max_depth: usize,
}

impl<R, L> Synchronizer<R, L>
where
    R: Remote,
    L: Local,
{
    pub fn new(remote: R, local: L) -> Self {
        Self {
            remote,
            local,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets how many directory levels below the root may be entered.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Mirrors the remote directory listed at `listing_url` into `local_dir`
    /// (relative to the local storage root, empty for the root itself).
    ///
    /// Stops at the first error; running again resumes where it stopped
    /// since existing files are skipped.
    pub async fn synchronize(
        &self,
        listing_url: &str,
        local_dir: &Utf8Path,
    ) -> treemirror::Result<Report> {
        let mut walk = Walk::default();
        self.sync_dir(listing_url.to_string(), local_dir.to_owned(), &mut walk)
            .await?;
        Ok(walk.report)
    }

    fn sync_dir<'a>(
        &'a self,
        listing_url: String,
        local_dir: Utf8PathBuf,
        walk: &'a mut Walk,
    ) -> BoxFuture<'a, treemirror::Result<()>> {
        Box::pin(async move {
            let listing = self.remote.list_dir(&listing_url).await?;
            walk.report.listings += 1;
            walk.ancestors.push(listing_url);

            for entry in listing {
                let (name, kind) = entry.into_parts();
                match kind {
                    EntryKind::File { content_url } => {
                        let target = local_dir.join(&name);
                        self.sync_file(&name, &content_url, &target, walk).await?;
                    }
                    EntryKind::Directory { listing_url } => {
                        log::info!("Entering directory: {name}");
                        let child_dir = local_dir.join(&name);
                        self.check_descent(&listing_url, &child_dir, walk)?;
                        self.local.mkdir(&child_dir, true).await?;
                        walk.report.dirs += 1;
                        self.sync_dir(listing_url, child_dir, walk).await?;
                    }
                    EntryKind::Unknown(typ) => {
                        log::debug!("Ignoring {name}: unknown entry type '{typ}'");
                        walk.report.ignored += 1;
                    }
                }
            }

            walk.ancestors.pop();
            Ok(())
        })
    }

    /// Rejects entering `child_dir` when its listing is already being walked
    /// or when it lies deeper than `max_depth`. Runs before any local change.
    fn check_descent(
        &self,
        listing_url: &str,
        child_dir: &Utf8Path,
        walk: &Walk,
    ) -> treemirror::Result<()> {
        if walk.ancestors.iter().any(|a| a == listing_url) {
            treemirror::decode_bail!("Remote tree loops back to {listing_url} at {child_dir}");
        }
        if walk.ancestors.len() > self.max_depth {
            treemirror::decode_bail!(
                "Remote tree is deeper than {} levels at {child_dir}",
                self.max_depth
            );
        }
        Ok(())
    }

    async fn sync_file(
        &self,
        name: &str,
        content_url: &str,
        target: &Utf8Path,
        walk: &mut Walk,
    ) -> treemirror::Result<()> {
        if self.local.exists(target).await? {
            log::info!("Skipping existing file: {name}");
            walk.report.skipped += 1;
            return Ok(());
        }

        log::info!("Downloading new file: {name}");
        let data = self.remote.fetch_content(content_url).await?;
        let len = data.len() as u64;
        self.local.write_file(target, data).await?;
        walk.report.downloaded += 1;
        walk.report.bytes += len;
        Ok(())
    }
}

#[test]
fn test_report_display() {
    let report = Report {
        listings: 3,
        dirs: 2,
        downloaded: 4,
        skipped: 1,
        ignored: 0,
        bytes: 1024,
    };
    assert_eq!(
        report.to_string(),
        "4 downloaded (1024 bytes), 1 skipped, 2 directories entered, 0 ignored"
    );
}
