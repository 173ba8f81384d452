use bytes::Bytes;
use camino::Utf8Path;
use futures::Future;
use treemirror::RemoteListing;

pub mod fs;
pub mod http;

/// Lists the immediate children of a remote directory
pub trait ListDir {
    fn list_dir(
        &self,
        listing_url: &str,
    ) -> impl Future<Output = treemirror::Result<RemoteListing>> + Send;
}

/// Fetches the raw bytes of a remote file
pub trait FetchContent {
    fn fetch_content(&self, content_url: &str)
        -> impl Future<Output = treemirror::Result<Bytes>> + Send;
}

/// A read-only remote tree
pub trait Remote: ListDir + FetchContent + Send + Sync + 'static {}

/// Existence check of a path relative to the storage root.
/// Any kind of entry counts: file, directory or symlink.
pub trait Exists {
    fn exists(&self, path: &Utf8Path) -> impl Future<Output = treemirror::Result<bool>> + Send;
}

pub trait MkDir {
    fn mkdir(
        &self,
        path: &Utf8Path,
        parents: bool,
    ) -> impl Future<Output = treemirror::Result<()>> + Send;
}

pub trait WriteFile {
    /// Writes `data` to `path`, creating missing parent directories
    /// and replacing any previous content.
    fn write_file(
        &self,
        path: &Utf8Path,
        data: Bytes,
    ) -> impl Future<Output = treemirror::Result<()>> + Send;
}

/// A path-based local storage the mirror writes into
pub trait Local: Exists + MkDir + WriteFile + Send + Sync + 'static {}
