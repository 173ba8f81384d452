use bytes::Bytes;
use camino::{Utf8Path, Utf8PathBuf};
use tokio::io::AsyncWriteExt;

/// Local storage rooted at the mirror directory.
/// All paths given to it are relative to that root.
#[derive(Debug, Clone)]
pub struct FileSystem {
    root: Utf8PathBuf,
}

impl FileSystem {
    /// Build a new filesystem storage.
    /// `root` must be an existing directory.
    pub fn new<P>(root: P) -> treemirror::Result<Self>
    where
        P: AsRef<Utf8Path>,
    {
        let root = root.as_ref();
        let root = root
            .canonicalize_utf8()
            .map_err(|err| treemirror::io_error!("Can't access {root}: {err}"))?;
        if !root.is_dir() {
            treemirror::io_bail!("Not a directory: {root}");
        }
        log::debug!("Initializing FS storage in {root}");

        Ok(FileSystem { root })
    }

    fn fs_path(&self, path: &Utf8Path) -> Utf8PathBuf {
        debug_assert!(
            path.is_relative(),
            "must be called with path relative to storage root"
        );
        self.root.join(path)
    }
}

impl super::Exists for FileSystem {
    async fn exists(&self, path: &Utf8Path) -> treemirror::Result<bool> {
        let fs_path = self.fs_path(path);
        // symlink_metadata so that a dangling link still counts as present
        match tokio::fs::symlink_metadata(&fs_path).await {
            Ok(..) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(treemirror::io_error!("Can't stat {fs_path}: {err}")),
        }
    }
}

impl super::MkDir for FileSystem {
    async fn mkdir(&self, path: &Utf8Path, parents: bool) -> treemirror::Result<()> {
        let fs_path = self.fs_path(path);
        log::debug!("mkdir {}{}", if parents { "-p " } else { "" }, fs_path);
        let res = if parents {
            tokio::fs::create_dir_all(&fs_path).await
        } else {
            tokio::fs::create_dir(&fs_path).await
        };
        res.map_err(|err| treemirror::io_error!("Can't create directory {fs_path}: {err}"))
    }
}

impl super::WriteFile for FileSystem {
    async fn write_file(&self, path: &Utf8Path, data: Bytes) -> treemirror::Result<()> {
        let fs_path = self.fs_path(path);
        log::debug!("writing {fs_path} ({} bytes)", data.len());
        if fs_path.is_dir() {
            treemirror::io_bail!("{path} is a directory: {fs_path}");
        }
        if let Some(parent) = fs_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| treemirror::io_error!("Can't create directory {parent}: {err}"))?;
        }

        let write = async {
            let mut f = tokio::fs::File::create(&fs_path).await?;
            f.write_all(&data).await?;
            f.flush().await
        };
        write
            .await
            .map_err(|err| treemirror::io_error!("Failed to save file to {fs_path}: {err}"))
    }
}

impl super::Local for FileSystem {}
