use camino::Utf8Path;
use treemirror::Config;

pub mod storage;
pub mod sync;

pub use sync::{Report, Synchronizer};

/// Mirrors the tree described by `config` into its local root.
pub async fn mirror(config: &Config) -> treemirror::Result<Report> {
    let root = config.local_root().await?;
    log::info!("Downloading into {root}");

    let remote = storage::http::HttpTree::with_user_agent(&config.user_agent())?;
    let local = storage::fs::FileSystem::new(&root)?;

    let sync = Synchronizer::new(remote, local).with_max_depth(config.max_depth());
    sync.synchronize(config.root_url(), Utf8Path::new("")).await
}
