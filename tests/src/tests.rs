use crate::{
    dataset::{self, Entry, BROKEN, DEEP, LOOP, ORDER, SCENARIO, UNKNOWN},
    harness::Harness,
    stubs::remote::{content_url, listing_url, Call},
};

#[tokio::test]
async fn mirror_fresh_tree() {
    let harness = Harness::new(SCENARIO);

    let report = harness.run().await.unwrap();

    assert_eq!(harness.local_content("a.txt").as_deref(), Some("/a.txt"));
    assert!(harness.has_dir("sub"));
    assert_eq!(harness.local_content("sub/b.txt").as_deref(), Some("/sub/b.txt"));
    assert_eq!(report.downloaded, 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.dirs, 1);
    assert_eq!(report.listings, 2);
    assert_eq!(report.bytes, ("/a.txt".len() + "/sub/b.txt".len()) as u64);
}

#[tokio::test]
async fn existing_file_is_untouched() {
    #[rustfmt::skip]
    const LOCAL: &[Entry] = &[
        Entry::File{name: "a.txt", content: "local version"},
    ];
    let harness = Harness::with_local(SCENARIO, LOCAL);

    let report = harness.run().await.unwrap();

    assert_eq!(
        harness.local_content("a.txt").as_deref(),
        Some("local version")
    );
    assert!(!harness.remote().fetched(&content_url("a.txt")));
    assert_eq!(harness.local_content("sub/b.txt").as_deref(), Some("/sub/b.txt"));
    assert_eq!(report.skipped, 1);
    assert_eq!(report.downloaded, 1);
}

#[tokio::test]
async fn existing_directory_counts_as_existing_file() {
    #[rustfmt::skip]
    const LOCAL: &[Entry] = &[
        Entry::Dir{name: "a.txt", entries: &[]},
    ];
    let harness = Harness::with_local(SCENARIO, LOCAL);

    harness.run().await.unwrap();

    assert!(harness.has_dir("a.txt"));
    assert!(!harness.remote().fetched(&content_url("a.txt")));
}

#[tokio::test]
async fn existing_local_directory_is_entered() {
    #[rustfmt::skip]
    const LOCAL: &[Entry] = &[
        Entry::Dir{name: "sub", entries: &[
            Entry::File{name: "extra.txt", content: "not on remote"},
        ]},
    ];
    let harness = Harness::with_local(SCENARIO, LOCAL);

    harness.run().await.unwrap();

    assert_eq!(harness.local_content("sub/b.txt").as_deref(), Some("/sub/b.txt"));
    // additive mirror: local extras are kept
    assert_eq!(
        harness.local_content("sub/extra.txt").as_deref(),
        Some("not on remote")
    );
}

#[tokio::test]
async fn second_run_fetches_nothing() {
    let harness = Harness::new(DEEP);

    let first = harness.run().await.unwrap();
    let after_first = harness.snapshot();
    let first_listings = harness.remote().list_count();
    harness.remote().clear_calls();

    let second = harness.run().await.unwrap();

    assert_eq!(harness.snapshot(), after_first);
    assert_eq!(harness.remote().fetch_count(), 0);
    assert_eq!(harness.remote().list_count(), first_listings);
    assert_eq!(second.downloaded, 0);
    assert_eq!(second.skipped, first.downloaded);
    assert_eq!(second.dirs, first.dirs);
}

#[tokio::test]
async fn all_files_are_mirrored() {
    let harness = Harness::new(DEEP);

    harness.run().await.unwrap();

    let files = dataset::files(DEEP);
    assert_eq!(files.len(), 7);
    for (path, content) in files {
        assert_eq!(
            harness.local_content(&path).as_deref(),
            Some(content),
            "content of {path}"
        );
    }
    assert!(harness.has_dir("mods/config/deep/empty"));
}

#[tokio::test]
async fn walk_is_depth_first_pre_order() {
    let harness = Harness::new(ORDER);

    harness.run().await.unwrap();

    assert_eq!(
        harness.remote().calls(),
        vec![
            Call::List(listing_url("")),
            Call::Fetch(content_url("1.txt")),
            Call::List(listing_url("d")),
            Call::Fetch(content_url("d/2.txt")),
            Call::List(listing_url("d/e")),
            Call::Fetch(content_url("d/e/3.txt")),
            Call::Fetch(content_url("4.txt")),
        ]
    );
}

#[tokio::test]
async fn unknown_entries_are_ignored() {
    let harness = Harness::new(UNKNOWN);

    let report = harness.run().await.unwrap();

    assert_eq!(harness.local_content("a.txt").as_deref(), Some("/a.txt"));
    assert_eq!(harness.local_content("b.txt").as_deref(), Some("/b.txt"));
    assert!(!harness.exists("link"));
    assert!(!harness.exists("module"));
    assert_eq!(report.ignored, 2);
    assert_eq!(report.downloaded, 2);
}

#[tokio::test]
async fn failed_download_aborts_run() {
    let harness = Harness::new(BROKEN);

    let err = harness.run().await.unwrap_err();

    assert!(err.is_network(), "{err}");
    assert_eq!(harness.local_content("a.txt").as_deref(), Some("/a.txt"));
    assert!(!harness.exists("broken.txt"));
    assert!(!harness.exists("c.txt"));
    assert!(!harness.exists("sub"));
    assert!(!harness.remote().fetched(&content_url("c.txt")));
}

#[tokio::test]
async fn rerun_after_failure_skips_written_files() {
    let harness = Harness::new(BROKEN);

    harness.run().await.unwrap_err();
    harness.remote().clear_calls();
    harness.run().await.unwrap_err();

    assert_eq!(
        harness.remote().calls(),
        vec![
            Call::List(listing_url("")),
            Call::Fetch(content_url("broken.txt")),
        ]
    );
}

#[tokio::test]
async fn missing_root_listing_is_network_error() {
    let harness = Harness::new(SCENARIO);

    let err = harness
        .sync
        .synchronize("stub://tree/nowhere", camino::Utf8Path::new(""))
        .await
        .unwrap_err();

    assert!(err.is_network(), "{err}");
    assert!(harness.snapshot().is_empty());
}

#[tokio::test]
async fn looping_tree_is_rejected() {
    let harness = Harness::new(LOOP);

    let err = harness.run().await.unwrap_err();

    assert!(err.is_decode(), "{err}");
    assert_eq!(harness.local_content("a.txt").as_deref(), Some("/a.txt"));
    assert_eq!(harness.remote().list_count(), 2);
    assert!(harness.has_dir("sub"));
    assert!(!harness.exists("sub/again"));
}

#[tokio::test]
async fn depth_limit() {
    // ORDER nests d/e: two levels below the root
    let harness = Harness::with_max_depth(ORDER, 1);
    let err = harness.run().await.unwrap_err();
    assert!(err.is_decode(), "{err}");
    assert!(harness.has_dir("d"));
    assert!(!harness.exists("d/e"));
    assert!(!harness.remote().calls().contains(&Call::List(listing_url("d/e"))));

    let harness = Harness::with_max_depth(ORDER, 2);
    harness.run().await.unwrap();
    assert_eq!(harness.local_content("d/e/3.txt").as_deref(), Some("3"));
}

#[tokio::test]
async fn sync_into_sub_directory() {
    let harness = Harness::new(SCENARIO);

    harness
        .sync
        .synchronize(&listing_url(""), camino::Utf8Path::new("nested/root"))
        .await
        .unwrap();

    assert_eq!(
        harness.local_content("nested/root/a.txt").as_deref(),
        Some("/a.txt")
    );
    assert_eq!(
        harness.local_content("nested/root/sub/b.txt").as_deref(),
        Some("/sub/b.txt")
    );
}
