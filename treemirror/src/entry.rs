//! Remote tree model.
//!
//! Entries are transient: one listing is decoded per directory, consumed by
//! the walk and dropped when the directory is done.

use std::fmt;

/// What a remote entry is, with the endpoint needed to go further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file, fetched from `content_url`
    File { content_url: String },
    /// A directory, listed from `listing_url`
    Directory { listing_url: String },
    /// Any other type reported by the remote (symlink, submodule...)
    Unknown(String),
}

impl EntryKind {
    pub fn type_str(&self) -> &str {
        match self {
            Self::File { .. } => "file",
            Self::Directory { .. } => "dir",
            Self::Unknown(typ) => typ,
        }
    }
}

/// One element of a remote directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    name: String,
    kind: EntryKind,
}

impl RemoteEntry {
    /// Build an entry, checking that `name` is a single path segment.
    /// Names of unknown kinds are never mapped to a local path and are not checked.
    pub fn new(name: impl Into<String>, kind: EntryKind) -> crate::Result<Self> {
        let name = name.into();
        if !matches!(kind, EntryKind::Unknown(..)) {
            check_name(&name)?;
        }
        Ok(Self { name, kind })
    }

    pub fn file(name: impl Into<String>, content_url: impl Into<String>) -> crate::Result<Self> {
        let content_url = content_url.into();
        if content_url.is_empty() {
            crate::decode_bail!("file entry without content URL");
        }
        Self::new(name, EntryKind::File { content_url })
    }

    pub fn directory(
        name: impl Into<String>,
        listing_url: impl Into<String>,
    ) -> crate::Result<Self> {
        let listing_url = listing_url.into();
        if listing_url.is_empty() {
            crate::decode_bail!("directory entry without listing URL");
        }
        Self::new(name, EntryKind::Directory { listing_url })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_parts(self) -> (String, EntryKind) {
        (self.name, self.kind)
    }
}

impl fmt::Display for RemoteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind.type_str())
    }
}

/// Entries of one remote directory, in the order the remote returned them
pub type RemoteListing = Vec<RemoteEntry>;

/// Rejects names that would not map to exactly one child of the local directory.
pub fn check_name(name: &str) -> crate::Result<()> {
    if name.is_empty() {
        crate::decode_bail!("empty entry name");
    }
    if name == "." || name == ".." {
        crate::decode_bail!("illegal entry name: {name}");
    }
    if name.contains(['/', '\\', '\0']) {
        crate::decode_bail!("entry name contains a path separator: {name}");
    }
    Ok(())
}

#[test]
fn test_check_name() {
    check_name("a.txt").unwrap();
    check_name(".minecraft").unwrap();
    check_name("..hidden").unwrap();
    check_name("").expect_err("");
    check_name(".").expect_err("");
    check_name("..").expect_err("");
    check_name("sub/a.txt").expect_err("");
    check_name("sub\\a.txt").expect_err("");
}

#[test]
fn test_entry_constructors() {
    let f = RemoteEntry::file("a.txt", "https://host/a.txt").unwrap();
    assert_eq!(f.to_string(), "a.txt (file)");

    let d = RemoteEntry::directory("sub", "https://host/sub").unwrap();
    assert_eq!(d.name(), "sub");
    assert_eq!(
        d.into_parts(),
        (
            "sub".to_string(),
            EntryKind::Directory {
                listing_url: "https://host/sub".into()
            }
        )
    );

    let u = RemoteEntry::new("link/odd", EntryKind::Unknown("symlink".into())).unwrap();
    assert_eq!(u.to_string(), "link/odd (symlink)");

    assert!(RemoteEntry::file("a.txt", "").unwrap_err().is_decode());
    assert!(RemoteEntry::directory("sub", "").unwrap_err().is_decode());
}
