use bytes::Bytes;
use http::header;
use reqwest::Response;
use treemirror::{EntryKind, RemoteEntry, RemoteListing};

/// Remote tree exposed by a contents API over HTTP
/// (e.g. `GET /repos/{owner}/{repo}/contents/{path}` on GitHub).
#[derive(Debug, Clone)]
pub struct HttpTree {
    client: reqwest::Client,
}

impl HttpTree {
    /// `client` should carry a user agent: GitHub rejects requests without one.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_user_agent(user_agent: &str) -> treemirror::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|err| treemirror::config_error!("Can't build HTTP client: {err}"))?;
        Ok(Self::new(client))
    }

    async fn get(&self, url: &str, accept: &str) -> treemirror::Result<Response> {
        log::trace!("GET {url}");
        let res = self
            .client
            .get(url)
            .header(header::ACCEPT, accept)
            .send()
            .await
            .map_err(|err| treemirror::network_error!("GET {url} failed: {err}"))?;
        check_response("GET", url, res).await
    }
}

impl super::ListDir for HttpTree {
    async fn list_dir(&self, listing_url: &str) -> treemirror::Result<RemoteListing> {
        log::debug!("listing entries of {listing_url}");
        let res = self.get(listing_url, "application/json").await?;
        let body = res.bytes().await?;
        let entries: Vec<api::Entry> = serde_json::from_slice(&body)
            .map_err(|err| treemirror::decode_error!("Invalid listing from {listing_url}: {err}"))?;
        entries.into_iter().map(map_entry).collect()
    }
}

impl super::FetchContent for HttpTree {
    async fn fetch_content(&self, content_url: &str) -> treemirror::Result<Bytes> {
        let res = self.get(content_url, "*/*").await?;
        let bytes = res
            .bytes()
            .await
            .map_err(|err| treemirror::network_error!("Failed to download file {content_url}: {err}"))?;
        log::trace!("received {} bytes from {content_url}", bytes.len());
        Ok(bytes)
    }
}

impl super::Remote for HttpTree {}

const FILE_TYPE: &str = "file";
const DIR_TYPE: &str = "dir";

fn map_entry(e: api::Entry) -> treemirror::Result<RemoteEntry> {
    let api::Entry {
        typ,
        name,
        download_url,
        url,
    } = e;
    match typ.as_str() {
        FILE_TYPE => {
            let content_url = download_url
                .filter(|u| !u.is_empty())
                .ok_or_else(|| treemirror::decode_error!("File entry '{name}' has no download_url"))?;
            RemoteEntry::file(name, content_url)
        }
        DIR_TYPE => {
            let listing_url = url
                .filter(|u| !u.is_empty())
                .ok_or_else(|| treemirror::decode_error!("Directory entry '{name}' has no url"))?;
            RemoteEntry::directory(name, listing_url)
        }
        _ => RemoteEntry::new(name, EntryKind::Unknown(typ)),
    }
}

async fn check_response(method: &str, url: &str, res: Response) -> treemirror::Result<Response> {
    let status = res.status();
    if !status.is_success() {
        let text = res.text().await.unwrap_or_default();
        treemirror::network_bail!("{method} {url} returned {status}\n{}", excerpt(&text));
    }
    Ok(res)
}

/// Characters of an error body kept in error messages
const EXCERPT_LEN: usize = 300;

fn excerpt(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[test]
fn test_excerpt() {
    assert_eq!(excerpt("  Not Found\n"), "Not Found");
    let long = "é".repeat(EXCERPT_LEN + 50);
    let ex = excerpt(&long);
    assert_eq!(ex.chars().count(), EXCERPT_LEN + 3);
    assert!(ex.ends_with("..."));
    assert_eq!(excerpt(&"x".repeat(EXCERPT_LEN)), "x".repeat(EXCERPT_LEN));
}

mod api {
    use serde::Deserialize;

    /// One element of a contents listing.
    /// Other fields of the response (sha, size, links...) are ignored.
    #[derive(Debug, Clone, Deserialize)]
    pub struct Entry {
        #[serde(rename = "type")]
        pub typ: String,
        pub name: String,
        pub download_url: Option<String>,
        pub url: Option<String>,
    }
}
