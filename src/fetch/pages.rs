// src/fetch/pages.rs
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::Record;

/// Records requested per page unless the caller overrides it.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Offset a fresh run starts from.
pub const DEFAULT_START_OFFSET: usize = 0;

/// Result of draining the endpoint.
///
/// `Partial` makes the abort-on-failure path explicit: the records
/// accumulated before the failing page come back together with the
/// typed cause, and the caller decides whether they are usable.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The endpoint returned an empty page; every record was retrieved.
    Complete(Vec<Record>),
    /// A page failed; `records` holds everything fetched before it.
    Partial {
        records: Vec<Record>,
        cause: ScrapeError,
    },
}

impl FetchOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, FetchOutcome::Complete(_))
    }

    /// The accumulated records, regardless of completeness.
    pub fn records(&self) -> &[Record] {
        match self {
            FetchOutcome::Complete(records) => records,
            FetchOutcome::Partial { records, .. } => records,
        }
    }
}

/// Drain the endpoint page by page until it returns an empty array.
///
/// One GET per iteration with `$limit` and `$offset` query parameters;
/// the offset advances by `page_size` after each page. There is no
/// retry: the first failing page aborts the loop and the accumulated
/// records come back as [`FetchOutcome::Partial`].
pub async fn fetch_all(
    client: &Client,
    base_url: &str,
    page_size: usize,
    start_offset: usize,
) -> Result<FetchOutcome> {
    let base = Url::parse(base_url)?;
    let mut records: Vec<Record> = Vec::new();
    let mut offset = start_offset;
    let mut pages = 0usize;

    let outcome = loop {
        match fetch_page(client, &base, page_size, offset).await {
            Ok(page) if page.is_empty() => break FetchOutcome::Complete(records),
            Ok(page) => {
                pages += 1;
                debug!(offset, count = page.len(), "page fetched");
                records.extend(page);
                offset += page_size;
            }
            Err(cause) => {
                warn!(offset, %cause, "aborting fetch");
                break FetchOutcome::Partial { records, cause };
            }
        }
    };

    info!(
        pages,
        total = outcome.records().len(),
        complete = outcome.is_complete(),
        "fetch finished"
    );
    Ok(outcome)
}

/// Issue one page request and decode its JSON array body.
async fn fetch_page(
    client: &Client,
    base: &Url,
    page_size: usize,
    offset: usize,
) -> Result<Vec<Record>> {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("$limit", &page_size.to_string())
        .append_pair("$offset", &offset.to_string());

    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|source| ScrapeError::Transport { offset, source })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ScrapeError::Status { status, offset });
    }

    let body = resp
        .bytes()
        .await
        .map_err(|source| ScrapeError::Transport { offset, source })?;
    serde_json::from_slice(&body).map_err(|source| ScrapeError::MalformedPayload { offset, source })
}
