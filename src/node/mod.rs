pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{Result, RichListError};
use self::types::{NodeInfo, OutputIdsPage, OutputResponse};

/// Upper bound on in-flight output requests during batch resolution.
/// Parallelism here is an optimization only; aggregation is commutative
/// over addresses, so the observable result does not depend on it.
pub const OUTPUT_FETCH_CONCURRENCY: usize = 16;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// The query surface of a ledger node that the pipeline consumes. Kept as a
/// trait so the pipeline can run against a mock in tests.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn get_info(&self) -> Result<NodeInfo>;

    /// Resolves the id of the output that currently holds the token's
    /// foundry. The token id is the foundry id on this network.
    async fn foundry_output_id(&self, token_id: &str) -> Result<String>;

    async fn get_output(&self, output_id: &str) -> Result<OutputResponse>;

    /// Resolves the full bodies of every id. Either all outputs are
    /// returned or the call fails; partial results are never handed back.
    async fn get_outputs(&self, output_ids: &[String]) -> Result<Vec<OutputResponse>>;

    /// Returns the ids of every basic output matching the filter,
    /// exhausting indexer pagination internally.
    async fn basic_output_ids(&self, has_native_tokens: bool) -> Result<Vec<String>>;
}

/// HTTP client for the Stardust core and indexer REST routes.
pub struct NodeClient {
    http: Client,
    base: String,
}

impl NodeClient {
    pub fn new(node_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("shimmer-rich-list/0.1"),
        );
        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base: node_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {url}");
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl LedgerClient for NodeClient {
    async fn get_info(&self) -> Result<NodeInfo> {
        self.get_json(&format!("{}/api/core/v2/info", self.base)).await
    }

    async fn foundry_output_id(&self, token_id: &str) -> Result<String> {
        let url = format!("{}/api/indexer/v1/foundries/{}", self.base, token_id);
        debug!("GET {url}");
        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RichListError::TokenNotFound {
                token_id: token_id.to_string(),
            });
        }
        let page: OutputIdsPage = response.error_for_status()?.json().await?;
        page.items
            .into_iter()
            .next()
            .ok_or_else(|| RichListError::TokenNotFound {
                token_id: token_id.to_string(),
            })
    }

    async fn get_output(&self, output_id: &str) -> Result<OutputResponse> {
        self.get_json(&format!("{}/api/core/v2/outputs/{}", self.base, output_id))
            .await
    }

    async fn get_outputs(&self, output_ids: &[String]) -> Result<Vec<OutputResponse>> {
        let pb = ProgressBar::new(output_ids.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} outputs",
            )
            .unwrap()
            .progress_chars("##-"),
        );

        let requests: Vec<_> = output_ids.iter().map(|id| self.get_output(id)).collect();
        let outputs = stream::iter(requests)
            .buffered(OUTPUT_FETCH_CONCURRENCY)
            .inspect_ok(|_| pb.inc(1))
            .try_collect::<Vec<_>>()
            .await;
        pb.finish_and_clear();
        outputs
    }

    async fn basic_output_ids(&self, has_native_tokens: bool) -> Result<Vec<String>> {
        let url = format!("{}/api/indexer/v1/outputs/basic", self.base);
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            debug!("GET {url} cursor={cursor:?}");
            let mut request = self.http.get(&url);
            if has_native_tokens {
                request = request.query(&[("hasNativeTokens", "true")]);
            }
            if let Some(cursor) = &cursor {
                request = request.query(&[("cursor", cursor.as_str())]);
            }
            let page: OutputIdsPage = request.send().await?.error_for_status()?.json().await?;
            items.extend(page.items);
            match page.cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(items)
    }
}
