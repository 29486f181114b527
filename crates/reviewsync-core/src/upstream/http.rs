use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::error::{Result, ReviewSyncError};
use crate::models::{Generation, RawRecord};

use super::{FetchOutcome, ForumSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSourceConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout_ms: u64,
    pub page_size: usize,
    pub max_pages: usize,
}

/// Blocking adapter for one API generation's `/notes` endpoint.
#[derive(Clone)]
pub struct HttpForumSource {
    generation: Generation,
    config: HttpSourceConfig,
    http: Client,
}

impl std::fmt::Debug for HttpForumSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpForumSource")
            .field("generation", &self.generation)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpForumSource {
    pub fn new(generation: Generation, config: HttpSourceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                ReviewSyncError::ConfigInvalid(format!("invalid REVIEWSYNC_API_TOKEN: {e}"))
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(format!("reviewsync/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            generation,
            config,
            http,
        })
    }

    pub fn config(&self) -> &HttpSourceConfig {
        &self.config
    }

    fn outcome(&self, operation: &str, result: Result<Vec<RawRecord>>) -> FetchOutcome {
        match result {
            Ok(records) => FetchOutcome::Records(records),
            Err(err) => {
                tracing::debug!(
                    generation = %self.generation,
                    operation,
                    error = %err,
                    "upstream call failed"
                );
                FetchOutcome::Unavailable(err.to_string())
            }
        }
    }

    /// Walks `/notes` pages until a short page, `limit`, or `max_pages`.
    fn fetch_notes(&self, filter: &[(&str, &str)], limit: Option<usize>) -> Result<Vec<RawRecord>> {
        let url = format!("{}/notes", self.config.base_url);
        let mut records = Vec::<RawRecord>::new();
        let mut offset = 0usize;

        for _ in 0..self.config.max_pages {
            let remaining = limit.map(|cap| cap.saturating_sub(records.len()));
            let page_limit = remaining.map_or(self.config.page_size, |left| {
                left.min(self.config.page_size)
            });
            if page_limit == 0 {
                break;
            }

            let resp = self
                .http
                .get(&url)
                .query(filter)
                .query(&[("limit", page_limit), ("offset", offset)])
                .send()?;
            let status = resp.status();
            if !status.is_success() {
                return Err(ReviewSyncError::UpstreamUnavailable(format!(
                    "{} {url} returned status {status}",
                    self.generation
                )));
            }

            let payload = resp.json::<Value>()?;
            let notes = payload
                .get("notes")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let page_len = notes.len();
            records.extend(self.decode_page(notes));

            offset += page_len;
            if page_len < page_limit {
                break;
            }
        }

        if let Some(cap) = limit {
            records.truncate(cap);
        }
        Ok(records)
    }

    fn decode_page(&self, notes: Vec<Value>) -> Vec<RawRecord> {
        notes
            .into_iter()
            .filter_map(|note| match RawRecord::from_value(self.generation, note) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::debug!(
                        generation = %self.generation,
                        error = %err,
                        "skipping undecodable note"
                    );
                    None
                }
            })
            .collect()
    }
}

impl ForumSource for HttpForumSource {
    fn generation(&self) -> Generation {
        self.generation
    }

    fn search_submissions(&self, invitation: &str) -> FetchOutcome {
        self.outcome(
            "search_submissions",
            self.fetch_notes(&[("invitation", invitation)], None),
        )
    }

    fn search_by_title(&self, title: &str) -> FetchOutcome {
        match self.generation {
            Generation::Legacy => self.outcome(
                "search_by_title",
                self.fetch_notes(&[("content.title", title)], None),
            ),
            Generation::Current => FetchOutcome::Unavailable(
                "current generation does not support title search".to_string(),
            ),
        }
    }

    fn get_forum_records(&self, forum_id: &str, limit: Option<usize>) -> FetchOutcome {
        self.outcome(
            "get_forum_records",
            self.fetch_notes(&[("forum", forum_id)], limit),
        )
    }
}
