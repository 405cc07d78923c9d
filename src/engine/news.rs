//! News feed parsing, merging and panel state.
//!
//! The content provider answers a search with two loosely related payloads:
//! a generated text listing (one `title | source | url | date` record per
//! line, in practice decorated with list markers and markdown) and a list of
//! grounding citations. [`parse`] turns the text into records, [`merge`]
//! combines both sources, and [`NewsPanel`] holds what the tile shows.

use super::provider::ProviderError;
use super::worker::{RequestSeq, RequestSequencer};
use rand::Rng;
use rand::seq::SliceRandom;

/// Number of items shown at once.
pub const NEWS_DISPLAY_COUNT: usize = 6;

pub const DEFAULT_NEWS_QUERY: &str = "trending technology news";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRecord {
    pub title: String,
    pub source: String,
    pub url: String,
    pub date: Option<String>,
}

/// Structured citation returned next to the generated text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroundingRecord {
    pub title: Option<String>,
    pub uri: String,
}

/// Everything a single news search produced.
#[derive(Debug, Clone, Default)]
pub struct NewsResponse {
    pub text: String,
    pub grounding: Vec<GroundingRecord>,
}

pub fn has_web_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    (lower.starts_with("http://") && lower.len() > "http://".len())
        || (lower.starts_with("https://") && lower.len() > "https://".len())
}

/// Host part of a URL without a leading `www.`.
pub fn url_host(url: &str) -> Option<&str> {
    let rest = url.split_once("://")?.1;
    let host = rest.split(['/', '?', '#']).next()?;
    let host = host.rsplit('@').next()?;
    let host = host.split(':').next()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    (!host.is_empty()).then_some(host)
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();

    // "1." / "12)" numbering
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim_start();
        }
    }

    for marker in ["- ", "* ", "• ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest.trim_start();
        }
    }

    line
}

fn clean_field(field: &str) -> String {
    let field = field.trim();
    let field = field
        .strip_prefix("**")
        .and_then(|f| f.strip_suffix("**"))
        .unwrap_or(field);
    let field = field.trim_matches(|c| c == '<' || c == '>' || c == '`');
    field.trim().to_string()
}

/// Parse one line of generated text. Returns `None` for anything that is
/// not a complete record with a web URL.
pub fn parse_line(line: &str) -> Option<NewsRecord> {
    let body = strip_list_marker(line);
    if body.is_empty() {
        return None;
    }

    let fields: Vec<String> = body.split('|').map(clean_field).collect();
    if fields.len() < 3 {
        return None;
    }

    let title = fields[0].clone();
    let source = fields[1].clone();
    let url = fields[2].clone();
    if title.is_empty() || !has_web_scheme(&url) || url.contains(char::is_whitespace) {
        return None;
    }

    let date = fields.get(3).filter(|d| !d.is_empty()).cloned();
    let source = if source.is_empty() {
        url_host(&url).unwrap_or_default().to_string()
    } else {
        source
    };

    Some(NewsRecord {
        title,
        source,
        url,
        date,
    })
}

/// Parse a generated listing line by line, dropping malformed lines.
pub fn parse(raw: &str) -> Vec<NewsRecord> {
    raw.lines().filter_map(parse_line).collect()
}

/// Convert grounding citations into records, skipping non-web URIs.
pub fn from_grounding(records: &[GroundingRecord]) -> Vec<NewsRecord> {
    records
        .iter()
        .filter(|r| has_web_scheme(&r.uri))
        .map(|r| {
            let host = url_host(&r.uri).unwrap_or_default().to_string();
            let title = r
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| host.clone());
            NewsRecord {
                title,
                source: host,
                url: r.uri.clone(),
                date: None,
            }
        })
        .collect()
}

/// Combine two sources, keeping the first record seen for each URL
/// (primary before fallback), up to `limit` records.
pub fn merge(primary: Vec<NewsRecord>, fallback: Vec<NewsRecord>, limit: usize) -> Vec<NewsRecord> {
    let mut seen = std::collections::HashSet::new();
    primary
        .into_iter()
        .chain(fallback)
        .filter(|r| seen.insert(r.url.clone()))
        .take(limit)
        .collect()
}

/// Records to show for one provider response.
pub fn records_from_response(response: &NewsResponse, limit: usize) -> Vec<NewsRecord> {
    let parsed = parse(&response.text);
    if parsed.is_empty() && !response.text.trim().is_empty() {
        tracing::debug!("news text did not match the record format, using grounding records");
    }
    merge(parsed, from_grounding(&response.grounding), limit)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsStatus {
    Idle,
    Loading,
    Loaded,
    Empty,
    /// The provider rejected or lacks credentials; retrying won't help.
    Unauthorized(String),
    Error(String),
}

pub struct NewsPanel {
    query: String,
    status: NewsStatus,
    pool: Vec<NewsRecord>,
    displayed: Vec<NewsRecord>,
    sequencer: RequestSequencer,
    pool_limit: usize,
}

impl NewsPanel {
    pub fn new(default_query: impl Into<String>) -> Self {
        Self {
            query: default_query.into(),
            status: NewsStatus::Idle,
            pool: Vec::new(),
            displayed: Vec::new(),
            sequencer: RequestSequencer::default(),
            pool_limit: NEWS_DISPLAY_COUNT * 3,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> &NewsStatus {
        &self.status
    }

    pub fn displayed(&self) -> &[NewsRecord] {
        &self.displayed
    }

    pub fn pool(&self) -> &[NewsRecord] {
        &self.pool
    }

    /// Start a search for `query`. Blank queries are ignored.
    pub fn search(&mut self, query: &str) -> Option<(RequestSeq, String)> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.query = query.to_string();
        Some(self.begin())
    }

    /// Re-run the current query.
    pub fn refresh(&mut self) -> (RequestSeq, String) {
        self.begin()
    }

    fn begin(&mut self) -> (RequestSeq, String) {
        let seq = self.sequencer.issue();
        self.status = NewsStatus::Loading;
        tracing::debug!(seq = seq.0, query = %self.query, "news fetch issued");
        (seq, self.query.clone())
    }

    /// Apply a provider answer. Answers to superseded requests are dropped.
    /// Returns whether the answer was applied.
    pub fn complete(&mut self, seq: RequestSeq, result: Result<NewsResponse, ProviderError>) -> bool {
        if !self.sequencer.is_current(seq) {
            tracing::debug!(seq = seq.0, "dropping stale news response");
            return false;
        }

        match result {
            Ok(response) => {
                self.pool = records_from_response(&response, self.pool_limit);
                self.displayed = self.pool.iter().take(NEWS_DISPLAY_COUNT).cloned().collect();
                self.status = if self.pool.is_empty() {
                    NewsStatus::Empty
                } else {
                    NewsStatus::Loaded
                };
                tracing::info!(count = self.pool.len(), query = %self.query, "news updated");
            }
            Err(e) if e.is_auth() => {
                tracing::warn!(error = %e, "news provider refused credentials");
                self.status = NewsStatus::Unauthorized(e.to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "news fetch failed");
                self.status = NewsStatus::Error(e.to_string());
            }
        }
        true
    }

    /// Show a random selection from the current pool.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.pool.is_empty() {
            return;
        }
        let mut picked = self.pool.clone();
        picked.shuffle(rng);
        picked.truncate(NEWS_DISPLAY_COUNT);
        self.displayed = picked;
    }
}
