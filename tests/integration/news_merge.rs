// News merging and panel state across responses

use insta::assert_snapshot;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use zendash::engine::news::{GroundingRecord, merge, records_from_response};
use zendash::engine::{
    NEWS_DISPLAY_COUNT, NewsPanel, NewsRecord, NewsResponse, NewsStatus, ProviderError,
};

fn record(title: &str, url: &str) -> NewsRecord {
    NewsRecord {
        title: title.to_string(),
        source: "wire".to_string(),
        url: url.to_string(),
        date: None,
    }
}

fn listing(count: usize) -> NewsResponse {
    let text = (0..count)
        .map(|i| format!("{}. Story {} | Wire | https://news.example/{}", i + 1, i, i))
        .collect::<Vec<_>>()
        .join("\n");
    NewsResponse {
        text,
        grounding: Vec::new(),
    }
}

fn record_strategy() -> impl Strategy<Value = NewsRecord> {
    ("[A-Za-z ]{1,12}", 0u8..8).prop_map(|(title, n)| record(&title, &format!("https://x.test/{}", n)))
}

#[test]
fn test_grounding_fills_in_when_text_is_prose() {
    let response = NewsResponse {
        text: "Here is a summary of today's technology headlines without any structure.".into(),
        grounding: vec![
            GroundingRecord {
                title: Some("Chip shortage eases".into()),
                uri: "https://www.reuters.com/chips".into(),
            },
            GroundingRecord {
                title: None,
                uri: "https://lwn.net/Articles/1".into(),
            },
            GroundingRecord {
                title: Some("Internal".into()),
                uri: "vertexaisearch://redirect".into(),
            },
        ],
    };

    let rendered: Vec<String> = records_from_response(&response, NEWS_DISPLAY_COUNT)
        .iter()
        .map(|r| format!("{} [{}] {}", r.title, r.source, r.url))
        .collect();
    assert_snapshot!(rendered.join(" / "), @"Chip shortage eases [reuters.com] https://www.reuters.com/chips / lwn.net [lwn.net] https://lwn.net/Articles/1");
}

#[test]
fn test_text_records_win_over_grounding_duplicates() {
    let response = NewsResponse {
        text: "Parsed title | Wire | https://same.example/a".into(),
        grounding: vec![GroundingRecord {
            title: Some("Citation title".into()),
            uri: "https://same.example/a".into(),
        }],
    };

    let records = records_from_response(&response, NEWS_DISPLAY_COUNT);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Parsed title");
}

#[test]
fn test_panel_drops_superseded_response() {
    let mut panel = NewsPanel::new("rust");
    let (first, _) = panel.refresh();
    let (second, query) = panel.search("ratatui").unwrap();
    assert_eq!(query, "ratatui");

    // The older answer arrives last and must not overwrite the newer one
    assert!(panel.complete(second, Ok(listing(2))));
    assert!(!panel.complete(first, Ok(listing(9))));

    assert_eq!(panel.status(), &NewsStatus::Loaded);
    assert_eq!(panel.displayed().len(), 2);
    assert_eq!(panel.query(), "ratatui");
}

#[test]
fn test_panel_reports_empty_and_error() {
    let mut panel = NewsPanel::new("rust");

    let (seq, _) = panel.refresh();
    panel.complete(seq, Ok(NewsResponse::default()));
    assert_eq!(panel.status(), &NewsStatus::Empty);

    let (seq, _) = panel.refresh();
    panel.complete(seq, Err(ProviderError::MissingApiKey));
    assert!(matches!(panel.status(), NewsStatus::Unauthorized(msg) if msg.contains("API key")));

    let (seq, _) = panel.refresh();
    panel.complete(seq, Err(ProviderError::Offline));
    assert!(matches!(panel.status(), NewsStatus::Error(_)));
}

#[test]
fn test_blank_search_keeps_previous_query() {
    let mut panel = NewsPanel::new("rust");
    assert!(panel.search("   ").is_none());
    assert_eq!(panel.query(), "rust");
    assert_eq!(panel.status(), &NewsStatus::Idle);
}

#[test]
fn test_shuffle_draws_from_the_pool() {
    let mut panel = NewsPanel::new("rust");
    let (seq, _) = panel.refresh();
    panel.complete(seq, Ok(listing(15)));
    assert_eq!(panel.displayed().len(), NEWS_DISPLAY_COUNT);
    assert_eq!(panel.pool().len(), 15);

    let mut rng = StdRng::seed_from_u64(11);
    panel.shuffle(&mut rng);

    let pool: HashSet<&str> = panel.pool().iter().map(|r| r.url.as_str()).collect();
    let shown: HashSet<&str> = panel.displayed().iter().map(|r| r.url.as_str()).collect();
    assert_eq!(shown.len(), NEWS_DISPLAY_COUNT);
    assert!(shown.is_subset(&pool));
}

proptest! {
    /// Merged output has unique URLs, respects the limit, and keeps the
    /// first occurrence of every URL.
    #[test]
    fn prop_merge_dedups_and_limits(
        primary in prop::collection::vec(record_strategy(), 0..10),
        fallback in prop::collection::vec(record_strategy(), 0..10),
        limit in 0usize..12,
    ) {
        let merged = merge(primary.clone(), fallback.clone(), limit);

        prop_assert!(merged.len() <= limit);
        let urls: HashSet<&str> = merged.iter().map(|r| r.url.as_str()).collect();
        prop_assert_eq!(urls.len(), merged.len());

        for r in &merged {
            let first = primary
                .iter()
                .chain(fallback.iter())
                .find(|c| c.url == r.url);
            prop_assert_eq!(Some(r), first);
        }

        let distinct: HashSet<&str> = primary
            .iter()
            .chain(fallback.iter())
            .map(|r| r.url.as_str())
            .collect();
        prop_assert_eq!(merged.len(), distinct.len().min(limit));
    }
}
