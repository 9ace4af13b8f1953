//! End-to-end behaviour of the in-process store
//!
//! Drives `CacheStore` over `InProcessBounded` the way a rendering pipeline
//! would, with a mock clock for every age-related assertion.

#![allow(dead_code)]

#[path = "support.rs"]
mod support;

use std::time::Duration;

use fragcache_common::time::MockClock;
use fragcache_core::CacheConfig;
use fragcache_domain::{CacheSettings, Fragment};
use fragcache_infra::{fragment_store, in_process_store_with_clock};
use support::string_store;

const HOUR: Duration = Duration::from_secs(3600);

#[tokio::test]
async fn lru_keeps_recently_read_entry_under_pressure() {
    let (store, _clock) = string_store(23, HOUR, false);

    for i in 1..=7 {
        store.new_entry("test", &i.to_string(), format!("hello{i}")).await.unwrap();
    }
    assert_eq!(store.adapter().keys(), vec!["test-7", "test-6", "test-5"]);

    // Reading "5" makes it the most recently used entry
    let lookup = store.get_entry("test", "5").await.unwrap();
    assert_eq!(lookup.into_value().as_deref(), Some("hello5"));

    store.new_entry("foobar", "1", "blahblah".to_string()).await.unwrap();
    store.new_entry("foobar", "2", "blahblah".to_string()).await.unwrap();

    assert_eq!(store.adapter().keys(), vec!["foobar-2", "foobar-1", "test-5"]);
    assert_eq!(store.size().await.unwrap(), 6 + 8 + 8);

    for evicted in ["1", "2", "3", "4", "6", "7"] {
        assert!(store.get_entry("test", evicted).await.unwrap().is_not_found(), "test-{evicted}");
    }
}

#[tokio::test]
async fn fragment_budget_frees_least_recent_entries_first() {
    // Each "test" fragment weighs 6 (html) + 6 (key); each "foobar" one 20 + 8
    let config = CacheConfig::<Fragment>::fragments()
        .max_weight(79)
        .max_age(Duration::from_millis(100))
        .build()
        .unwrap();
    let clock = MockClock::new();
    let store = in_process_store_with_clock(&config, clock.clone());

    for i in 1..=7 {
        store.new_entry("test", &i.to_string(), Fragment::new(format!("hello{i}"))).await.unwrap();
    }
    assert_eq!(store.size().await.unwrap(), 72);

    clock.advance_millis(90);
    assert!(store.get_entry("test", "5").await.unwrap().is_hit());

    store.new_entry("foobar", "1", Fragment::new("blahblahblahblahblah")).await.unwrap();
    let keys = store.adapter().keys();
    for expected in ["test-4", "test-6", "test-5", "foobar-1"] {
        assert!(keys.iter().any(|key| *key == expected), "{expected} missing from {keys:?}");
    }
    assert_eq!(keys, vec!["foobar-1", "test-5", "test-7", "test-6", "test-4"]);

    store.new_entry("foobar", "2", Fragment::new("blahblahblahblahblah")).await.unwrap();
    assert_eq!(store.adapter().keys(), vec!["foobar-2", "foobar-1", "test-5"]);
    assert_eq!(store.size().await.unwrap(), 68);
}

#[tokio::test]
async fn entries_expire_after_max_age() {
    let (store, clock) = string_store(1024, Duration::from_millis(10), true);

    store.new_entry("test", "1", "hello1".to_string()).await.unwrap();
    store.new_entry("test", "2", "hello2".to_string()).await.unwrap();
    assert!(store.get_entry("test", "1").await.unwrap().is_hit());

    clock.advance_millis(100);

    assert!(store.get_entry("test", "1").await.unwrap().is_not_found());
    assert!(store.get_entry("test", "2").await.unwrap().is_not_found());
    assert_eq!(store.size().await.unwrap(), 0);
}

#[tokio::test]
async fn expiry_does_not_wait_for_capacity_pressure() {
    let (store, clock) = string_store(1024, Duration::from_millis(10), false);
    store.new_entry("test", "1", "x".to_string()).await.unwrap();

    clock.advance_millis(9);
    assert!(store.get_entry("test", "1").await.unwrap().is_hit());

    clock.advance_millis(1);
    assert!(store.get_entry("test", "1").await.unwrap().is_not_found());
}

#[tokio::test]
async fn debug_hit_counter_counts_each_read() {
    let (store, _clock) = string_store(1024, HOUR, true);
    store.new_entry("test", "1", "hello1".to_string()).await.unwrap();

    let counts: Vec<_> = {
        let mut counts = Vec::new();
        for _ in 0..5 {
            counts.push(store.get_entry("test", "1").await.unwrap().hits());
        }
        counts
    };

    assert_eq!(counts, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
}

#[tokio::test]
async fn misses_do_not_touch_counters_or_stats() {
    let (store, _clock) = string_store(1024, HOUR, true);

    assert!(store.get_entry("test", "never").await.unwrap().is_not_found());

    let stats = store.adapter().stats();
    assert_eq!(stats.entries, 0);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.inserts, 0);
}

#[tokio::test]
async fn size_is_weight_not_entry_count() {
    let (store, _clock) = string_store(1024, HOUR, false);
    store.new_entry("test", "1", "a".repeat(10)).await.unwrap();
    store.new_entry("test", "2", "b".repeat(30)).await.unwrap();

    assert_eq!(store.size().await.unwrap(), 40);
    assert_eq!(store.adapter().stats().entries, 2);

    // Overwriting replaces the old weight
    store.new_entry("test", "2", "c".repeat(5)).await.unwrap();
    assert_eq!(store.size().await.unwrap(), 15);
}

#[tokio::test]
async fn prune_and_stats_reflect_expired_entries() {
    let (store, clock) = string_store(1024, Duration::from_secs(1), false);
    store.new_entry("test", "1", "a".to_string()).await.unwrap();
    store.new_entry("test", "2", "b".to_string()).await.unwrap();

    clock.advance(Duration::from_secs(2));
    assert_eq!(store.adapter().prune(), 2);

    let stats = store.adapter().stats();
    assert_eq!(stats.expirations, 2);
    assert_eq!(stats.weight, 0);
    assert_eq!(stats.fill_ratio(), Some(0.0));
}

#[tokio::test]
async fn colliding_looking_keys_stay_apart() {
    let (store, _clock) = string_store(1024, HOUR, false);
    store.new_entry("a-b", "c", "first".to_string()).await.unwrap();
    store.new_entry("a", "b-c", "second".to_string()).await.unwrap();

    let first = store.get_entry("a-b", "c").await.unwrap().into_value();
    let second = store.get_entry("a", "b-c").await.unwrap().into_value();
    assert_eq!(first.as_deref(), Some("first"));
    assert_eq!(second.as_deref(), Some("second"));
}

#[tokio::test]
async fn fragment_store_weighs_html_and_key() {
    let settings = CacheSettings { max_weight: 64, max_age_ms: Some(60_000), ..Default::default() };
    let store = fragment_store(&settings).unwrap();

    store.new_entry("header", "home", Fragment::new("<h1>Home</h1>")).await.unwrap();

    // "<h1>Home</h1>" is 13 bytes, "header-home" is 11
    assert_eq!(store.size().await.unwrap(), 24);
    let html = store.get_entry("header", "home").await.unwrap().into_value().map(|f| f.html);
    assert_eq!(html.as_deref(), Some("<h1>Home</h1>"));
}

#[tokio::test]
async fn fragment_store_rejects_invalid_settings() {
    let settings = CacheSettings { max_weight: 0, ..Default::default() };
    assert!(fragment_store(&settings).is_err());
}
