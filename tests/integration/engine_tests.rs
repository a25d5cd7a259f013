//! Both crawl engines over in-memory page graphs

use crate::support::{options, urls, Engine, GraphParser};
use std::sync::Arc;
use std::time::Duration;
use word_ripple::clock::{FakeClock, SystemClock};
use word_ripple::crawler::available_parallelism;
use word_ripple::filter::PatternSet;
use word_ripple::output::write_result_to;
use word_ripple::WebCrawler;

/// a -> b -> c -> d
fn chain() -> GraphParser {
    GraphParser::new()
        .page("http://a/", "alpha", &["http://b/"])
        .page("http://b/", "beta", &["http://c/"])
        .page("http://c/", "gamma", &["http://d/"])
        .page("http://d/", "delta", &[])
}

/// A small web with cycles, shared children and repeated words
fn web() -> GraphParser {
    GraphParser::new()
        .page(
            "http://site/",
            "the quick brown fox the",
            &["http://site/a", "http://site/b", "http://site/a"],
        )
        .page(
            "http://site/a",
            "the lazy dog jumps",
            &["http://site/", "http://site/c"],
        )
        .page(
            "http://site/b",
            "quick quick fox",
            &["http://site/c", "http://other/"],
        )
        .page("http://site/c", "the end", &["http://site/b"])
        .page("http://other/", "brown fox elsewhere", &["http://site/"])
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_depth_bounds_visits() {
    for engine in Engine::ALL {
        for (max_depth, expected) in [(0, 0), (1, 1), (2, 2), (10, 4)] {
            let parser = Arc::new(chain());
            let crawler = engine.build(
                options(max_depth, 10),
                Arc::clone(&parser),
                Arc::new(SystemClock),
            );

            let result = crawler.crawl(&urls(&["http://a/"])).await;

            assert_eq!(
                result.urls_visited(),
                expected,
                "{:?} with max depth {}",
                engine,
                max_depth
            );
            assert_eq!(parser.calls().len(), expected);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_each_url_parsed_once() {
    for engine in Engine::ALL {
        let parser = Arc::new(web());
        let crawler = engine.build(options(6, 20), Arc::clone(&parser), Arc::new(SystemClock));

        let result = crawler
            .crawl(&urls(&["http://site/", "http://site/", "http://other/"]))
            .await;

        assert_eq!(result.urls_visited(), 5, "{:?}", engine);
        for url in ["http://site/", "http://site/a", "http://site/b", "http://site/c", "http://other/"] {
            assert_eq!(parser.call_count(url), 1, "{:?} parsed {} twice", engine, url);
        }
    }
}

/// s -> [a, b], a -> [b], b -> [c], with a slow to fetch
///
/// With depth 3, `c` is only in range over the short path s -> b -> c, while
/// the long path s -> a -> b reaches `b` with no hops left for `c`.
fn shortcut() -> GraphParser {
    GraphParser::new()
        .page("http://s/", "seed", &["http://a/", "http://b/"])
        .page("http://a/", "alpha", &["http://b/"])
        .page("http://b/", "beta", &["http://c/"])
        .page("http://c/", "gamma", &[])
        .slow("http://a/", Duration::from_millis(200))
}

/// s -> [a, d], a -> [a2], a2 -> [b], d -> [b], b -> [c]
///
/// `b` is first claimed over the long path and is still being fetched when
/// the short path through `d` reaches it with more depth left.
fn shortcut_during_fetch() -> GraphParser {
    GraphParser::new()
        .page("http://s/", "seed", &["http://a/", "http://d/"])
        .page("http://a/", "alpha", &["http://a2/"])
        .page("http://a2/", "alpha two", &["http://b/"])
        .page("http://d/", "delta", &["http://b/"])
        .page("http://b/", "beta", &["http://c/"])
        .page("http://c/", "gamma", &[])
        .slow("http://d/", Duration::from_millis(100))
        .slow("http://b/", Duration::from_millis(300))
}

fn parallel_engines() -> Vec<Engine> {
    let mut engines = vec![Engine::Parallel(1), Engine::Parallel(2)];
    let available = available_parallelism();
    if available > 2 {
        engines.push(Engine::Parallel(available));
    }
    engines
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_engines_agree() {
    let cases: [(fn() -> GraphParser, &str, u32); 4] = [
        (web, "http://site/", 6),
        (web, "http://site/", 2),
        (shortcut, "http://s/", 3),
        (shortcut_during_fetch, "http://s/", 4),
    ];

    for (graph, seed, max_depth) in cases {
        let seeds = urls(&[seed]);
        // Larger than the number of distinct words, so nothing is cut off
        let opts = || options(max_depth, 100);

        let expected = Engine::Sequential
            .build(opts(), Arc::new(graph()), Arc::new(SystemClock))
            .crawl(&seeds)
            .await;

        for engine in parallel_engines() {
            let parser = Arc::new(graph());
            let result = engine
                .build(opts(), Arc::clone(&parser), Arc::new(SystemClock))
                .crawl(&seeds)
                .await;

            assert_eq!(
                result, expected,
                "{:?} from {} with max depth {}",
                engine, seed, max_depth
            );
            assert_eq!(result.urls_visited(), parser.calls().len());
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_web_totals() {
    let result = Engine::Sequential
        .build(options(6, 100), Arc::new(web()), Arc::new(SystemClock))
        .crawl(&urls(&["http://site/"]))
        .await;

    assert_eq!(result.urls_visited(), 5);
    assert_eq!(
        result.word_counts(),
        &[
            ("the".to_string(), 4),
            ("fox".to_string(), 3),
            ("quick".to_string(), 3),
            ("brown".to_string(), 2),
            ("dog".to_string(), 1),
            ("elsewhere".to_string(), 1),
            ("end".to_string(), 1),
            ("jumps".to_string(), 1),
            ("lazy".to_string(), 1),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shorter_path_reaches_deeper_pages() {
    let cases: [(fn() -> GraphParser, u32); 2] = [(shortcut, 3), (shortcut_during_fetch, 4)];

    for (graph, max_depth) in cases {
        for engine in Engine::ALL {
            let parser = Arc::new(graph());
            let crawler = engine.build(
                options(max_depth, 100),
                Arc::clone(&parser),
                Arc::new(SystemClock),
            );

            let result = crawler.crawl(&urls(&["http://s/"])).await;

            assert_eq!(result.count_of("gamma"), Some(1), "{:?}", engine);
            for url in parser.calls() {
                assert_eq!(parser.call_count(&url), 1, "{:?} refetched {}", engine, url);
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_depth_bound_holds_on_shortcut_graph() {
    for engine in Engine::ALL {
        let parser = Arc::new(shortcut());
        let crawler = engine.build(options(2, 100), Arc::clone(&parser), Arc::new(SystemClock));

        let result = crawler.crawl(&urls(&["http://s/"])).await;

        let mut calls = parser.calls();
        calls.sort();
        assert_eq!(calls, urls(&["http://a/", "http://b/", "http://s/"]), "{:?}", engine);
        assert_eq!(result.urls_visited(), 3);
        assert_eq!(result.count_of("gamma"), None);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_ignored_url_not_visited() {
    for engine in Engine::ALL {
        let parser = Arc::new(GraphParser::new().page("http://a/x", "secret", &[]));
        let mut opts = options(3, 10);
        opts.ignored_urls = PatternSet::new(["http://a/.*"]).unwrap();

        let crawler = engine.build(opts, Arc::clone(&parser), Arc::new(SystemClock));
        let result = crawler.crawl(&urls(&["http://a/x"])).await;

        assert_eq!(result.urls_visited(), 0);
        assert!(result.word_counts().is_empty());
        assert!(parser.calls().is_empty());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_ignored_url_prunes_subtree() {
    for engine in Engine::ALL {
        let parser = Arc::new(chain());
        let mut opts = options(10, 10);
        opts.ignored_urls = PatternSet::new(["http://b/"]).unwrap();

        let crawler = engine.build(opts, Arc::clone(&parser), Arc::new(SystemClock));
        let result = crawler.crawl(&urls(&["http://a/"])).await;

        assert_eq!(result.urls_visited(), 1);
        assert_eq!(parser.calls(), urls(&["http://a/"]));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_ignored_words_not_counted() {
    for engine in Engine::ALL {
        let parser = Arc::new(GraphParser::new().page(
            "http://a/",
            "The cat and the hat and a bat",
            &[],
        ));
        let mut opts = options(1, 10);
        opts.ignored_words = PatternSet::new(["the", "and", "^.{1,1}$"]).unwrap();

        let crawler = engine.build(opts, parser, Arc::new(SystemClock));
        let result = crawler.crawl(&urls(&["http://a/"])).await;

        let words: Vec<&str> = result.words().collect();
        assert_eq!(words, vec!["bat", "cat", "hat"]);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_words_normalized_before_counting() {
    for engine in Engine::ALL {
        let parser = Arc::new(GraphParser::new().page("http://a/", "Hello!! hello ... HeLLo?", &[]));
        let crawler = engine.build(options(1, 10), parser, Arc::new(SystemClock));

        let result = crawler.crawl(&urls(&["http://a/"])).await;

        assert_eq!(result.word_counts(), &[("hello".to_string(), 3)]);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_zero_timeout_visits_nothing() {
    for engine in Engine::ALL {
        let parser = Arc::new(chain());
        let mut opts = options(5, 10);
        opts.timeout = Duration::ZERO;

        let crawler = engine.build(opts, Arc::clone(&parser), Arc::new(FakeClock::new()));
        let result = crawler.crawl(&urls(&["http://a/"])).await;

        let mut out = Vec::new();
        write_result_to(&result, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "wordCounts": {}, "urlsVisited": 0 })
        );
        assert!(parser.calls().is_empty());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_deadline_stops_new_fetches() {
    for engine in Engine::ALL {
        let clock = FakeClock::new();
        let parser = Arc::new(chain().advancing(&clock, Duration::from_secs(1)));
        let mut opts = options(10, 10);
        opts.timeout = Duration::from_millis(2500);

        let crawler = engine.build(opts, Arc::clone(&parser), Arc::new(clock.clone()));
        let result = crawler.crawl(&urls(&["http://a/"])).await;

        // Fetches start at 0s, 1s and 2s; the one due at 3s is past the deadline
        assert_eq!(result.urls_visited(), 3, "{:?}", engine);
        assert_eq!(
            parser.calls(),
            urls(&["http://a/", "http://b/", "http://c/"])
        );
        assert_eq!(result.count_of("delta"), None);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failed_page_still_counts_as_visited() {
    for engine in Engine::ALL {
        // b is missing from the graph, so it parses as an empty page
        let parser = Arc::new(GraphParser::new().page("http://a/", "root", &["http://b/"]));
        let crawler = engine.build(options(3, 10), Arc::clone(&parser), Arc::new(SystemClock));

        let result = crawler.crawl(&urls(&["http://a/"])).await;

        assert_eq!(result.urls_visited(), 2);
        assert_eq!(result.word_counts(), &[("root".to_string(), 1)]);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_survives_panicking_parse() {
    let parser = Arc::new(
        GraphParser::new()
            .page("http://a/", "root", &["http://bad/", "http://good/"])
            .page("http://good/", "fine", &[])
            .panicking_on("http://bad/"),
    );
    let crawler =
        Engine::Parallel(4).build(options(3, 10), Arc::clone(&parser), Arc::new(SystemClock));

    let result = crawler.crawl(&urls(&["http://a/"])).await;

    assert_eq!(result.urls_visited(), 3);
    assert_eq!(result.count_of("fine"), Some(1));
    assert_eq!(result.count_of("root"), Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_popular_word_count_limits_result() {
    for engine in Engine::ALL {
        let parser = Arc::new(GraphParser::new().page(
            "http://a/",
            "pear apple pear fig apple pear kiwi",
            &[],
        ));
        let crawler = engine.build(options(1, 2), parser, Arc::new(SystemClock));

        let result = crawler.crawl(&urls(&["http://a/"])).await;

        assert_eq!(
            result.word_counts(),
            &[("pear".to_string(), 3), ("apple".to_string(), 2)]
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_crawls_are_independent() {
    for engine in Engine::ALL {
        let parser = Arc::new(chain());
        let crawler = engine.build(options(10, 10), Arc::clone(&parser), Arc::new(SystemClock));

        let first = crawler.crawl(&urls(&["http://a/"])).await;
        let second = crawler.crawl(&urls(&["http://a/"])).await;

        assert_eq!(first, second);
        assert_eq!(parser.call_count("http://a/"), 2);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_no_start_pages_is_empty_crawl() {
    for engine in Engine::ALL {
        let parser = Arc::new(chain());
        let crawler = engine.build(options(5, 10), Arc::clone(&parser), Arc::new(SystemClock));

        let result = crawler.crawl(&[]).await;

        assert_eq!(result.urls_visited(), 0);
        assert!(result.word_counts().is_empty());
        assert!(parser.calls().is_empty());
    }
}
