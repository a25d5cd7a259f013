//! Integration tests for Word-Ripple
//!
//! `engine_tests` drive both crawl engines over in-memory page graphs;
//! `crawl_tests` run full crawls against a wiremock server and local files.

mod engine_tests;
