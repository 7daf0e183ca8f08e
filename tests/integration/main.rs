//! Integration tests for Sumi-Probe
//!
//! These tests use wiremock to stand in for scraped sites and enrichment
//! providers, and exercise probing, report assembly and the HTTP API
//! end-to-end.

mod liveness_tests;
mod report_tests;
