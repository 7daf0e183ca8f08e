//! Liveness checking for discovered URLs
//!
//! This module contains the reachability logic, including:
//! - Single-URL probes with a bounded redirect budget
//! - Bounded-concurrency batch checking with independent failures
//! - Partitioning verdicts into broken links

mod checker;
mod probe;

pub use checker::{broken_links, check_all, LivenessChecker};
pub use probe::{build_probe_client, probe_url, LivenessVerdict, ProbeOptions};
