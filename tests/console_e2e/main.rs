//! Console E2E test suite.
//!
//! Boots an in-process mock backend and drives the real client over
//! HTTP, covering scope selection, execution, report/export outcomes,
//! and metrics degradation.
//!
//! Run with: cargo test --test console_e2e

mod mock_backend;
mod test_helpers;

mod test_metrics;
