//! API client integration tests
//!
//! Runs a real server on an ephemeral port and drives it through `ApiClient`.
