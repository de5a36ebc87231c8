//! Explore-feed client core: paging,
//! list reconciliation, scroll
//! sampling and the backend client.

pub mod app;
pub mod domain;
pub mod infra;
pub mod ports;
