pub mod context;
pub mod fetcher;
pub mod reconciler;
pub mod session;
