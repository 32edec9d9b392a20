//! Service layer for talking to the menu provider.

mod fetcher;

pub use fetcher::MenuFetcher;
