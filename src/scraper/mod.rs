// Page fetching: the only module that talks to the network.

pub mod fetcher;
#[cfg(test)]
pub mod mock;

pub use fetcher::{Fetcher, HttpFetcher};
