/**
 * Config Module
 *
 * The run configuration: which models to fetch and where to put them.
 * Built once at startup and passed by reference into the fetcher.
 */
mod fetcher_config;

pub use fetcher_config::*;
