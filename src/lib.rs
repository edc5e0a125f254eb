pub mod app_state;
pub mod auth;
pub mod config;
pub mod entities;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod ingest;
pub mod news;
pub mod passwords;
pub mod repositories;
pub mod router;
pub mod search;
pub mod sentiment;
pub mod telemetry;

#[cfg(test)]
mod test_support;
