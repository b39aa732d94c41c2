//! fakeye: estimates the truthfulness of a natural-language claim from
//! retrieved web evidence. The aggregation core (`classify`, `signal`,
//! `aggregate`, `summary`, `labels`) is pure and synchronous; retrieval
//! collaborators (`search`, `scrape`, `rank`, `stance`) sit behind
//! traits and are wired together by `pipeline` and `server`.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod labels;
pub mod pipeline;
pub mod rank;
pub mod scrape;
pub mod search;
pub mod server;
pub mod signal;
pub mod stance;
pub mod summary;
pub mod text;
pub mod types;

#[cfg(test)]
mod tests;
