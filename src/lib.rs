//! Ed discussion showcase tools.
//!
//! Scrapes matching discussion threads from an Ed course into `posts.json`
//! and builds a static showcase page by embedding that JSON into an HTML
//! template. Two binaries share this library: `scrape` (collection) and
//! `build-site` (page assembly).

pub mod collector;
pub mod config;
pub mod content;
pub mod ed;
pub mod model;
pub mod site;
pub mod tags;
