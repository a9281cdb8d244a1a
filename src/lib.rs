//! # yearshelf
//!
//! A year-partitioned image archive server.
//!
//! A user submits a URL pointing to a compressed image archive; an
//! external fetch-and-extract executable places its contents under the
//! archive root, partitioned by year; and the resulting directory
//! structure is browsable over an HTTP JSON API.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────────────────────┐   ┌─────────────┐
//! │  Client  │──▶│       HTTP boundary        │──▶│  Filesystem  │
//! │ (browser)│   │ listings / tree / download │   │ (year dirs) │
//! └──────────┘   └────────────┬──────────────┘   └─────▲───────┘
//!                             │                        │ writes
//!                             ▼                        │
//!                    ┌─────────────────┐      ┌────────┴────────┐
//!                    │ ingest invoker  │─────▶│ fetch-extract   │
//!                    │ (subprocess)    │      │ executable      │
//!                    └─────────────────┘      └─────────────────┘
//! ```
//!
//! The filesystem itself is the source of truth — there is no database
//! and no index. Listings and trees are rebuilt fresh on every request.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`tree`] | Recursive concurrent directory expansion |
//! | [`ingest`] | External fetch-and-extract invocation |
//! | [`listing`] | Flat year/folder listings |
//! | [`server`] | HTTP API |

pub mod config;
pub mod ingest;
pub mod listing;
pub mod models;
pub mod server;
pub mod tree;
