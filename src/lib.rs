//! # graphrag-api
//!
//! An HTTP service that manages GraphRAG projects: it creates an isolated
//! workspace per project, accepts text and file input, runs the toolkit's
//! indexing pipeline and answers local/global queries against the result.
//!
//! ## Architecture
//!
//! ```text
//!   HTTP (axum)                 Workspace                     GraphRAG toolkit
//!  ┌─────────────┐   ┌──────────────────────────────┐   ┌──────────────────┐
//!  │ create      │──▶│ <root>/<uuid>/               │   │ graphrag init    │
//!  │ upload_txt  │   │   input/  settings.yaml .env │──▶│ graphrag index   │
//!  │ index/query │   │   output/ (once indexed)     │   │ graphrag query   │
//!  │ delete/list │   └──────────────────────────────┘   └──────────────────┘
//!  └─────────────┘        spawn_blocking for toolkit calls
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration and provider fallbacks
//! - [`models`] - Request/response types and the provider/method enums
//! - [`error`] - Error taxonomy and its JSON rendering
//! - [`engine`] - `GraphEngine` trait and the `graphrag` CLI implementation
//! - [`workspace`] - Project records, creation rollback, settings editing, and the manager itself
//! - [`api`] - Axum handlers and the router
//! - [`state`] - Shared application state

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod state;
pub mod workspace;
