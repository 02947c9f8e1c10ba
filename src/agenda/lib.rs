//! # Agenda Architecture
//!
//! Agenda keeps a school's weekly lesson plan: teachers teach subjects to
//! class groups on weekdays, and every day carries two free-text fields
//! (lesson content and homework). On demand the tree is flattened into one
//! document per class and shift, sorted, rendered through a template and
//! bundled into a single archive.
//!
//! Like any UI-agnostic library, the CLI is just one client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, print.rs)                     │
//! │  - Parses arguments, prints messages, owns exit codes       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves settings into renderer / packager / out dir     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Load agenda, mutate, save, return CmdResult              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - AgendaStore trait: snapshot + key-value texts            │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Below the command layer sits a pure core with no I/O at all:
//! [`model`] and [`ids`] for the tree, [`shift`] and [`collate`] for label
//! handling, [`grouper`] and [`sorter`] for document assembly.
//!
//! ## Generation Pipeline
//!
//! ```text
//! Agenda + values ─▶ grouper::build_documents ─▶ sorter::sort_keys
//!                 ─▶ render::DocumentRenderer ─▶ archive::Packager
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics go through `tracing`; the binary decides whether
//! and where they are shown (see [`logging`]).
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: one module per operation family
//! - [`store`]: storage abstraction and implementations
//! - [`model`]: `Agenda`, `Teacher`, `Subject`, `Group`, `Day`, `Weekday`
//! - [`ids`]: the identifier counters
//! - [`shift`]: grade and shift detection from group labels
//! - [`grouper`], [`sorter`]: per-class documents and their order
//! - [`dates`], [`render`], [`archive`]: formatting, templates, packaging
//! - [`config`]: user settings
//! - [`error`]: error types

pub mod api;
pub mod archive;
pub mod collate;
pub mod commands;
pub mod config;
pub mod dates;
pub mod error;
pub mod grouper;
pub mod ids;
pub mod logging;
pub mod model;
pub mod render;
pub mod shift;
pub mod sorter;
pub mod store;
