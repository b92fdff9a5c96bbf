//! `indigen_core` is the engine behind the `indigen` scaffolding command. It
//! registers a new indicator module across several hand-maintained source
//! files by inserting boilerplate at the correct alphabetically-sorted
//! position, without disturbing any other line.
//!
//! ## Processing Pipeline
//!
//! ```text
//! indicator code (e.g. R038)
//!   → IndicatorCode (validates shape, derives case/letter/number variants)
//!   → registration queues (per-file ordered PatchInstruction lists)
//!   → window scan (finds the sorted insertion point inside each window)
//!   → patch pass (single forward sweep, whole-buffer rewrite)
//! ```
//!
//! ## Key Types
//!
//! - [`IndicatorCode`] — A validated code: one uppercase letter and three
//!   digits. Lexicographic order equals registration order.
//! - [`PatchInstruction`] — One declarative edit: window boundary patterns,
//!   insertion key, and rendered content.
//! - [`ScaffoldPlan`] — Every file an `add` run will create or patch,
//!   computed fully in memory before anything is written.
//! - [`IndigenConfig`] — Configuration loaded from `indigen.toml`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use indigen_core::IndicatorCode;
//! use indigen_core::IndigenConfig;
//! use indigen_core::plan_scaffold;
//! use indigen_core::write_plan;
//!
//! let root = Path::new(".");
//! let code = IndicatorCode::parse("R038").unwrap();
//! let config = IndigenConfig::load(root).unwrap().unwrap_or_default();
//! let plan = plan_scaffold(root, &code, &config).unwrap();
//! write_plan(&plan).unwrap();
//! ```

pub use code::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use patch::*;
pub use scaffold::*;

mod code;
pub mod config;
mod error;
mod export;
mod patch;
mod scaffold;
