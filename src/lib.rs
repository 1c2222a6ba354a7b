//! Form auto-fill core: detect the form controls of a page, infer what each
//! one is for, and fill it with plausible locale-aware random data.
//!
//! The page is reached only through [`page::host::PageHost`]; the crate ships
//! an in-memory implementation ([`page::memory_page::MemoryPage`]) that loads
//! JSON DOM snapshots.

pub mod cli;
pub mod error;
pub mod fill;
pub mod messaging;
pub mod page;
pub mod settings;
pub mod trace;

pub use fill::classifier::classify;
pub use fill::detector::detect_fields;
pub use fill::generator::generate;
pub use fill::locale::resolve;
pub use fill::orchestrator::{fill_page, fill_page_with};
