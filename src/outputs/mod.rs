//! The local data store.
//!
//! - [`tokens`]: token-configuration documents read at the start of a run
//! - [`json`]: ranking results written at the end of one
//!
//! ```text
//! data_dir/
//! ├── ignore-tokens.json
//! ├── multi-word-tokens.json
//! ├── synonym-tokens.json
//! ├── headlines.json
//! └── 2025-05-06/
//!     └── morning.json
//! ```

pub mod json;
pub mod tokens;
