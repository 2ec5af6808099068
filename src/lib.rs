//! Gridfall (workspace facade crate).
//!
//! Keeps the `gridfall::{core,input,store,term,types}` public API stable
//! while the implementation lives in dedicated crates under `crates/`.

pub use gridfall_core as core;
pub use gridfall_input as input;
pub use gridfall_store as store;
pub use gridfall_term as term;
pub use gridfall_types as types;
