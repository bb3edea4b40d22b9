//! Release orchestration
//!
//! # Invariants
//!
//! 1. **The version record is the only source of truth**
//!    - Manifests are derived copies, never edited independently
//!    - Every release starts by bumping the record
//!
//! 2. **Steps run in order and stop at the first failure**
//!    - bump → stamp → sync
//!    - A failed bump writes nothing; a failed sync leaves earlier manifests synced
//!
//! 3. **`build` only moves forward**
//!    - Each successful stamp adds exactly one

pub mod pipeline;

pub use pipeline::ReleasePipeline;
