//! `revdiff-io` — XLSX boundary for the diff engine.
//!
//! Byte streams (or paths) in, `Document` out, and back. All decode/encode
//! failures surface as stage-tagged `DiffError`s; nothing here retries or
//! emits partial output.

pub mod xlsx;

pub use xlsx::{decode_bytes, decode_path, encode_bytes, encode_path};
