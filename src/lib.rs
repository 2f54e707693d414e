//! Priority merge and gap filling of categorical grids.
//!
//! Re-exports the [`covergrid`] crate, the `gridmerge` binary lives in `tools/gridmerge`.

pub use covergrid::*;
