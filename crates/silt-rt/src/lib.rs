//! Runtime hooks the embedded GUI library needs from its environment.
//!
//! Besides memory and `floor`, the library calls out for two things:
//!
//! - an assertion hook, which must stop the process when an internal
//!   invariant breaks ([`fail`]);
//! - a comparison sort over fixed-stride elements, used by its rectangle
//!   packer ([`sort`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod error;
pub mod fail;
pub mod sort;

pub use error::SortError;
pub use fail::invariant_violated;
pub use sort::{qsort_raw, sort_strided, CompareFn};
