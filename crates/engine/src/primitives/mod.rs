//! Operations on resolved paths
//!
//! - **DocumentStore**: whole-document reads and read-transform-write mutations
//! - **TreeOps**: copy, delete, create-folder and list
//!
//! Both share one `PathLockTable`; neither resolves logical paths. That is
//! the job of [`Store`](crate::Store), which calls the resolver first.

pub mod document_store;
pub mod tree;

pub use document_store::DocumentStore;
pub use tree::{CopyStats, TreeOps};
