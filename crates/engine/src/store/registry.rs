//! Process-wide registry of open sandbox roots
//!
//! Opening the same canonical root twice returns handles over the same
//! [`StoreInner`](super::StoreInner), so both see one `PathLockTable`.
//! Separate tables for one root would let two mutations of the same file
//! interleave.
//!
//! Weak references let a root be reopened with fresh settings once every
//! handle is gone.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Weak;

use super::StoreInner;

/// Global registry of open stores (canonical root -> weak reference)
pub static OPEN_STORES: Lazy<Mutex<HashMap<PathBuf, Weak<StoreInner>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));
