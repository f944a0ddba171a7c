//! Test modules for the executor crate.


use crate::{Executor, OpenOptions, Store};
use tempfile::TempDir;

/// Executor over a fresh temporary root. Keep the `TempDir` alive for the test.
pub(crate) fn create_test_executor() -> (TempDir, Executor) {
    let dir = TempDir::new().unwrap();
    let store = Store::open_with(dir.path(), OpenOptions::new().sync_writes(false)).unwrap();
    (dir, Executor::new(store))
}
