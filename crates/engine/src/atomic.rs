//! Atomic file replacement
//!
//! Documents are never overwritten in place. New content goes to a
//! temporary file in the target's directory and is renamed over the target,
//! which is atomic on POSIX when both live on the same filesystem:
//! 1. Write to temp file
//! 2. Sync temp file (when enabled)
//! 3. Rename temp to final
//!
//! If any step fails, the temp file is removed and the target is untouched.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Suffix of in-flight temporary files
pub const TEMP_SUFFIX: &str = ".jsondocs-tmp";

/// Whether `name` is an in-flight temporary file created by this module
pub fn is_temp_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(TEMP_SUFFIX)
}

/// Temp path next to `target`: `.<name>.<uuid>.jsondocs-tmp`
pub fn temp_path_for(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(
        ".{}.{}{}",
        name,
        Uuid::new_v4().simple(),
        TEMP_SUFFIX
    ))
}

/// Replace `target` with `bytes` atomically
///
/// Readers either see the previous content or the new content, never a
/// prefix of it. A crash leaves at worst a stray temp file.
pub fn write_atomic(target: &Path, bytes: &[u8], sync: bool) -> io::Result<()> {
    let temp_path = temp_path_for(target);

    match write_then_rename(&temp_path, target, bytes, sync) {
        Ok(()) => {
            debug!(
                target: "jsondocs::store",
                path = %target.display(),
                bytes = bytes.len(),
                "Atomic rename completed"
            );
            Ok(())
        }
        Err(e) => {
            warn!(
                target: "jsondocs::store",
                temp_path = %temp_path.display(),
                error = %e,
                "Write failed, cleaning up temp file"
            );
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}

fn write_then_rename(temp_path: &Path, target: &Path, bytes: &[u8], sync: bool) -> io::Result<()> {
    {
        let mut file: File = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp_path)?;
        file.write_all(bytes)?;
        if sync {
            file.sync_all()?;
        }
    }
    fs::rename(temp_path, target)
}
