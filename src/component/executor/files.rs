//! File operation handlers: Op::Dir, Op::File
//!
//! Writes are skipped when the staged file already holds the same content
//! (compared by SHA256) with the same mode. Group ownership is recorded in
//! the plan but left to the node's file collaborator.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

use super::{ApplyContext, OpStatus};

/// Handle Op::Dir: Create a directory
pub fn handle_dir(ctx: &ApplyContext, path: &Path, recursive: bool) -> Result<OpStatus> {
    let full_path = ctx.staged(path);
    if full_path.is_dir() {
        return Ok(OpStatus::Unchanged);
    }
    let created = if recursive {
        fs::create_dir_all(&full_path)
    } else {
        fs::create_dir(&full_path)
    };
    created.with_context(|| format!("Failed to create {}", full_path.display()))?;
    Ok(OpStatus::Applied)
}

/// Handle Op::File: Write a file with specific permissions
pub fn handle_file(ctx: &ApplyContext, path: &Path, content: &str, mode: u32) -> Result<OpStatus> {
    let full_path = ctx.staged(path);
    if is_current(&full_path, content, mode) {
        return Ok(OpStatus::Unchanged);
    }

    // Tighten a stale file before new content lands in it.
    if let Ok(meta) = fs::metadata(&full_path) {
        if meta.permissions().mode() & 0o7777 != mode {
            set_mode(&full_path, mode)?;
        }
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(&full_path)
        .with_context(|| format!("Failed to open {}", full_path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", full_path.display()))?;

    // The umask may have narrowed the mode at creation.
    set_mode(&full_path, mode)?;
    Ok(OpStatus::Applied)
}

fn set_mode(path: &Path, mode: u32) -> Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("Failed to chmod {}", path.display()))
}

fn sha256(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// True when the file exists with the wanted content and mode.
fn is_current(path: &Path, content: &str, mode: u32) -> bool {
    let Ok(meta) = fs::metadata(path) else {
        return false;
    };
    if meta.permissions().mode() & 0o7777 != mode {
        return false;
    }
    match fs::read(path) {
        Ok(existing) => sha256(&existing) == sha256(content.as_bytes()),
        Err(e) => {
            eprintln!(
                "  [WARN] Failed to read {} for comparison: {} (rewriting)",
                path.display(),
                e
            );
            false
        }
    }
}
