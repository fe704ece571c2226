//! Append-only line writer with size-based rotation.
//!
//! When the file grows past the policy's limit it is shifted to `<file>.1`,
//! `<file>.1` to `<file>.2` and so on; the oldest backup beyond the retention
//! count is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// When to rotate and how many rotated files to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub backups: usize,
}

impl Default for RotationPolicy {
    /// 10 MiB, 3 backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            backups: 3,
        }
    }
}

#[derive(Debug)]
pub struct RotatingWriter {
    path: PathBuf,
    policy: RotationPolicy,
    /// Opened on first write, dropped on rotation.
    file: Mutex<Option<File>>,
}

impl RotatingWriter {
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` and a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from rotating, opening or writing.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace writer lock poisoned: {e}")))?;

        let size = fs::metadata(&self.path).map_or(0, |metadata| metadata.len());
        if size > self.policy.max_bytes {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(handle) = file.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file is not open"));
        };
        writeln!(handle, "{line}")?;
        handle.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        if self.policy.backups == 0 {
            return remove_if_present(&self.path);
        }

        remove_if_present(&self.backup(self.policy.backups))?;
        for index in (1..self.policy.backups).rev() {
            let from = self.backup(index);
            if from.exists() {
                fs::rename(&from, self.backup(index + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, self.backup(1))?;
        }
        Ok(())
    }

    /// `<file>.<index>`, e.g. `rentaldesk-otlp.json.2`.
    fn backup(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_writer(dir: &Path) -> RotatingWriter {
        RotatingWriter::new(
            dir.join("rentaldesk-otlp.json"),
            RotationPolicy {
                max_bytes: 16,
                backups: 2,
            },
        )
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = small_writer(dir.path());
        writer.write_line("a").unwrap();
        writer.write_line("b").unwrap();

        let contents = fs::read_to_string(dir.path().join("rentaldesk-otlp.json")).unwrap();
        assert_eq!(contents, "a\nb\n");
    }

    #[test]
    fn rotates_and_keeps_limited_backups() {
        let dir = tempfile::tempdir().unwrap();
        let writer = small_writer(dir.path());
        let line = "x".repeat(20);

        // Every write after the first finds the file over the limit.
        for _ in 0..5 {
            writer.write_line(&line).unwrap();
        }

        let current = dir.path().join("rentaldesk-otlp.json");
        assert!(current.exists());
        assert!(dir.path().join("rentaldesk-otlp.json.1").exists());
        assert!(dir.path().join("rentaldesk-otlp.json.2").exists());
        assert!(!dir.path().join("rentaldesk-otlp.json.3").exists());
        assert_eq!(fs::read_to_string(current).unwrap().lines().count(), 1);
    }
}
