//! Transient payload files written by the helper

use rand::Rng;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static PAYLOAD_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Owned path of a helper payload file
///
/// The file is removed when the guard is dropped, so every exit path of an
/// invocation (success, error, timeout, cancellation) cleans up. Removal is
/// best-effort: failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct PayloadFile {
    path: PathBuf,
}

impl PayloadFile {
    /// Reserve a unique payload path inside `dir`
    ///
    /// The name combines wall-clock milliseconds, the process id, a
    /// process-wide counter and a random value. Nothing is created on disk.
    pub fn unique_in(dir: &Path) -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let seq = PAYLOAD_COUNTER.fetch_add(1, Ordering::Relaxed);
        let nonce: u64 = rand::thread_rng().r#gen();

        let name = format!(
            "matches-{millis}-{pid}-{seq}-{nonce:016x}.info",
            pid = std::process::id()
        );
        Self {
            path: dir.join(name),
        }
    }

    /// Path handed to the helper
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PayloadFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = ?self.path, "removed payload file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "failed to remove payload file")
            }
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn paths_are_unique_within_a_process() {
        let dir = TempDir::new().unwrap();
        let paths: HashSet<PathBuf> = (0..1000)
            .map(|_| PayloadFile::unique_in(dir.path()).path().to_path_buf())
            .collect();
        assert_eq!(paths.len(), 1000);
    }

    #[test]
    fn path_lives_in_requested_dir() {
        let dir = TempDir::new().unwrap();
        let payload = PayloadFile::unique_in(dir.path());
        assert_eq!(payload.path().parent(), Some(dir.path()));
        let name = payload.path().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("matches-"));
        assert!(name.ends_with(".info"));
    }

    #[test]
    fn name_starts_with_current_unix_millis() {
        let dir = TempDir::new().unwrap();
        let before = chrono::Utc::now().timestamp_millis();
        let payload = PayloadFile::unique_in(dir.path());
        let after = chrono::Utc::now().timestamp_millis();

        let name = payload.path().file_name().unwrap().to_string_lossy().into_owned();
        let millis: i64 = name.split('-').nth(1).unwrap().parse().unwrap();
        assert!((before..=after).contains(&millis), "{name}");

        let pid: u32 = name.split('-').nth(2).unwrap().parse().unwrap();
        assert_eq!(pid, std::process::id());
    }

    #[test]
    fn drop_removes_existing_file() {
        let dir = TempDir::new().unwrap();
        let payload = PayloadFile::unique_in(dir.path());
        let path = payload.path().to_path_buf();
        std::fs::write(&path, b"payload").unwrap();
        assert!(path.exists());

        drop(payload);
        assert!(!path.exists());
    }

    #[test]
    fn drop_tolerates_missing_file() {
        let dir = TempDir::new().unwrap();
        let payload = PayloadFile::unique_in(dir.path());
        let path = payload.path().to_path_buf();
        drop(payload);
        assert!(!path.exists());
    }
}
