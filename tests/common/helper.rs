//! Fake `boiler-writter` scripts
//!
//! Each script is a small `/bin/sh` program written into a scratch directory.
//! It can record its arguments, drop a payload at `$1` and exit with a chosen
//! code, which is all the real helper does from our side of the process
//! boundary.

use cs_sharecode::BoilerFetcher;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Scratch space holding a fake helper and the payload directory it writes to
pub struct FakeHelper {
    pub dir: TempDir,
    pub script: PathBuf,
    pub payload_dir: PathBuf,
    pub args_file: PathBuf,
}

impl FakeHelper {
    /// Exit with `code` without writing a payload
    pub fn exiting(code: i32) -> Self {
        Self::with_body(&format!("exit {code}"))
    }

    /// Write `payload` to `$1`, then exit with `code`
    pub fn writing(payload: &[u8], code: i32) -> Self {
        let helper = Self::with_body("");
        let fixture = helper.dir.path().join("fixture.bin");
        std::fs::write(&fixture, payload).unwrap();
        helper.rewrite(&format!("cat '{}' > \"$1\"\nexit {code}", fixture.display()));
        helper
    }

    /// Run an arbitrary script body; `$1..$4` are the helper arguments
    pub fn with_body(body: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let payload_dir = dir.path().join("payloads");
        std::fs::create_dir(&payload_dir).unwrap();

        let helper = Self {
            script: dir.path().join("boiler-writter"),
            args_file: dir.path().join("args.txt"),
            payload_dir,
            dir,
        };
        helper.rewrite(body);
        helper
    }

    fn rewrite(&self, body: &str) {
        let script = format!(
            "#!/bin/sh\necho \"$@\" > '{}'\n{body}\n",
            self.args_file.display()
        );
        std::fs::write(&self.script, script).unwrap();
        std::fs::set_permissions(&self.script, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    pub fn fetcher(&self) -> BoilerFetcher {
        BoilerFetcher::new(self.script.clone()).with_temp_dir(self.payload_dir.clone())
    }

    pub fn fetcher_with_timeout(&self, timeout: Duration) -> BoilerFetcher {
        self.fetcher().with_timeout(Some(timeout))
    }

    /// Arguments the helper was last invoked with, space separated
    pub fn recorded_args(&self) -> String {
        std::fs::read_to_string(&self.args_file)
            .unwrap()
            .trim()
            .to_string()
    }

    /// Files still present in the payload directory
    pub fn leftover_payloads(&self) -> Vec<PathBuf> {
        list_dir(&self.payload_dir)
    }
}

fn list_dir(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}
