//! Test helpers for writing request files into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::json;
use tempfile::TempDir;

/// Temporary directory addressed through a UTF-8 path.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

/// The five-stop reference request; its optimal tour costs 199.
pub(super) fn five_stop_request() -> serde_json::Value {
    json!({
        "costs": [
            [null, 40, 8, 80, 48],
            [24, null, 27, 68, 66],
            [9, 37, null, 82, 49],
            [64, 76, 62, null, 48],
            [43, 64, 41, 42, null]
        ]
    })
}

pub(super) fn write_request(path: &Utf8Path, request: &serde_json::Value) {
    let payload = serde_json::to_string_pretty(request).expect("serialize request");
    write_utf8(path, payload.as_bytes());
}
