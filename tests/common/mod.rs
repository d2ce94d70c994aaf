//! Shared integration test helpers for par-trace.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{write_temp_file, nested_error_dump};
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Source of a small module whose `load()` raises on line 7 while handling
/// the error raised by `parse()` on line 3.
pub const NESTED_MODULE: &str = "\
import json

def parse(text):
    return json.loads(text)

def load(path):
    raise RuntimeError(\"cannot load \" + path)

def main():
    try:
        parse(\"{\")
    except ValueError:
        load(\"settings.json\")
";

/// Writes `contents` to `name` inside a fresh temp dir.
///
/// The `TempDir` must be kept alive for as long as the file is used.
pub fn write_temp_file(name: &str, contents: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write temp file");
    (path, temp_dir)
}

/// A JSON dump of `RuntimeError` raised while handling a `ValueError`.
pub fn nested_error_dump() -> String {
    let frame = |line: usize, function: &str| {
        serde_json::json!({
            "path": "loader.py",
            "line": line,
            "function": function,
            "file_content": NESTED_MODULE,
        })
    };
    serde_json::json!({
        "class_name": "RuntimeError",
        "message": "cannot load settings.json",
        "introspection": "enhanced",
        "chain": [
            {
                "class_name": "RuntimeError",
                "message": "cannot load settings.json",
                "frames": [frame(13, "main"), frame(7, "load")],
                "cause": 1,
            },
            {
                "class_name": "ValueError",
                "message": "Expecting property name",
                "frames": [frame(11, "main"), frame(4, "parse")],
            },
        ],
    })
    .to_string()
}
