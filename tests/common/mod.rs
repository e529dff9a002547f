//! Shared fixtures for fm-sync integration tests

#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

/// Temporary directory tree populated with pipeline files
pub struct TestTree {
    dir: TempDir,
    root: PathBuf,
}

impl TestTree {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let root = std::path::absolute(dir.path()).expect("absolute temp dir");
        Self { dir, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `content` to `relative`, creating parent directories
    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write fixture file");
        path
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.root.join(relative);
        std::fs::create_dir_all(&path).expect("create dir");
        path
    }
}

/// In-memory sink for formatted log output
#[derive(Clone, Default)]
pub struct LogBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().expect("log buffer lock");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Log lines that mention every given fragment
    pub fn lines_matching(&self, fragments: &[&str]) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| fragments.iter().all(|f| line.contains(f)))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Install a DEBUG-level subscriber for the current thread that writes into
/// the returned buffer. Logging stops when the guard is dropped.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

pub const SELF_MONITORING_ALLOY: &str = r#"/* fleet-management
name: self-monitoring
enabled: true
matchers:
  - "collector.os=linux"
*/
prometheus.exporter.self "default" { }

prometheus.scrape "self" {
  targets    = prometheus.exporter.self.default.targets
  forward_to = []
}
"#;
