// Copyright (c) 2025 - Cowboy AI, Inc.
//! Raw request/response capture for protocol debugging
//!
//! The sink is an injected collaborator: pass one to
//! [`WbemClient::with_capture`](crate::client::WbemClient::with_capture) and
//! every round trip writes its raw bytes to a named stream. Sink failures
//! are logged and never fail the operation they were observing.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// A destination for raw protocol captures.
pub trait CaptureSink: Send + Sync {
    /// Open a named capture stream. One round trip writes its request and
    /// response to a single stream.
    fn open(&self, name: &str) -> io::Result<Box<dyn Write + Send>>;

    /// Flush anything the sink buffers. File-backed sinks have nothing to
    /// do here; streams are closed when dropped.
    fn flush(&self) -> io::Result<()>;
}

/// A [`CaptureSink`] that creates one real file per stream under a
/// directory.
#[derive(Debug, Clone)]
pub struct FileCaptureSink {
    dir: PathBuf,
}

impl FileCaptureSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CaptureSink for FileCaptureSink {
    fn open(&self, name: &str) -> io::Result<Box<dyn Write + Send>> {
        let file = File::create(self.dir.join(name))?;
        Ok(Box::new(file))
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_creates_named_files() {
        let dir = std::env::temp_dir().join(format!("wbem-capture-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let sink = FileCaptureSink::new(&dir);

        let mut stream = sink.open("1-0001.log").unwrap();
        stream.write_all(b"POST /cimom").unwrap();
        drop(stream);
        sink.flush().unwrap();

        let written = std::fs::read(dir.join("1-0001.log")).unwrap();
        assert_eq!(written, b"POST /cimom");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
