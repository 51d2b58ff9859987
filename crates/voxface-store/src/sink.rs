//! File sink collaborators.
//!
//! The orchestrator never touches the filesystem directly: it opens a writer,
//! writes the encoded bytes, closes it, and on rollback asks the sink to
//! delete the path again.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

/// Destination for committed files.
pub trait FileSink {
    /// Open writer type.
    type Writer: Write;

    /// Opens a writer for `path`, truncating any existing file.
    fn create_writer(&mut self, path: &Path) -> io::Result<Self::Writer>;

    /// Flushes and closes a writer. The file is committed once this returns `Ok`.
    fn close(&mut self, writer: Self::Writer) -> io::Result<()>;

    /// Deletes `path`. Returns `Ok(false)` if there was nothing to delete.
    fn delete_file(&mut self, path: &Path) -> io::Result<bool>;
}

/// [`FileSink`] backed by the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsSink {
    create_dirs: bool,
}

impl FsSink {
    /// Creates a sink that also creates missing parent directories.
    pub fn new() -> Self {
        Self { create_dirs: true }
    }

    /// Creates a sink that fails if the parent directory does not exist.
    pub fn without_create_dirs() -> Self {
        Self { create_dirs: false }
    }
}

impl FileSink for FsSink {
    type Writer = BufWriter<File>;

    fn create_writer(&mut self, path: &Path) -> io::Result<Self::Writer> {
        if self.create_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
        }
        debug!("opening {}", path.display());
        Ok(BufWriter::new(File::create(path)?))
    }

    fn close(&mut self, writer: Self::Writer) -> io::Result<()> {
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }

    fn delete_file(&mut self, path: &Path) -> io::Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// In-memory [`FileSink`]. Files become visible when their writer is closed.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

/// Writer handed out by [`MemorySink`].
#[derive(Debug)]
pub struct MemoryFile {
    path: PathBuf,
    buffer: Vec<u8>,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of a committed file.
    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Committed paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Number of committed files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if nothing is committed.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileSink for MemorySink {
    type Writer = MemoryFile;

    fn create_writer(&mut self, path: &Path) -> io::Result<Self::Writer> {
        Ok(MemoryFile {
            path: path.to_path_buf(),
            buffer: Vec::new(),
        })
    }

    fn close(&mut self, writer: Self::Writer) -> io::Result<()> {
        self.files.insert(writer.path, writer.buffer);
        Ok(())
    }

    fn delete_file(&mut self, path: &Path) -> io::Result<bool> {
        Ok(self.files.remove(path).is_some())
    }
}
