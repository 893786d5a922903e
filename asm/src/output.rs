use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Destination file that only survives if `commit` is reached.
/// Dropping it uncommitted closes and deletes the partial file.
pub struct Output {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    committed: bool,
}

impl Output {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|err| Error::from_io(path, err))?;
        Ok(Output {
            path: path.to_path_buf(),
            writer: Some(BufWriter::new(file)),
            committed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush everything and keep the file.
    pub fn commit(mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|err| Error::from_io(&self.path, err))?;
        }
        self.committed = true;
        Ok(())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.writer.as_mut() {
            Some(writer) => writer.write(buf),
            None => Err(io::Error::new(io::ErrorKind::Other, "output already closed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for Output {
    fn drop(&mut self) {
        // Close before removing
        drop(self.writer.take());
        if !self.committed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
