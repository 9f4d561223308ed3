use crate::error::{Result, SiteMapError};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where the rendered site map goes. Opened before crawling so a bad
/// output path fails fast.
#[derive(Debug)]
pub enum OutputSink {
    Stdout,
    File { path: PathBuf, file: File },
}

impl OutputSink {
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(OutputSink::Stdout),
            Some(path) => {
                let file = File::create(path).map_err(|source| SiteMapError::OutputOpen {
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok(OutputSink::File {
                    path: path.to_path_buf(),
                    file,
                })
            }
        }
    }

    pub fn write(&mut self, content: &str) -> Result<()> {
        match self {
            OutputSink::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(content.as_bytes())
                    .and_then(|_| stdout.flush())
                    .map_err(SiteMapError::OutputWrite)
            }
            OutputSink::File { file, .. } => file
                .write_all(content.as_bytes())
                .and_then(|_| file.flush())
                .map_err(SiteMapError::OutputWrite),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            OutputSink::Stdout => "standard output".to_string(),
            OutputSink::File { path, .. } => path.display().to_string(),
        }
    }
}
