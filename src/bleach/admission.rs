//! Comprobaciones previas antes de entregar un archivo al motor.

use std::fs;
use std::path::Path;

use crate::error::{BleachError, Result};

use super::constants::FILESIZE_LIMIT;
use super::format::{DocumentKind, classify};

/// Límites aplicados a cada archivo antes de procesarlo.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AdmissionPolicy {
    pub max_file_size: u64,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            max_file_size: FILESIZE_LIMIT,
        }
    }
}

impl AdmissionPolicy {
    /// Clasifica el archivo y rechaza los que alcanzan el tamaño máximo.
    pub fn validate(&self, path: &Path) -> Result<DocumentKind> {
        let kind = classify(path)?;
        let size = fs::metadata(path)?.len();
        if size >= self.max_file_size {
            return Err(BleachError::FileTooLarge {
                size,
                limit: self.max_file_size,
            });
        }
        Ok(kind)
    }
}
