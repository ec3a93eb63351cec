//! Limpieza por lotes de directorios completos.

use serde::Serialize;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use crate::error::{BleachError, Result};

use super::admission::AdmissionPolicy;
use super::dispatch::{SanitizeResult, sanitize};
use super::format::classify;

#[derive(Clone, Debug, Serialize)]
pub enum BleachEvent {
    Started { total: usize },
    Processing { index: usize, total: usize, path: PathBuf },
    Success { result: SanitizeResult },
    Failure { path: PathBuf, error: String },
    Finished { successes: usize, failures: usize },
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct BatchSummary {
    pub successes: usize,
    pub failures: usize,
}

/// Reúne los documentos soportados bajo `root`, ordenados por ruta.
pub fn collect_candidate_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(BleachError::Io(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            format!("{} no es un directorio", root.display()),
        )));
    }

    let mut queue = VecDeque::from([root.to_path_buf()]);
    let mut files = Vec::new();

    while let Some(dir) = queue.pop_front() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();

            if path.is_dir() {
                if recursive {
                    queue.push_back(path);
                }
                continue;
            }

            if classify(&path).is_ok() {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Procesa los archivos uno a uno y notifica el progreso por `sender`.
pub fn run_bleach_with_sender(
    files: Vec<PathBuf>,
    policy: AdmissionPolicy,
    sender: Sender<BleachEvent>,
) -> BatchSummary {
    let total = files.len();
    let _ = sender.send(BleachEvent::Started { total });

    let mut summary = BatchSummary::default();

    for (index, path) in files.into_iter().enumerate() {
        let _ = sender.send(BleachEvent::Processing {
            index: index + 1,
            total,
            path: path.clone(),
        });

        match policy.validate(&path).and_then(|_| sanitize(&path)) {
            Ok(result) => {
                summary.successes += 1;
                let _ = sender.send(BleachEvent::Success { result });
            }
            Err(error) => {
                summary.failures += 1;
                let _ = sender.send(BleachEvent::Failure {
                    path,
                    error: error.to_string(),
                });
            }
        }
    }

    let _ = sender.send(BleachEvent::Finished {
        successes: summary.successes,
        failures: summary.failures,
    });
    summary
}
