use std::collections::HashSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};
use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::write::{FileOptions, SimpleFileOptions};
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::error::{BleachError, Result};

/// Datos de una entrada del ZIP original necesarios para reempaquetarla igual.
#[derive(Clone, Debug)]
struct ManifestEntry {
    name: String,
    relative: PathBuf,
    is_dir: bool,
    compression: CompressionMethod,
    last_modified: Option<DateTime>,
    unix_mode: Option<u32>,
}

impl ManifestEntry {
    fn options(&self) -> SimpleFileOptions {
        let compression = match self.compression {
            CompressionMethod::Stored => CompressionMethod::Stored,
            _ => CompressionMethod::Deflated,
        };

        let mut options = FileOptions::<'_, ()>::default().compression_method(compression);
        if let Some(mode) = self.unix_mode {
            options = options.unix_permissions(mode);
        }
        if let Some(time) = self.last_modified {
            options = options.last_modified_time(time);
        }
        options
    }
}

/// Árbol extraído de un paquete Office.
///
/// El directorio temporal se elimina al consumir el workspace (`repack`/`close`) o al
/// soltarlo, de modo que nunca sobrevive a la operación que lo creó.
pub struct Workspace {
    dir: TempDir,
    manifest: Vec<ManifestEntry>,
}

impl Workspace {
    /// Extrae el documento completo en un directorio temporal con nombre único.
    pub fn extract(path: &Path) -> Result<Self> {
        let source = File::open(path)?;
        let mut archive = ZipArchive::new(source)?;

        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        let dir = Builder::new()
            .prefix(&format!(".{}_bleach_", stem))
            .tempdir()?;

        let mut manifest = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();
            let relative = file.enclosed_name().ok_or_else(|| {
                BleachError::ArchiveCorrupt(zip::result::ZipError::InvalidArchive(
                    "ruta de entrada insegura".into(),
                ))
            })?;

            let target = dir.path().join(&relative);
            if file.is_dir() {
                fs::create_dir_all(&target)?;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut output = File::create(&target)?;
                io::copy(&mut file, &mut output)?;
            }

            manifest.push(ManifestEntry {
                name,
                relative,
                is_dir: file.is_dir(),
                compression: file.compression(),
                last_modified: file.last_modified(),
                unix_mode: file.unix_mode(),
            });
        }

        debug!(
            document = %path.display(),
            workspace = %dir.path().display(),
            entries = manifest.len(),
            "paquete extraído"
        );

        Ok(Self { dir, manifest })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Ruta en disco de una parte del paquete (`word/vbaProject.bin`).
    pub fn part_path(&self, part_name: &str) -> PathBuf {
        part_name
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root().to_path_buf(), |path, segment| path.join(segment))
    }

    /// Vuelve a empaquetar el árbol en `output` y descarta el workspace.
    ///
    /// Las entradas supervivientes conservan su orden y opciones originales; cualquier
    /// archivo nuevo del árbol se añade al final.
    pub fn repack(self, output: &Path) -> Result<()> {
        let target = File::create(output)?;
        let mut writer = ZipWriter::new(target);
        let mut written = HashSet::new();

        for entry in &self.manifest {
            let on_disk = self.root().join(&entry.relative);
            if entry.is_dir {
                if on_disk.is_dir() {
                    writer.add_directory(entry.name.as_str(), entry.options())?;
                }
                continue;
            }

            if !written.insert(entry.relative.clone()) {
                continue;
            }
            if !on_disk.is_file() {
                debug!(part = %entry.name, "parte ausente del workspace; se omite");
                continue;
            }

            writer.start_file(entry.name.as_str(), entry.options())?;
            let mut source = File::open(&on_disk)?;
            io::copy(&mut source, &mut writer)?;
        }

        let extra_options =
            FileOptions::<'_, ()>::default().compression_method(CompressionMethod::Deflated);
        for entry in WalkDir::new(self.root()).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(self.root()) else {
                continue;
            };
            if written.contains(relative) {
                continue;
            }

            let name = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            debug!(part = %name, "añadiendo archivo nuevo del workspace");
            writer.start_file(name, extra_options)?;
            let mut source = File::open(entry.path())?;
            io::copy(&mut source, &mut writer)?;
        }

        writer.finish()?;
        self.close()
    }

    /// Elimina el directorio temporal informando de cualquier fallo.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|error| {
            warn!(workspace = %path.display(), %error, "no se pudo eliminar el workspace");
            BleachError::Io(error)
        })
    }
}
