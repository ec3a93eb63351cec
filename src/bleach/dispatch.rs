//! Operaciones públicas: cada formato de contenedor aporta su detección y su limpieza.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::error::{BleachError, Result};

use super::compound::{detect_compound_macros, remove_compound_macros};
use super::format::{ContainerFormat, DocumentHandle, Subtype};
use super::package::{
    HyperlinkRecord, Workspace, detect_package_macros, extract_hyperlinks as scan_relationships,
    sanitize_package,
};

/// Resultado de limpiar un documento.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SanitizeResult {
    pub path: PathBuf,
    pub format: ContainerFormat,
    pub subtype: Subtype,
    pub macros_found: bool,
    /// Partes eliminadas (paquetes) o streams rellenados con ceros (OLE).
    pub removed: Vec<String>,
}

impl ContainerFormat {
    fn detect(self, path: &Path, subtype: Subtype) -> Result<bool> {
        match self {
            ContainerFormat::Package => detect_package_macros(path, subtype),
            ContainerFormat::CompoundFile => detect_compound_macros(path, subtype),
        }
    }

    fn remove(self, path: &Path, subtype: Subtype) -> Result<Vec<String>> {
        match self {
            ContainerFormat::Package => sanitize_package(path, subtype),
            ContainerFormat::CompoundFile => remove_compound_macros(path, subtype),
        }
    }
}

/// Elimina las macros del documento y reporta si había alguna.
///
/// Si `path` es un enlace simbólico se limpia el archivo al que apunta y el enlace se
/// conserva. Ante cualquier error el documento original queda intacto.
#[instrument(skip_all, fields(document = %path.display()))]
pub fn sanitize(path: &Path) -> Result<SanitizeResult> {
    let document = DocumentHandle::open(path)?;
    document.ensure_removable()?;
    debug!(format = ?document.format(), subtype = ?document.subtype(), "documento clasificado");

    let removed = document.format().remove(&document.target, document.subtype())?;

    Ok(SanitizeResult {
        path: document.path,
        format: document.kind.format,
        subtype: document.kind.subtype,
        macros_found: !removed.is_empty(),
        removed,
    })
}

/// Indica si el documento contiene macros con contenido. No modifica nada.
#[instrument(skip_all, fields(document = %path.display()))]
pub fn detect_macros(path: &Path) -> Result<bool> {
    let document = DocumentHandle::open(path)?;
    document.ensure_removable()?;
    document.format().detect(&document.target, document.subtype())
}

/// Lista los hipervínculos externos de un paquete Office.
#[instrument(skip_all, fields(document = %path.display()))]
pub fn extract_hyperlinks(path: &Path) -> Result<Vec<HyperlinkRecord>> {
    let document = DocumentHandle::open(path)?;
    if document.format() != ContainerFormat::Package {
        return Err(BleachError::UnsupportedFormat {
            extension: document.kind.extension,
        });
    }

    let workspace = Workspace::extract(&document.target)?;
    let records = scan_relationships(&workspace, document.subtype())?;
    workspace.close()?;
    Ok(records)
}
