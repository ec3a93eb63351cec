//! Utilidades compartidas para rutas temporales y reemplazo del documento original.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

use crate::error::{BleachError, Result};

/// Ruta oculta junto a `path` donde se escribe el documento limpio antes de reemplazarlo.
///
/// El sufijo en nanosegundos evita colisiones entre operaciones consecutivas.
pub fn generate_temp_filename(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let extension = path.extension().unwrap_or_default().to_string_lossy();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());

    parent.join(format!(".{stem}_temp_{nanos}.{extension}"))
}

/// Sustituye `original` por `temp_path` solo si el oráculo confirma que ya no hay macros.
///
/// En cualquier fallo el temporal se borra y el original queda intacto.
pub(crate) fn replace_after_verification<F>(
    original: &Path,
    temp_path: &Path,
    still_has_macros: F,
) -> Result<()>
where
    F: FnOnce(&Path) -> Result<bool>,
{
    let verdict = still_has_macros(temp_path);
    match verdict {
        Ok(false) => {}
        Ok(true) => {
            discard_temp(temp_path);
            return Err(BleachError::VerificationFailed {
                path: original.to_path_buf(),
            });
        }
        Err(error) => {
            discard_temp(temp_path);
            return Err(error);
        }
    }

    // El temporal hereda los permisos del original antes de ocupar su lugar.
    fs::metadata(original)
        .and_then(|metadata| fs::set_permissions(temp_path, metadata.permissions()))
        .and_then(|_| fs::rename(temp_path, original))
        .map_err(|error| {
            discard_temp(temp_path);
            BleachError::Io(error)
        })
}

pub(crate) fn discard_temp(temp_path: &Path) {
    if let Err(error) = fs::remove_file(temp_path)
        && error.kind() != std::io::ErrorKind::NotFound
    {
        warn!(path = %temp_path.display(), %error, "no se pudo borrar el archivo temporal");
    }
}
