use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::bleach::constants::MACRO_PART_NAMES;
use crate::bleach::format::Subtype;
use crate::bleach::utils::{discard_temp, generate_temp_filename, replace_after_verification};
use crate::error::Result;

use super::{Workspace, detect_package_macros};

/// Borra del workspace las partes de macro del subtipo y devuelve sus nombres.
///
/// Un paquete sin ninguna de las dos partes simplemente no tiene macros.
pub fn remove_macro_parts(workspace: &Workspace, subtype: Subtype) -> Result<Vec<String>> {
    let folder = subtype.macro_location().package_folder;
    let mut removed = Vec::new();

    for part_name in MACRO_PART_NAMES {
        let part = format!("{}/{}", folder, part_name);
        let on_disk = workspace.part_path(&part);
        if on_disk.is_file() {
            fs::remove_file(&on_disk)?;
            debug!(%part, "parte de macro eliminada");
            removed.push(part);
        }
    }

    Ok(removed)
}

/// Extrae, elimina las macros y reempaqueta un documento en una sola unidad lógica.
///
/// El documento original solo se reemplaza cuando el paquete nuevo supera la
/// verificación; si no había macros no se reescribe.
pub fn sanitize_package(path: &Path, subtype: Subtype) -> Result<Vec<String>> {
    sanitize_package_via(path, subtype, &generate_temp_filename(path))
}

/// Igual que [`sanitize_package`], reempaquetando en `temp_path`.
pub(crate) fn sanitize_package_via(
    path: &Path,
    subtype: Subtype,
    temp_path: &Path,
) -> Result<Vec<String>> {
    let workspace = Workspace::extract(path)?;
    let removed = remove_macro_parts(&workspace, subtype)?;

    if removed.is_empty() {
        workspace.close()?;
        info!(document = %path.display(), "no se encontraron macros en el paquete");
        return Ok(removed);
    }

    if let Err(error) = workspace.repack(temp_path) {
        discard_temp(temp_path);
        return Err(error);
    }

    replace_after_verification(path, temp_path, |candidate| {
        detect_package_macros(candidate, subtype)
    })?;

    info!(document = %path.display(), parts = ?removed, "macros eliminadas del paquete");
    Ok(removed)
}
