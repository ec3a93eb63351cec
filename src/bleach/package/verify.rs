use std::fs::File;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

use crate::bleach::constants::MACRO_PART_NAMES;
use crate::bleach::format::Subtype;
use crate::error::Result;

/// Comprueba si el paquete conserva alguna de las partes de macro del subtipo.
///
/// Basta con la existencia: la limpieza de paquetes siempre borra estas partes. Los
/// nombres se comparan ya normalizados (`word/./vbaProject.bin` cuenta), igual que
/// al extraer el paquete al workspace.
pub fn detect_package_macros(path: &Path, subtype: Subtype) -> Result<bool> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    let folder = subtype.macro_location().package_folder;
    let macro_parts: Vec<PathBuf> = MACRO_PART_NAMES
        .iter()
        .map(|part_name| Path::new(folder).join(part_name))
        .collect();

    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        if entry.is_dir() {
            continue;
        }
        if let Some(name) = entry.enclosed_name()
            && macro_parts.contains(&name)
        {
            return Ok(true);
        }
    }

    Ok(false)
}
