use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::bleach::format::Subtype;
use crate::bleach::utils::{discard_temp, generate_temp_filename, replace_after_verification};
use crate::error::{BleachError, Result};

use super::detect_compound_macros;
use super::streams::{StreamRef, is_zero_filled, macro_streams_in, open_read_only, read_stream};

/// Rellena con ceros los streams de macro que aún tienen contenido.
///
/// Se trabaja sobre una copia junto al original; la copia reemplaza al documento solo
/// si la verificación posterior confirma que no quedan macros. Devuelve las rutas de
/// los streams neutralizados.
pub fn remove_compound_macros(path: &Path, subtype: Subtype) -> Result<Vec<String>> {
    remove_compound_macros_via(path, subtype, &generate_temp_filename(path))
}

/// Igual que [`remove_compound_macros`], usando `temp_path` como copia de trabajo.
pub(crate) fn remove_compound_macros_via(
    path: &Path,
    subtype: Subtype,
    temp_path: &Path,
) -> Result<Vec<String>> {
    let dirty = dirty_macro_streams(path, subtype)?;
    if dirty.is_empty() {
        info!(document = %path.display(), "no se encontraron macros en el contenedor");
        return Ok(Vec::new());
    }

    if let Err(error) = fs::copy(path, temp_path)
        .map_err(BleachError::Io)
        .and_then(|_| zero_fill_streams(temp_path, &dirty))
    {
        discard_temp(temp_path);
        return Err(error);
    }

    replace_after_verification(path, temp_path, |candidate| {
        detect_compound_macros(candidate, subtype)
    })?;

    let zeroed: Vec<String> = dirty
        .iter()
        .map(|stream| stream.path.display().to_string())
        .collect();
    info!(document = %path.display(), streams = ?zeroed, "macros neutralizadas en el contenedor");
    Ok(zeroed)
}

fn dirty_macro_streams(path: &Path, subtype: Subtype) -> Result<Vec<StreamRef>> {
    let mut compound = open_read_only(path)?;
    let mut dirty = Vec::new();

    for stream in macro_streams_in(&compound, subtype) {
        let contents = read_stream(&mut compound, &stream)?;
        if is_zero_filled(&contents) {
            debug!(stream = %stream.path.display(), "stream ya neutralizado");
        } else {
            dirty.push(stream);
        }
    }

    Ok(dirty)
}

fn zero_fill_streams(path: &Path, streams: &[StreamRef]) -> Result<()> {
    let mut compound = cfb::open_rw(path).map_err(BleachError::from_container)?;

    for stream in streams {
        let mut writer = compound.open_stream(&stream.path)?;
        let length = writer.len();
        let written = io::copy(&mut io::repeat(0).take(length), &mut writer)?;
        writer.flush()?;

        if writer.len() != length || written != length {
            return Err(BleachError::Io(io::Error::other(format!(
                "el stream {} cambió de tamaño al sobrescribirlo",
                stream.path.display()
            ))));
        }
        debug!(stream = %stream.path.display(), bytes = length, "stream rellenado con ceros");
    }

    compound.flush()?;
    Ok(())
}
