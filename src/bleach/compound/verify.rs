use std::path::Path;

use crate::bleach::format::Subtype;
use crate::error::Result;

use super::streams::{is_zero_filled, macro_streams_in, open_read_only, read_stream};

/// Indica si algún stream de macro conserva bytes distintos de cero.
///
/// Un documento ya limpiado mantiene sus streams de macro, pero rellenos de ceros,
/// así que la presencia por sí sola no cuenta.
pub fn detect_compound_macros(path: &Path, subtype: Subtype) -> Result<bool> {
    let mut compound = open_read_only(path)?;

    for stream in macro_streams_in(&compound, subtype) {
        let contents = read_stream(&mut compound, &stream)?;
        if !is_zero_filled(&contents) {
            return Ok(true);
        }
    }

    Ok(false)
}
