use cfb::CompoundFile;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::bleach::format::Subtype;
use crate::error::{BleachError, Result};

/// Referencia a un stream dentro del contenedor y su longitud asignada.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StreamRef {
    pub path: PathBuf,
    pub len: u64,
}

pub(crate) fn open_read_only(path: &Path) -> Result<CompoundFile<File>> {
    let file = File::open(path)?;
    CompoundFile::open(file).map_err(BleachError::from_container)
}

/// Enumera los streams cuyo almacenamiento de primer nivel es de macros.
///
/// El subtipo es informativo: `doc` y `xls` comparten la misma disposición.
pub fn list_macro_streams(path: &Path, subtype: Subtype) -> Result<Vec<StreamRef>> {
    let compound = open_read_only(path)?;
    let streams = macro_streams_in(&compound, subtype);
    debug!(document = %path.display(), count = streams.len(), "streams de macro encontrados");
    Ok(streams)
}

pub(crate) fn macro_streams_in<F: Read + Seek>(
    compound: &CompoundFile<F>,
    subtype: Subtype,
) -> Vec<StreamRef> {
    let names = subtype.macro_location().compound_streams;
    compound
        .walk()
        .filter(|entry| entry.is_stream() && is_macro_path(entry.path(), names))
        .map(|entry| StreamRef {
            path: entry.path().to_path_buf(),
            len: entry.len(),
        })
        .collect()
}

fn is_macro_path(path: &Path, names: &[&str]) -> bool {
    let top_level = path.components().find_map(|component| match component {
        Component::Normal(name) => name.to_str(),
        _ => None,
    });

    top_level.is_some_and(|name| {
        names
            .iter()
            .any(|macro_name| macro_name.eq_ignore_ascii_case(name))
    })
}

pub(crate) fn read_stream<F: Read + Seek>(
    compound: &mut CompoundFile<F>,
    stream: &StreamRef,
) -> Result<Vec<u8>> {
    let mut reader = compound.open_stream(&stream.path)?;
    let mut contents = Vec::with_capacity(stream.len as usize);
    reader.read_to_end(&mut contents)?;
    Ok(contents)
}

pub(crate) fn is_zero_filled(contents: &[u8]) -> bool {
    contents.iter().all(|byte| *byte == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bleach::constants::MACRO_STREAM_NAMES;

    #[test]
    fn matches_only_top_level_macro_storages() {
        assert!(is_macro_path(Path::new("/VBA/dir"), &MACRO_STREAM_NAMES));
        assert!(is_macro_path(Path::new("/Macros/VBA/ThisDocument"), &MACRO_STREAM_NAMES));
        assert!(is_macro_path(Path::new("/_vba_project_cur/PROJECT"), &MACRO_STREAM_NAMES));
        assert!(!is_macro_path(Path::new("/WordDocument"), &MACRO_STREAM_NAMES));
        assert!(!is_macro_path(Path::new("/ObjectPool/VBA"), &MACRO_STREAM_NAMES));
    }

    #[test]
    fn zero_fill_check() {
        assert!(is_zero_filled(&[]));
        assert!(is_zero_filled(&[0; 16]));
        assert!(!is_zero_filled(&[0, 0, 1]));
    }
}
