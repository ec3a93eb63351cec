//! Errores que puede devolver el motor de limpieza de macros.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

pub type Result<T> = std::result::Result<T, BleachError>;

#[derive(Debug, Error)]
pub enum BleachError {
    #[error("Formato .{extension} no soportado para eliminación de macros")]
    UnsupportedFormat { extension: String },

    /// El formato se reconoce, pero no hay una estrategia de limpieza fiable para él.
    #[error("Los documentos .{extension} se reconocen, pero la eliminación de macros no está implementada")]
    UnsupportedSubtype { extension: String },

    #[error("No es un documento Office válido: {0}")]
    ArchiveCorrupt(#[source] ZipError),

    #[error("La parte `{part}` contiene XML inválido: {source}")]
    MalformedPart {
        part: String,
        #[source]
        source: xmltree::ParseError,
    },

    #[error("No es un contenedor OLE válido: {0}")]
    ContainerCorrupt(#[source] io::Error),

    #[error("El archivo pesa {size} bytes y supera el límite de {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("La verificación indicó que las macros de `{}` no se eliminaron correctamente", path.display())]
    VerificationFailed { path: PathBuf },

    #[error("Error de entrada/salida: {0}")]
    Io(#[from] io::Error),
}

impl From<ZipError> for BleachError {
    fn from(error: ZipError) -> Self {
        match error {
            ZipError::Io(io_error) => BleachError::Io(io_error),
            other => BleachError::ArchiveCorrupt(other),
        }
    }
}

impl BleachError {
    /// Clasifica un fallo al abrir un contenedor OLE: los datos inválidos indican corrupción.
    pub(crate) fn from_container(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                BleachError::ContainerCorrupt(error)
            }
            _ => BleachError::Io(error),
        }
    }
}
