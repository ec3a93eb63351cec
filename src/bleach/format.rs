//! Clasificación de documentos a partir de su extensión.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BleachError, Result};

use super::constants::{
    COMPOUND_EXTENSIONS, MacroLocation, PACKAGE_EXTENSIONS, SHEET_LOCATION, SLIDE_LOCATION,
    WORD_LOCATION,
};

/// Contenedor físico del documento; decide qué estrategia de limpieza se aplica.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum ContainerFormat {
    /// Paquete ZIP de Office Open XML: las partes de macro se eliminan.
    Package,
    /// Archivo compuesto OLE: los streams de macro se rellenan con ceros.
    CompoundFile,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Subtype {
    WordLike,
    SlideLike,
    SheetLike,
}

impl Subtype {
    fn from_extension(extension: &str) -> Option<Self> {
        match extension.get(..2)? {
            "do" => Some(Subtype::WordLike),
            "pp" | "po" => Some(Subtype::SlideLike),
            "xl" => Some(Subtype::SheetLike),
            _ => None,
        }
    }

    pub fn macro_location(self) -> &'static MacroLocation {
        match self {
            Subtype::WordLike => &WORD_LOCATION,
            Subtype::SlideLike => &SLIDE_LOCATION,
            Subtype::SheetLike => &SHEET_LOCATION,
        }
    }
}

/// Resultado de clasificar un nombre de archivo.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DocumentKind {
    pub format: ContainerFormat,
    pub subtype: Subtype,
    /// Extensión normalizada en minúsculas.
    pub extension: String,
}

impl DocumentKind {
    /// Las presentaciones OLE guardan el proyecto VBA dentro del stream
    /// `PowerPoint Document`, fuera del alcance del relleno con ceros.
    pub fn supports_macro_removal(&self) -> bool {
        !(self.format == ContainerFormat::CompoundFile && self.subtype == Subtype::SlideLike)
    }
}

/// Clasifica un archivo por la parte de su nombre que sigue al último punto.
pub fn classify(path: &Path) -> Result<DocumentKind> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
        .unwrap_or_default();

    let format = if PACKAGE_EXTENSIONS.contains(&extension.as_str()) {
        ContainerFormat::Package
    } else if COMPOUND_EXTENSIONS.contains(&extension.as_str()) {
        ContainerFormat::CompoundFile
    } else {
        return Err(BleachError::UnsupportedFormat { extension });
    };

    let subtype = Subtype::from_extension(&extension)
        .ok_or_else(|| BleachError::UnsupportedFormat {
            extension: extension.clone(),
        })?;

    Ok(DocumentKind {
        format,
        subtype,
        extension,
    })
}

/// Ruta de un documento junto con su clasificación, válida durante una operación.
#[derive(Clone, Debug)]
pub struct DocumentHandle {
    /// Ruta tal como la indicó quien llama; es la que se clasifica y se reporta.
    pub path: PathBuf,
    /// Archivo real tras resolver enlaces simbólicos. Toda lectura y escritura va aquí.
    pub target: PathBuf,
    pub kind: DocumentKind,
}

impl DocumentHandle {
    pub fn open(path: &Path) -> Result<Self> {
        let kind = classify(path)?;
        let target = fs::canonicalize(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            target,
            kind,
        })
    }

    pub fn format(&self) -> ContainerFormat {
        self.kind.format
    }

    pub fn subtype(&self) -> Subtype {
        self.kind.subtype
    }

    pub(crate) fn ensure_removable(&self) -> Result<()> {
        if self.kind.supports_macro_removal() {
            Ok(())
        } else {
            Err(BleachError::UnsupportedSubtype {
                extension: self.kind.extension.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_every_package_extension() {
        for (name, subtype) in [
            ("a.docx", Subtype::WordLike),
            ("a.DOCM", Subtype::WordLike),
            ("a.dotm", Subtype::WordLike),
            ("a.pptm", Subtype::SlideLike),
            ("a.potx", Subtype::SlideLike),
            ("a.ppsm", Subtype::SlideLike),
            ("a.xlsm", Subtype::SheetLike),
            ("a.xltx", Subtype::SheetLike),
        ] {
            let kind = classify(Path::new(name)).expect("extensión soportada");
            assert_eq!(kind.format, ContainerFormat::Package, "{name}");
            assert_eq!(kind.subtype, subtype, "{name}");
        }
    }

    #[test]
    fn classifies_legacy_extensions() {
        let doc = classify(Path::new("informe.doc")).expect("doc soportado");
        assert_eq!(doc.format, ContainerFormat::CompoundFile);
        assert_eq!(doc.subtype, Subtype::WordLike);

        let xls = classify(Path::new("datos.v2.XLS")).expect("xls soportado");
        assert_eq!(xls.format, ContainerFormat::CompoundFile);
        assert_eq!(xls.subtype, Subtype::SheetLike);
        assert_eq!(xls.extension, "xls");

        let ppt = classify(Path::new("charla.ppt")).expect("ppt reconocido");
        assert_eq!(ppt.subtype, Subtype::SlideLike);
        assert!(!ppt.supports_macro_removal());
    }

    #[test]
    fn rejects_unknown_extensions() {
        for name in ["notas.txt", "sin_extension", "archivo.", "x.docx.bak"] {
            assert!(
                matches!(
                    classify(Path::new(name)),
                    Err(BleachError::UnsupportedFormat { .. })
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn hidden_file_uses_text_after_dot() {
        let kind = classify(Path::new(".xlsm")).expect("extensión soportada");
        assert_eq!(kind.subtype, Subtype::SheetLike);
    }

    #[test]
    fn subtypes_map_to_their_package_folder() {
        assert_eq!(Subtype::WordLike.macro_location().package_folder, "word");
        assert_eq!(Subtype::SlideLike.macro_location().package_folder, "ppt");
        assert_eq!(Subtype::SheetLike.macro_location().package_folder, "xl");
    }
}
