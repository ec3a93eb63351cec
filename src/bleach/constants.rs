//! Tablas fijas que describen dónde guarda cada formato sus macros.

/// Extensiones de paquetes Office Open XML (ZIP).
pub const PACKAGE_EXTENSIONS: &[&str] = &[
    "docx", "docm", "dotx", "dotm", "pptx", "pptm", "potx", "potm", "ppsx", "ppsm", "xlsx",
    "xlsm", "xltx", "xltm",
];

/// Extensiones de archivos compuestos OLE heredados.
pub const COMPOUND_EXTENSIONS: &[&str] = &["doc", "xls", "ppt"];

/// Nombres canónicos de las partes que contienen el proyecto VBA dentro de un paquete.
pub const MACRO_PART_NAMES: [&str; 2] = ["vbaProject.bin", "vbaData.xml"];

/// Almacenamientos de primer nivel que alojan macros en un archivo compuesto.
pub const MACRO_STREAM_NAMES: [&str; 3] = ["VBA", "Macros", "_VBA_PROJECT_CUR"];

/// Tamaño máximo admitido por defecto (200 MiB).
pub const FILESIZE_LIMIT: u64 = 209_715_200;

/// Ubicaciones de macros e hipervínculos para un subtipo de documento.
#[derive(Debug)]
pub struct MacroLocation {
    /// Carpeta raíz del paquete que contiene `vbaProject.bin` y `vbaData.xml`.
    pub package_folder: &'static str,
    /// Carpetas de relaciones (`_rels`) revisadas al buscar hipervínculos.
    pub relationship_folders: &'static [&'static str],
    pub compound_streams: &'static [&'static str],
}

pub static WORD_LOCATION: MacroLocation = MacroLocation {
    package_folder: "word",
    relationship_folders: &["word/_rels"],
    compound_streams: &MACRO_STREAM_NAMES,
};

pub static SLIDE_LOCATION: MacroLocation = MacroLocation {
    package_folder: "ppt",
    relationship_folders: &[
        "ppt/slides/_rels",
        "ppt/slideMasters/_rels",
        "ppt/slideLayouts/_rels",
    ],
    compound_streams: &MACRO_STREAM_NAMES,
};

pub static SHEET_LOCATION: MacroLocation = MacroLocation {
    package_folder: "xl",
    relationship_folders: &["xl/worksheets/_rels", "xl/drawings/_rels"],
    compound_streams: &MACRO_STREAM_NAMES,
};
