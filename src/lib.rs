//! DocuBleach: detección y eliminación de macros en documentos Office.
//!
//! Soporta dos contenedores: los paquetes ZIP de Office Open XML (`docm`, `xlsm`,
//! `pptm`, ...) y los archivos compuestos OLE heredados (`doc`, `xls`). Las partes de
//! macro de los paquetes se eliminan; los streams de macro de los archivos compuestos
//! se rellenan con ceros conservando su longitud.

pub mod bleach;
pub mod error;

pub use bleach::{
    AdmissionPolicy, BleachEvent, BatchSummary, ContainerFormat, DocumentHandle, DocumentKind,
    HyperlinkRecord, SanitizeResult, Subtype, classify, collect_candidate_files, detect_macros,
    extract_hyperlinks, run_bleach_with_sender, sanitize,
};
pub use error::{BleachError, Result};
