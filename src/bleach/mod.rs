//! Funciones para detectar y eliminar macros de los documentos Office soportados.

mod admission;
mod batch;
pub mod compound;
pub mod constants;
mod dispatch;
mod format;
pub mod package;
mod utils;

pub use admission::AdmissionPolicy;
pub use batch::{BatchSummary, BleachEvent, collect_candidate_files, run_bleach_with_sender};
pub use dispatch::{SanitizeResult, detect_macros, extract_hyperlinks, sanitize};
pub use format::{ContainerFormat, DocumentHandle, DocumentKind, Subtype, classify};
pub use package::HyperlinkRecord;
