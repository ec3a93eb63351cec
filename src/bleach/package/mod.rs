//! Limpieza de macros en paquetes Office Open XML (ZIP).

mod clean;
mod hyperlinks;
mod verify;
mod workspace;

pub use clean::{remove_macro_parts, sanitize_package};
#[cfg(test)]
pub(crate) use clean::sanitize_package_via;
pub use hyperlinks::{HyperlinkRecord, extract_hyperlinks};
pub use verify::detect_package_macros;
pub use workspace::Workspace;
