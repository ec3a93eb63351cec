//! Neutralización de macros en archivos compuestos OLE (`doc`, `xls`).
//!
//! Los streams de macro nunca se borran ni cambian de tamaño: se sobrescriben con
//! ceros para no alterar la asignación de sectores del contenedor.

mod clean;
mod streams;
mod verify;

pub use clean::remove_compound_macros;
#[cfg(test)]
pub(crate) use clean::remove_compound_macros_via;
pub use streams::{StreamRef, list_macro_streams};
pub use verify::detect_compound_macros;
