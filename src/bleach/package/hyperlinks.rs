use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use tracing::debug;
use walkdir::WalkDir;
use xmltree::{Element, XMLNode};

use crate::bleach::format::Subtype;
use crate::error::{BleachError, Result};

use super::Workspace;

/// Destino de una relación marcada como externa.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub struct HyperlinkRecord {
    pub target: String,
    pub external: bool,
}

/// Recorre los `.rels` del subtipo y devuelve los destinos externos sin duplicados.
///
/// El orden del resultado no tiene significado.
pub fn extract_hyperlinks(
    workspace: &Workspace,
    subtype: Subtype,
) -> Result<Vec<HyperlinkRecord>> {
    let mut records = BTreeSet::new();

    for folder in subtype.macro_location().relationship_folders {
        let folder_path = workspace.part_path(folder);
        if !folder_path.is_dir() {
            continue;
        }

        for entry in WalkDir::new(&folder_path).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let is_rels = entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("rels"));
            if !entry.file_type().is_file() || !is_rels {
                continue;
            }

            let part = entry
                .path()
                .strip_prefix(workspace.root())
                .unwrap_or(entry.path())
                .display()
                .to_string();
            let reader = BufReader::new(File::open(entry.path())?);
            let root = Element::parse(reader).map_err(|source| BleachError::MalformedPart {
                part: part.clone(),
                source,
            })?;

            let before = records.len();
            collect_external_targets(&root, &mut records);
            debug!(%part, found = records.len() - before, "relaciones revisadas");
        }
    }

    Ok(records.into_iter().collect())
}

fn collect_external_targets(root: &Element, records: &mut BTreeSet<HyperlinkRecord>) {
    for node in &root.children {
        let XMLNode::Element(relationship) = node else {
            continue;
        };
        if relationship.name != "Relationship" {
            continue;
        }

        let external = relationship
            .attributes
            .get("TargetMode")
            .is_some_and(|mode| mode.eq_ignore_ascii_case("External"));
        if !external {
            continue;
        }

        if let Some(target) = relationship.attributes.get("Target") {
            records.insert(HyperlinkRecord {
                target: target.clone(),
                external,
            });
        }
    }
}
