// Group Resolver
// Builds named collections of slot indices from the catalog, registering
// referenced-but-unregistered content on demand.

use crate::catalog::{Catalog, ContentKind};
use crate::host::SlotIndex;

use super::ResourceRegistry;

/// A named, ordered collection of slot indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub kind: ContentKind,
    pub name: String,
    pub members: Vec<SlotIndex>,
}

/// Build a group and install it into the host's grouping facility.
///
/// Each member name is resolved against the registry first; unregistered
/// names are looked up in the catalog and registered on demand. Names absent
/// from both are skipped with a warning, never an error. Rebuilding a group
/// with the same name replaces the host's previous mapping.
pub fn build_group(
    registry: &mut ResourceRegistry,
    catalog: &Catalog,
    kind: ContentKind,
    name: &str,
    member_names: &[String],
) -> Group {
    let mut members = Vec::with_capacity(member_names.len());

    for member in member_names {
        let index = registry.lookup(member).or_else(|| {
            let descriptor = catalog.find(member)?.clone();
            match registry.register(descriptor) {
                Ok(index) => Some(index),
                Err(e) => {
                    log::warn!("group '{}': cannot register '{}': {}", name, member, e);
                    None
                }
            }
        });

        match index {
            Some(index) => members.push(index),
            None => log::warn!("group '{}' references unknown content '{}'", name, member),
        }
    }

    let group = Group {
        kind,
        name: name.to_string(),
        members,
    };
    registry
        .resources()
        .install_group(kind, &group.name, &group.members);
    group
}
