// Content Catalog
// Parses definition records from configuration text into descriptor lists

use std::collections::HashMap;

/// Category of registrable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Vehicle,
    Actor,
}

/// Category-specific attributes of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorAttrs {
    Vehicle {
        /// Named reference into the host's handling table.
        handling: String,
        /// Spawn group this vehicle belongs to.
        spawn_group: String,
    },
    Actor {
        actor_type: String,
        voice: String,
    },
}

/// One piece of registrable content. Immutable once parsed; identity is the
/// name, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDescriptor {
    pub name: String,
    pub attrs: DescriptorAttrs,
    pub flags: u32,
}

impl ContentDescriptor {
    pub fn kind(&self) -> ContentKind {
        match self.attrs {
            DescriptorAttrs::Vehicle { .. } => ContentKind::Vehicle,
            DescriptorAttrs::Actor { .. } => ContentKind::Actor,
        }
    }
}

/// Parse a flags field. Accepts `0x`-prefixed hex or plain decimal; anything
/// else (including a missing field) reads as zero.
fn parse_flags(field: &str) -> u32 {
    if let Some(hex) = field.strip_prefix("0x").or_else(|| field.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).unwrap_or(0)
    } else {
        field.parse().unwrap_or(0)
    }
}

/// Parse definition records, one per non-empty, non-comment line.
///
/// Fields are comma-separated and trimmed. Missing trailing fields default to
/// the empty string / zero flags. Lines that are empty after trimming are
/// skipped, never errors. No side effects beyond the returned descriptors.
pub fn parse_records(source: &str, kind: ContentKind) -> Vec<ContentDescriptor> {
    let mut out = Vec::new();

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let name = match fields.next() {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => continue,
        };
        let second = fields.next().unwrap_or("").to_string();
        let third = fields.next().unwrap_or("").to_string();
        let flags = parse_flags(fields.next().unwrap_or(""));

        let attrs = match kind {
            ContentKind::Vehicle => DescriptorAttrs::Vehicle {
                handling: second,
                spawn_group: third,
            },
            ContentKind::Actor => DescriptorAttrs::Actor {
                actor_type: second,
                voice: third,
            },
        };

        out.push(ContentDescriptor { name, attrs, flags });
    }

    out
}

/// In-memory catalog of every descriptor parsed at startup, indexed by
/// lowercased name for the group resolver's on-demand lookups.
#[derive(Debug, Default)]
pub struct Catalog {
    descriptors: Vec<ContentDescriptor>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(descriptors: Vec<ContentDescriptor>) -> Self {
        let mut by_name = HashMap::new();
        for (i, d) in descriptors.iter().enumerate() {
            // First entry wins on duplicate names.
            by_name.entry(d.name.to_ascii_lowercase()).or_insert(i);
        }
        Catalog {
            descriptors,
            by_name,
        }
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&ContentDescriptor> {
        self.by_name
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.descriptors[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentDescriptor> {
        self.descriptors.iter()
    }

    pub fn of_kind(&self, kind: ContentKind) -> impl Iterator<Item = &ContentDescriptor> {
        self.descriptors.iter().filter(move |d| d.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
