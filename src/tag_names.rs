//! Element-name indirection.
//!
//! The parser and the serializer never spell an element name themselves; they go
//! through a [`TagNames`] table, keyed by the logical RFC 4765 element name. The
//! default table uses the DTD names with the `idmef:` prefix. A deployment that
//! spells elements differently supplies its own table, for example from JSON:
//!
//! ```json
//! { "IDMEF-Message": "IDMEF-Message", "Alert": "Alert" }
//! ```
//!
//! Keys left out of a JSON table keep their default. Attribute names are fixed and
//! are not part of the table.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use hashbrown::HashMap as FastMap;

use crate::err::TagNamesError;

/// Prefix of the default element names and of `AdditionalData` value elements.
pub const IDMEF_PREFIX: &str = "idmef:";

/// Namespace bound to [`IDMEF_PREFIX`] on the document root.
pub const IDMEF_NAMESPACE: &str = "http://iana.org/idmef";

macro_rules! logical_tags {
    ($($variant:ident => $logical:literal),+ $(,)?) => {
        /// A logical IDMEF element.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Tag {
            $($variant,)+
        }

        impl Tag {
            pub const ALL: &'static [Tag] = &[$(Tag::$variant),+];

            /// The element name as written in the RFC 4765 DTD.
            pub fn logical_name(self) -> &'static str {
                match self {
                    $(Tag::$variant => $logical,)+
                }
            }

            pub fn from_logical_name(name: &str) -> Option<Tag> {
                match name {
                    $($logical => Some(Tag::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

logical_tags! {
    IdmefMessage => "IDMEF-Message",
    Heartbeat => "Heartbeat",
    Alert => "Alert",
    Analyzer => "Analyzer",
    CreateTime => "CreateTime",
    DetectTime => "DetectTime",
    AnalyzerTime => "AnalyzerTime",
    HeartbeatInterval => "HeartbeatInterval",
    AdditionalData => "AdditionalData",
    Node => "Node",
    Location => "location",
    Name => "name",
    Address => "Address",
    AddressValue => "address",
    Netmask => "netmask",
    Process => "Process",
    Pid => "pid",
    Path => "path",
    Arg => "arg",
    Env => "env",
    Classification => "Classification",
    Reference => "Reference",
    Url => "url",
    Source => "Source",
    Target => "Target",
    User => "User",
    UserId => "UserId",
    Number => "number",
    Service => "Service",
    Port => "port",
    Portlist => "portlist",
    Protocol => "protocol",
    WebService => "WebService",
    Cgi => "cgi",
    HttpMethod => "http-method",
    SnmpService => "SNMPService",
    Oid => "oid",
    MessageProcessingModel => "messageProcessingModel",
    SecurityModel => "securityModel",
    SecurityName => "securityName",
    SecurityLevel => "securityLevel",
    ContextName => "contextName",
    ContextEngineId => "contextEngineID",
    Command => "command",
    File => "File",
    FileCreateTime => "create-time",
    FileModifyTime => "modify-time",
    FileAccessTime => "access-time",
    DataSize => "data-size",
    DiskSize => "disk-size",
    FileAccess => "FileAccess",
    Permission => "Permission",
    Linkage => "Linkage",
    Inode => "Inode",
    ChangeTime => "change-time",
    MajorDevice => "major-device",
    MinorDevice => "minor-device",
    CMajorDevice => "c-major-device",
    CMinorDevice => "c-minor-device",
    Checksum => "Checksum",
    Value => "value",
    Key => "key",
    Assessment => "Assessment",
    Impact => "Impact",
    Action => "Action",
    Confidence => "Confidence",
    ToolAlert => "ToolAlert",
    OverflowAlert => "OverflowAlert",
    CorrelationAlert => "CorrelationAlert",
    AlertIdent => "alertident",
    Program => "program",
    Size => "size",
    Buffer => "buffer",
}

/// Maps every [`Tag`] to the element name used on the wire.
///
/// Cloning is cheap; the table is shared and only copied when modified.
#[derive(Debug, Clone)]
pub struct TagNames {
    inner: Arc<TagTable>,
}

#[derive(Debug, Clone)]
struct TagTable {
    names: Vec<String>,
    lookup: FastMap<String, Tag, ahash::RandomState>,
}

impl TagTable {
    fn rebuild_lookup(&mut self) -> Result<(), TagNamesError> {
        let mut lookup =
            FastMap::with_capacity_and_hasher(self.names.len(), ahash::RandomState::new());
        for tag in Tag::ALL {
            let name = &self.names[*tag as usize];
            if let Some(previous) = lookup.insert(name.clone(), *tag) {
                return Err(TagNamesError::DuplicateName {
                    first: previous.logical_name(),
                    second: tag.logical_name(),
                    name: name.clone(),
                });
            }
        }
        self.lookup = lookup;
        Ok(())
    }
}

impl PartialEq for TagNames {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.names == other.inner.names
    }
}

impl Eq for TagNames {}

impl Default for TagNames {
    fn default() -> Self {
        let names: Vec<String> = Tag::ALL
            .iter()
            .map(|tag| format!("{IDMEF_PREFIX}{}", tag.logical_name()))
            .collect();
        let lookup = Tag::ALL
            .iter()
            .map(|tag| (names[*tag as usize].clone(), *tag))
            .collect::<FastMap<_, _, ahash::RandomState>>();

        TagNames {
            inner: Arc::new(TagTable { names, lookup }),
        }
    }
}

impl TagNames {
    /// Builds a table from a JSON object of logical name to wire name.
    pub fn from_json(json: &str) -> Result<Self, TagNamesError> {
        let overrides: BTreeMap<String, String> = serde_json::from_str(json)?;

        let mut table = TagNames::default();
        {
            let inner = Arc::make_mut(&mut table.inner);
            for (logical, name) in overrides {
                let tag = Tag::from_logical_name(&logical)
                    .ok_or_else(|| TagNamesError::UnknownTag(logical.clone()))?;
                inner.names[tag as usize] = checked_name(tag, name)?;
            }
            inner.rebuild_lookup()?;
        }

        Ok(table)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TagNamesError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TagNamesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The wire name of `tag`.
    pub fn get(&self, tag: Tag) -> &str {
        &self.inner.names[tag as usize]
    }

    /// Replaces the wire name of `tag`. Fails if another tag already uses `name`.
    pub fn set(&mut self, tag: Tag, name: impl Into<String>) -> Result<(), TagNamesError> {
        let name = checked_name(tag, name.into())?;
        let mut candidate = (*self.inner).clone();
        candidate.names[tag as usize] = name;
        candidate.rebuild_lookup()?;
        self.inner = Arc::new(candidate);
        Ok(())
    }

    /// The logical tag an element name stands for, if any.
    pub fn lookup(&self, name: &str) -> Option<Tag> {
        self.inner.lookup.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tag, &str)> {
        Tag::ALL.iter().map(|tag| (*tag, self.get(*tag)))
    }
}

fn checked_name(tag: Tag, name: String) -> Result<String, TagNamesError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TagNamesError::EmptyName(tag.logical_name()));
    }
    Ok(trimmed.to_owned())
}
