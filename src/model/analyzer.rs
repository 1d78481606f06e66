use serde::Serialize;

use crate::model::{AddressCategory, NodeCategory};

/// Identity of the analyzer that produced a message, and of any analyzers it relays for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analyzer {
    pub analyzer_id: Option<String>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub class: Option<String>,
    pub os_type: Option<String>,
    pub os_version: Option<String>,
    pub node: Option<Node>,
    pub process: Option<Process>,
    pub analyzer: Option<Box<Analyzer>>,
}

impl Analyzer {
    /// Iterates over this analyzer and every analyzer it relays for, outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &Analyzer> {
        std::iter::successors(Some(self), |analyzer| analyzer.analyzer.as_deref())
    }
}

/// A host or device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    pub ident: Option<String>,
    pub category: Option<NodeCategory>,
    pub location: Option<String>,
    pub name: Option<String>,
    pub addresses: Vec<Address>,
}

impl Node {
    pub fn category(&self) -> NodeCategory {
        self.category.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    pub ident: Option<String>,
    pub category: Option<AddressCategory>,
    pub vlan_name: Option<String>,
    pub vlan_num: Option<i64>,
    pub address: String,
    pub netmask: Option<String>,
}

impl Address {
    pub fn new(category: AddressCategory, address: impl Into<String>) -> Self {
        Address {
            category: Some(category),
            address: address.into(),
            ..Default::default()
        }
    }

    pub fn category(&self) -> AddressCategory {
        self.category.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Process {
    pub ident: Option<String>,
    pub name: String,
    pub pid: Option<i64>,
    pub path: Option<String>,
    pub args: Vec<String>,
    pub envs: Vec<String>,
}
