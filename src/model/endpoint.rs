use serde::Serialize;

use crate::model::{
    Decoy, File, Node, PortRange, Process, Spoofed, UserCategory, UserIdType,
};

/// Where an event originated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Source {
    pub ident: Option<String>,
    pub spoofed: Option<Spoofed>,
    pub interface: Option<String>,
    pub node: Option<Node>,
    pub user: Option<User>,
    pub process: Option<Process>,
    pub service: Option<Service>,
}

impl Source {
    pub fn spoofed(&self) -> Spoofed {
        self.spoofed.unwrap_or_default()
    }
}

/// What an event was aimed at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Target {
    pub ident: Option<String>,
    pub decoy: Option<Decoy>,
    pub interface: Option<String>,
    pub node: Option<Node>,
    pub user: Option<User>,
    pub process: Option<Process>,
    pub service: Option<Service>,
    pub files: Vec<File>,
}

impl Target {
    pub fn decoy(&self) -> Decoy {
        self.decoy.unwrap_or_default()
    }
}

/// Copies the fields a target shares with a source; `spoofed` has no counterpart.
impl From<Source> for Target {
    fn from(source: Source) -> Self {
        Target {
            ident: source.ident,
            decoy: None,
            interface: source.interface,
            node: source.node,
            user: source.user,
            process: source.process,
            service: source.service,
            files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub ident: Option<String>,
    pub category: Option<UserCategory>,
    pub user_ids: Vec<UserId>,
}

impl User {
    pub fn category(&self) -> UserCategory {
        self.category.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserId {
    pub ident: Option<String>,
    pub id_type: Option<UserIdType>,
    pub tty: Option<String>,
    pub name: Option<String>,
    pub number: Option<i64>,
}

impl UserId {
    pub fn id_type(&self) -> UserIdType {
        self.id_type.unwrap_or_default()
    }
}

/// A network service, optionally specialized as a web or SNMP service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Service {
    pub ident: Option<String>,
    pub ip_version: Option<i64>,
    pub iana_protocol_number: Option<i64>,
    pub iana_protocol_name: Option<String>,
    pub name: Option<String>,
    pub port: Option<u16>,
    pub portlist: Vec<PortRange>,
    pub protocol: Option<String>,
    pub kind: ServiceKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum ServiceKind {
    #[default]
    Plain,
    Web(WebService),
    Snmp(SnmpService),
}

impl Service {
    pub fn web_service(&self) -> Option<&WebService> {
        match &self.kind {
            ServiceKind::Web(web) => Some(web),
            _ => None,
        }
    }

    pub fn snmp_service(&self) -> Option<&SnmpService> {
        match &self.kind {
            ServiceKind::Snmp(snmp) => Some(snmp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebService {
    pub url: String,
    pub cgi: Option<String>,
    pub http_method: Option<String>,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnmpService {
    pub oid: Option<String>,
    pub message_processing_model: Option<i64>,
    pub security_model: Option<i64>,
    pub security_name: Option<String>,
    pub security_level: Option<i64>,
    pub context_name: Option<String>,
    pub context_engine_id: Option<String>,
    pub command: Option<String>,
}
