//! Builds the message model from an element tree.
//!
//! Every routine follows the same shape: read the attributes it knows, then walk
//! the element children, resolving each child name through the tag table and
//! dispatching on the logical [`Tag`]. Children that mean nothing in the current
//! context are skipped with a debug record. Attribute values and text are trimmed
//! and an empty result is treated as absent; `AdditionalData` values are the one
//! exception and are kept verbatim. Every time element must carry an `ntpstamp`.

mod alert;
mod endpoint;

use log::{debug, trace};

use crate::err::{IdmefError, Result, ValueError};
use crate::model::vocabulary::Keyword;
use crate::model::xml::XmlElement;
use crate::model::{
    AdditionalData, Address, Analyzer, DEFAULT_VERSION, Heartbeat, IdmefTime, Message,
    MessageBody, Node, NtpStamp, Process,
};
use crate::tag_names::{Tag, TagNames};

pub(crate) struct MessageReader<'t> {
    tags: &'t TagNames,
}

impl<'t> MessageReader<'t> {
    pub(crate) fn new(tags: &'t TagNames) -> Self {
        MessageReader { tags }
    }

    /// The logical tag of `element`, if the table knows its name.
    fn tag_of(&self, element: &XmlElement) -> Option<Tag> {
        self.tags.lookup(&element.name)
    }

    /// Element children paired with their logical tag; unknown names are skipped.
    fn children<'e>(
        &'e self,
        element: &'e XmlElement,
    ) -> impl Iterator<Item = (Tag, &'e XmlElement)> + 'e {
        element.elements().filter_map(move |child| match self.tag_of(child) {
            Some(tag) => Some((tag, child)),
            None => {
                debug!(
                    "ignoring unknown element `{}` inside `{}`",
                    child.name, element.name
                );
                None
            }
        })
    }

    fn ignore(&self, parent: &XmlElement, child: &XmlElement) {
        debug!(
            "ignoring element `{}`, not expected inside `{}`",
            child.name, parent.name
        );
    }

    pub(crate) fn read_message(&self, root: &XmlElement) -> Result<Message> {
        let expected = self.tags.get(Tag::IdmefMessage);
        if root.name != expected {
            return Err(IdmefError::UnexpectedRoot {
                expected: expected.to_owned(),
                found: root.name.clone(),
            });
        }

        let version = attr(root, "version").unwrap_or(DEFAULT_VERSION).to_owned();

        let first = root.first_element().ok_or(IdmefError::EmptyMessage)?;
        let body = match self.tag_of(first) {
            Some(Tag::Heartbeat) => MessageBody::Heartbeat(self.read_heartbeat(first)?),
            Some(Tag::Alert) => MessageBody::Alert(self.read_alert(first)?),
            _ => {
                return Err(IdmefError::UnknownMessageKind {
                    found: first.name.clone(),
                });
            }
        };

        Ok(Message { version, body })
    }

    fn read_heartbeat(&self, element: &XmlElement) -> Result<Heartbeat> {
        trace!("reading heartbeat");
        let mut heartbeat = Heartbeat {
            message_id: attr_string(element, "messageid"),
            ..Default::default()
        };

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Analyzer => heartbeat.analyzer = self.read_analyzer(child)?,
                Tag::CreateTime => heartbeat.create_time = self.read_time(child)?,
                Tag::AnalyzerTime => heartbeat.analyzer_time = Some(self.read_time(child)?),
                Tag::HeartbeatInterval => heartbeat.heartbeat_interval = text_int(child)?,
                Tag::AdditionalData => heartbeat
                    .additional_data
                    .push(self.read_additional_data(child)?),
                _ => self.ignore(element, child),
            }
        }

        Ok(heartbeat)
    }

    fn read_analyzer(&self, element: &XmlElement) -> Result<Analyzer> {
        let mut analyzer = Analyzer {
            analyzer_id: attr_string(element, "analyzerid"),
            name: attr_string(element, "name"),
            manufacturer: attr_string(element, "manufacturer"),
            model: attr_string(element, "model"),
            version: attr_string(element, "version"),
            class: attr_string(element, "class"),
            os_type: attr_string(element, "ostype"),
            os_version: attr_string(element, "osversion"),
            ..Default::default()
        };

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Node => analyzer.node = Some(self.read_node(child)?),
                Tag::Process => analyzer.process = Some(self.read_process(child)?),
                Tag::Analyzer => analyzer.analyzer = Some(Box::new(self.read_analyzer(child)?)),
                _ => self.ignore(element, child),
            }
        }

        Ok(analyzer)
    }

    fn read_node(&self, element: &XmlElement) -> Result<Node> {
        let mut node = Node {
            ident: attr_string(element, "ident"),
            category: attr_keyword(element, "category")?,
            ..Default::default()
        };

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Location => node.location = child.text(),
                Tag::Name => node.name = child.text(),
                Tag::Address => node.addresses.push(self.read_address(child)?),
                _ => self.ignore(element, child),
            }
        }

        Ok(node)
    }

    fn read_address(&self, element: &XmlElement) -> Result<Address> {
        let mut address = Address {
            ident: attr_string(element, "ident"),
            category: attr_keyword(element, "category")?,
            vlan_name: attr_string(element, "vlan-name"),
            vlan_num: attr_int(element, "vlan-num")?,
            ..Default::default()
        };

        for (tag, child) in self.children(element) {
            match tag {
                Tag::AddressValue => address.address = child.text().unwrap_or_default(),
                Tag::Netmask => address.netmask = child.text(),
                _ => self.ignore(element, child),
            }
        }

        Ok(address)
    }

    fn read_process(&self, element: &XmlElement) -> Result<Process> {
        let mut process = Process {
            ident: attr_string(element, "ident"),
            ..Default::default()
        };

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Name => process.name = child.text().unwrap_or_default(),
                Tag::Pid => process.pid = text_int(child)?,
                Tag::Path => process.path = child.text(),
                Tag::Arg => process.args.extend(child.text()),
                Tag::Env => process.envs.extend(child.text()),
                _ => self.ignore(element, child),
            }
        }

        Ok(process)
    }

    /// A time element: date-time text plus the required `ntpstamp` attribute.
    fn read_time(&self, element: &XmlElement) -> Result<IdmefTime> {
        let text = element.text().unwrap_or_default();
        let time =
            IdmefTime::parse(&text).map_err(|e| IdmefError::value(element.name.clone(), e))?;

        let stamp = attr(element, "ntpstamp")
            .ok_or(ValueError::MissingNtpStamp)
            .and_then(NtpStamp::new)
            .map_err(|e| attr_error(element, "ntpstamp", e))?;

        Ok(time.with_ntp_stamp(stamp))
    }

    /// Values are the raw texts of the element children, whatever they are named.
    fn read_additional_data(&self, element: &XmlElement) -> Result<AdditionalData> {
        Ok(AdditionalData {
            data_type: attr_keyword(element, "type")?,
            meaning: attr_string(element, "meaning"),
            values: element.elements().map(XmlElement::text_content).collect(),
        })
    }
}

fn attr<'e>(element: &'e XmlElement, name: &str) -> Option<&'e str> {
    element
        .attribute(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn attr_string(element: &XmlElement, name: &str) -> Option<String> {
    attr(element, name).map(str::to_owned)
}

fn attr_error(element: &XmlElement, name: &str, source: ValueError) -> IdmefError {
    IdmefError::value(format!("{}@{}", element.name, name), source)
}

fn attr_keyword<K: Keyword>(element: &XmlElement, name: &str) -> Result<Option<K>> {
    attr(element, name)
        .map(K::from_wire)
        .transpose()
        .map_err(|e| attr_error(element, name, e))
}

fn attr_int(element: &XmlElement, name: &str) -> Result<Option<i64>> {
    attr(element, name)
        .map(parse_int)
        .transpose()
        .map_err(|e| attr_error(element, name, e))
}

fn text_int<T: std::str::FromStr>(element: &XmlElement) -> Result<Option<T>> {
    element
        .text()
        .map(|text| parse_int(&text))
        .transpose()
        .map_err(|e| IdmefError::value(element.name.clone(), e))
}

/// Strict base-10 integer.
fn parse_int<T: std::str::FromStr>(text: &str) -> std::result::Result<T, ValueError> {
    text.parse().map_err(|_| ValueError::InvalidInteger {
        value: text.to_owned(),
    })
}

#[cfg(test)]
mod tests;
