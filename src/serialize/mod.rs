//! Builds an element tree from the message model.
//!
//! Children are appended in RFC 4765 order. Nothing is written for an absent
//! value: `None`, an empty required string and an empty list all produce no
//! attribute or element. Two kinds of content are dropped on purpose because the
//! parser would not read them back the same way: a time without an NTP stamp and
//! a `Checksum` without a value. `AdditionalData` without values goes as well.

mod alert;
mod endpoint;

use std::fmt::Display;

use log::{debug, trace};

use crate::err::{IdmefError, Result};
use crate::model::vocabulary::Keyword;
use crate::model::xml::XmlElement;
use crate::model::{
    AdditionalData, Address, Analyzer, Heartbeat, IdmefTime, Message, MessageBody, Node, Process,
};
use crate::tag_names::{IDMEF_NAMESPACE, IDMEF_PREFIX, Tag, TagNames};

pub(crate) struct MessageWriter<'t> {
    tags: &'t TagNames,
}

impl<'t> MessageWriter<'t> {
    pub(crate) fn new(tags: &'t TagNames) -> Self {
        MessageWriter { tags }
    }

    fn element(&self, tag: Tag) -> XmlElement {
        XmlElement::new(self.tags.get(tag))
    }

    /// Appends `<tag>text</tag>` unless the text is absent or empty.
    fn push_text<'a>(&self, parent: &mut XmlElement, tag: Tag, text: impl Into<Option<&'a str>>) {
        if let Some(text) = text.into().filter(|text| !text.is_empty()) {
            let mut child = self.element(tag);
            child.push_text(text);
            parent.push_element(child);
        }
    }

    fn push_number<T: Display>(&self, parent: &mut XmlElement, tag: Tag, value: Option<T>) {
        if let Some(value) = value {
            self.push_text(parent, tag, value.to_string().as_str());
        }
    }

    fn push_time(&self, parent: &mut XmlElement, tag: Tag, time: Option<&IdmefTime>) -> Result<()> {
        let Some(time) = time else {
            return Ok(());
        };
        let Some(stamp) = &time.ntp_stamp else {
            debug!("dropping `{}` without an ntpstamp", self.tags.get(tag));
            return Ok(());
        };

        let text = time
            .to_wire()
            .map_err(|e| IdmefError::value(self.tags.get(tag), e))?;
        let mut child = self.element(tag);
        child.set_attribute("ntpstamp", stamp.as_str());
        child.push_text(text);
        parent.push_element(child);
        Ok(())
    }

    pub(crate) fn write_message(&self, message: &Message) -> Result<XmlElement> {
        let mut root = self.element(Tag::IdmefMessage);
        root.set_attribute("version", message.version.as_str());
        root.set_attribute(
            format!("xmlns:{}", IDMEF_PREFIX.trim_end_matches(':')),
            IDMEF_NAMESPACE,
        );

        let body = match &message.body {
            MessageBody::Heartbeat(heartbeat) => self.write_heartbeat(heartbeat)?,
            MessageBody::Alert(alert) => self.write_alert(alert)?,
        };
        root.push_element(body);
        Ok(root)
    }

    fn write_heartbeat(&self, heartbeat: &Heartbeat) -> Result<XmlElement> {
        trace!("writing heartbeat");
        let mut element = self.element(Tag::Heartbeat);
        set_attr(&mut element, "messageid", heartbeat.message_id.as_deref());

        element.push_element(self.write_analyzer(&heartbeat.analyzer));
        self.push_time(&mut element, Tag::CreateTime, Some(&heartbeat.create_time))?;
        self.push_number(&mut element, Tag::HeartbeatInterval, heartbeat.heartbeat_interval);
        self.push_time(&mut element, Tag::AnalyzerTime, heartbeat.analyzer_time.as_ref())?;
        for data in &heartbeat.additional_data {
            self.push_additional_data(&mut element, data);
        }

        Ok(element)
    }

    fn write_analyzer(&self, analyzer: &Analyzer) -> XmlElement {
        let mut element = self.element(Tag::Analyzer);
        set_attr(&mut element, "analyzerid", analyzer.analyzer_id.as_deref());
        set_attr(&mut element, "name", analyzer.name.as_deref());
        set_attr(&mut element, "manufacturer", analyzer.manufacturer.as_deref());
        set_attr(&mut element, "model", analyzer.model.as_deref());
        set_attr(&mut element, "version", analyzer.version.as_deref());
        set_attr(&mut element, "class", analyzer.class.as_deref());
        set_attr(&mut element, "ostype", analyzer.os_type.as_deref());
        set_attr(&mut element, "osversion", analyzer.os_version.as_deref());

        if let Some(node) = &analyzer.node {
            element.push_element(self.write_node(node));
        }
        if let Some(process) = &analyzer.process {
            element.push_element(self.write_process(process));
        }
        if let Some(relay) = &analyzer.analyzer {
            element.push_element(self.write_analyzer(relay));
        }

        element
    }

    fn write_node(&self, node: &Node) -> XmlElement {
        let mut element = self.element(Tag::Node);
        set_attr(&mut element, "ident", node.ident.as_deref());
        set_keyword(&mut element, "category", node.category);

        self.push_text(&mut element, Tag::Location, node.location.as_deref());
        self.push_text(&mut element, Tag::Name, node.name.as_deref());
        for address in &node.addresses {
            element.push_element(self.write_address(address));
        }

        element
    }

    fn write_address(&self, address: &Address) -> XmlElement {
        let mut element = self.element(Tag::Address);
        set_attr(&mut element, "ident", address.ident.as_deref());
        set_keyword(&mut element, "category", address.category);
        set_attr(&mut element, "vlan-name", address.vlan_name.as_deref());
        set_display(&mut element, "vlan-num", address.vlan_num);

        self.push_text(&mut element, Tag::AddressValue, address.address.as_str());
        self.push_text(&mut element, Tag::Netmask, address.netmask.as_deref());

        element
    }

    fn write_process(&self, process: &Process) -> XmlElement {
        let mut element = self.element(Tag::Process);
        set_attr(&mut element, "ident", process.ident.as_deref());

        self.push_text(&mut element, Tag::Name, process.name.as_str());
        self.push_number(&mut element, Tag::Pid, process.pid);
        self.push_text(&mut element, Tag::Path, process.path.as_deref());
        for arg in &process.args {
            self.push_text(&mut element, Tag::Arg, arg.as_str());
        }
        for env in &process.envs {
            self.push_text(&mut element, Tag::Env, env.as_str());
        }

        element
    }

    /// Value elements are named after the data type keyword, whatever the tag table says.
    fn push_additional_data(&self, parent: &mut XmlElement, data: &AdditionalData) {
        if data.values.is_empty() {
            debug!("dropping AdditionalData without values");
            return;
        }

        let mut element = self.element(Tag::AdditionalData);
        set_keyword(&mut element, "type", data.data_type);
        set_attr(&mut element, "meaning", data.meaning.as_deref());

        let value_name = format!("{}{}", IDMEF_PREFIX, data.data_type().keyword());
        for value in &data.values {
            let mut child = XmlElement::new(value_name.as_str());
            child.push_text(value.as_str());
            element.push_element(child);
        }

        parent.push_element(element);
    }
}

fn set_attr(element: &mut XmlElement, name: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|value| !value.is_empty()) {
        element.set_attribute(name, value);
    }
}

fn set_display<T: Display>(element: &mut XmlElement, name: &str, value: Option<T>) {
    if let Some(value) = value {
        element.set_attribute(name, value.to_string());
    }
}

fn set_keyword<K: Keyword>(element: &mut XmlElement, name: &str, value: Option<K>) {
    if let Some(value) = value {
        element.set_attribute(name, value.keyword());
    }
}
