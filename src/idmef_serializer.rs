use std::io::Write;

use log::trace;

use crate::err::{IdmefError, Result};
use crate::model::Message;
use crate::serialize::MessageWriter;
use crate::tag_names::TagNames;
use crate::xml_output::render_document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerSettings {
    /// Four-space indentation and one element per line.
    indent: bool,
    tag_names: TagNames,
}

impl Default for SerializerSettings {
    fn default() -> Self {
        SerializerSettings {
            indent: true,
            tag_names: TagNames::default(),
        }
    }
}

impl SerializerSettings {
    pub fn new() -> Self {
        SerializerSettings::default()
    }

    /// Sets whether output should be indented.
    pub fn indent(mut self, pretty: bool) -> Self {
        self.indent = pretty;
        self
    }

    pub fn tag_names(mut self, tag_names: TagNames) -> Self {
        self.tag_names = tag_names;
        self
    }

    pub fn should_indent(&self) -> bool {
        self.indent
    }

    pub fn get_tag_names(&self) -> &TagNames {
        &self.tag_names
    }
}

/// Writes [`Message`]s as IDMEF XML documents.
#[derive(Debug, Clone, Default)]
pub struct IdmefSerializer {
    settings: SerializerSettings,
}

impl IdmefSerializer {
    pub fn new() -> Self {
        IdmefSerializer::default()
    }

    pub fn with_tag_names(tag_names: TagNames) -> Self {
        IdmefSerializer::new().with_configuration(SerializerSettings::new().tag_names(tag_names))
    }

    pub fn with_configuration(mut self, configuration: SerializerSettings) -> Self {
        self.settings = configuration;
        self
    }

    pub fn settings(&self) -> &SerializerSettings {
        &self.settings
    }

    /// Serializes `message` into a UTF-8 document with a standalone declaration.
    pub fn serialize(&self, message: &Message) -> Result<String> {
        let mut buffer = Vec::new();
        self.serialize_to_writer(message, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| IdmefError::Io {
            action: "collecting XML output",
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })
    }

    pub fn serialize_to_writer<W: Write>(&self, message: &Message, writer: &mut W) -> Result<()> {
        let root = MessageWriter::new(&self.settings.tag_names).write_message(message)?;
        trace!("rendering `{}`", root.name);
        render_document(&root, self.settings.indent, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Heartbeat, IdmefTime, NtpStamp};
    use crate::tag_names::Tag;
    use pretty_assertions::assert_eq;

    fn heartbeat() -> Message {
        Message::heartbeat(Heartbeat {
            message_id: Some("hb-1".to_owned()),
            create_time: IdmefTime::parse("2000-03-09T14:07:58Z")
                .unwrap()
                .with_ntp_stamp(NtpStamp::new("0xbc722ebe.0x00000000").unwrap()),
            heartbeat_interval: Some(600),
            ..Default::default()
        })
    }

    #[test]
    fn test_indented_document() {
        let xml = IdmefSerializer::new().serialize(&heartbeat()).unwrap();
        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<idmef:IDMEF-Message version="1.0" xmlns:idmef="http://iana.org/idmef">
    <idmef:Heartbeat messageid="hb-1">
        <idmef:Analyzer/>
        <idmef:CreateTime ntpstamp="0xbc722ebe.0x00000000">2000-03-09T14:07:58Z</idmef:CreateTime>
        <idmef:HeartbeatInterval>600</idmef:HeartbeatInterval>
    </idmef:Heartbeat>
</idmef:IDMEF-Message>
"#
        );
    }

    #[test]
    fn test_compact_document_with_custom_tags() {
        let mut tags = TagNames::default();
        tags.set(Tag::IdmefMessage, "IDMEF-Message").unwrap();
        tags.set(Tag::Heartbeat, "Heartbeat").unwrap();

        let serializer = IdmefSerializer::with_tag_names(tags.clone())
            .with_configuration(SerializerSettings::new().indent(false).tag_names(tags));
        let xml = serializer.serialize(&heartbeat()).unwrap();

        assert!(xml.starts_with(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><IDMEF-Message version="1.0""#
        ));
        assert!(xml.contains("<Heartbeat messageid=\"hb-1\"><idmef:Analyzer/>"));
        assert!(!xml.contains('\n'));
    }
}
