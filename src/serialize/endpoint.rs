use log::debug;

use crate::err::Result;
use crate::model::xml::XmlElement;
use crate::model::{
    Checksum, File, FileAccess, Inode, Linkage, Service, ServiceKind, SnmpService, Source, Target,
    User, UserId, WebService,
};
use crate::tag_names::Tag;
use crate::utils::format_portlist;

use super::{MessageWriter, set_attr, set_display, set_keyword};

impl MessageWriter<'_> {
    pub(super) fn write_source(&self, source: &Source) -> XmlElement {
        let mut element = self.element(Tag::Source);
        set_attr(&mut element, "ident", source.ident.as_deref());
        set_keyword(&mut element, "spoofed", source.spoofed);
        set_attr(&mut element, "interface", source.interface.as_deref());

        if let Some(node) = &source.node {
            element.push_element(self.write_node(node));
        }
        if let Some(user) = &source.user {
            element.push_element(self.write_user(user));
        }
        if let Some(process) = &source.process {
            element.push_element(self.write_process(process));
        }
        if let Some(service) = &source.service {
            element.push_element(self.write_service(service));
        }

        element
    }

    pub(super) fn write_target(&self, target: &Target) -> Result<XmlElement> {
        let mut element = self.element(Tag::Target);
        set_attr(&mut element, "ident", target.ident.as_deref());
        set_keyword(&mut element, "decoy", target.decoy);
        set_attr(&mut element, "interface", target.interface.as_deref());

        if let Some(node) = &target.node {
            element.push_element(self.write_node(node));
        }
        if let Some(user) = &target.user {
            element.push_element(self.write_user(user));
        }
        if let Some(process) = &target.process {
            element.push_element(self.write_process(process));
        }
        if let Some(service) = &target.service {
            element.push_element(self.write_service(service));
        }
        for file in &target.files {
            element.push_element(self.write_file(file)?);
        }

        Ok(element)
    }

    fn write_user(&self, user: &User) -> XmlElement {
        let mut element = self.element(Tag::User);
        set_attr(&mut element, "ident", user.ident.as_deref());
        set_keyword(&mut element, "category", user.category);

        for user_id in &user.user_ids {
            element.push_element(self.write_user_id(user_id));
        }

        element
    }

    fn write_user_id(&self, user_id: &UserId) -> XmlElement {
        let mut element = self.element(Tag::UserId);
        set_attr(&mut element, "ident", user_id.ident.as_deref());
        set_keyword(&mut element, "type", user_id.id_type);
        set_attr(&mut element, "tty", user_id.tty.as_deref());

        self.push_text(&mut element, Tag::Name, user_id.name.as_deref());
        self.push_number(&mut element, Tag::Number, user_id.number);

        element
    }

    fn write_service(&self, service: &Service) -> XmlElement {
        let mut element = self.element(Tag::Service);
        set_attr(&mut element, "ident", service.ident.as_deref());
        set_display(&mut element, "ip_version", service.ip_version);
        set_display(&mut element, "iana_protocol_number", service.iana_protocol_number);
        set_attr(&mut element, "iana_protocol_name", service.iana_protocol_name.as_deref());

        self.push_text(&mut element, Tag::Name, service.name.as_deref());
        self.push_number(&mut element, Tag::Port, service.port);
        if !service.portlist.is_empty() {
            self.push_text(
                &mut element,
                Tag::Portlist,
                format_portlist(&service.portlist).as_str(),
            );
        }
        self.push_text(&mut element, Tag::Protocol, service.protocol.as_deref());

        match &service.kind {
            ServiceKind::Plain => {}
            ServiceKind::Web(web) => element.push_element(self.write_web_service(web)),
            ServiceKind::Snmp(snmp) => element.push_element(self.write_snmp_service(snmp)),
        }

        element
    }

    fn write_web_service(&self, web: &WebService) -> XmlElement {
        let mut element = self.element(Tag::WebService);
        self.push_text(&mut element, Tag::Url, web.url.as_str());
        self.push_text(&mut element, Tag::Cgi, web.cgi.as_deref());
        self.push_text(&mut element, Tag::HttpMethod, web.http_method.as_deref());
        for arg in &web.args {
            self.push_text(&mut element, Tag::Arg, arg.as_str());
        }
        element
    }

    fn write_snmp_service(&self, snmp: &SnmpService) -> XmlElement {
        let mut element = self.element(Tag::SnmpService);
        self.push_text(&mut element, Tag::Oid, snmp.oid.as_deref());
        self.push_number(
            &mut element,
            Tag::MessageProcessingModel,
            snmp.message_processing_model,
        );
        self.push_number(&mut element, Tag::SecurityModel, snmp.security_model);
        self.push_text(&mut element, Tag::SecurityName, snmp.security_name.as_deref());
        self.push_number(&mut element, Tag::SecurityLevel, snmp.security_level);
        self.push_text(&mut element, Tag::ContextName, snmp.context_name.as_deref());
        self.push_text(
            &mut element,
            Tag::ContextEngineId,
            snmp.context_engine_id.as_deref(),
        );
        self.push_text(&mut element, Tag::Command, snmp.command.as_deref());
        element
    }

    fn write_file(&self, file: &File) -> Result<XmlElement> {
        let mut element = self.element(Tag::File);
        set_attr(&mut element, "ident", file.ident.as_deref());
        set_keyword(&mut element, "category", file.category);
        set_attr(&mut element, "fstype", file.fstype.as_deref());
        set_attr(&mut element, "file-type", file.file_type.as_deref());

        self.push_text(&mut element, Tag::Name, file.name.as_str());
        self.push_text(&mut element, Tag::Path, file.path.as_str());
        self.push_time(&mut element, Tag::FileCreateTime, file.create_time.as_ref())?;
        self.push_time(&mut element, Tag::FileModifyTime, file.modify_time.as_ref())?;
        self.push_time(&mut element, Tag::FileAccessTime, file.access_time.as_ref())?;
        self.push_number(&mut element, Tag::DataSize, file.data_size.as_ref());
        self.push_number(&mut element, Tag::DiskSize, file.disk_size.as_ref());
        for access in &file.file_accesses {
            element.push_element(self.write_file_access(access));
        }
        for linkage in &file.linkages {
            element.push_element(self.write_linkage(linkage)?);
        }
        if let Some(inode) = &file.inode {
            element.push_element(self.write_inode(inode)?);
        }
        for checksum in &file.checksums {
            self.push_checksum(&mut element, checksum);
        }

        Ok(element)
    }

    fn write_file_access(&self, access: &FileAccess) -> XmlElement {
        let mut element = self.element(Tag::FileAccess);
        element.push_element(self.write_user_id(&access.user_id));
        for permission in &access.permissions {
            let mut child = self.element(Tag::Permission);
            set_keyword(&mut child, "perms", Some(*permission));
            element.push_element(child);
        }
        element
    }

    fn write_linkage(&self, linkage: &Linkage) -> Result<XmlElement> {
        let mut element = self.element(Tag::Linkage);
        set_keyword(&mut element, "category", linkage.category);

        self.push_text(&mut element, Tag::Name, linkage.name.as_str());
        self.push_text(&mut element, Tag::Path, linkage.path.as_str());
        if let Some(file) = &linkage.file {
            element.push_element(self.write_file(file)?);
        }

        Ok(element)
    }

    fn write_inode(&self, inode: &Inode) -> Result<XmlElement> {
        let mut element = self.element(Tag::Inode);
        self.push_time(&mut element, Tag::ChangeTime, inode.change_time.as_ref())?;
        self.push_number(&mut element, Tag::Number, inode.number);
        self.push_number(&mut element, Tag::MajorDevice, inode.major_device);
        self.push_number(&mut element, Tag::MinorDevice, inode.minor_device);
        self.push_number(&mut element, Tag::CMajorDevice, inode.c_major_device);
        self.push_number(&mut element, Tag::CMinorDevice, inode.c_minor_device);
        Ok(element)
    }

    fn push_checksum(&self, parent: &mut XmlElement, checksum: &Checksum) {
        if checksum.value.is_empty() {
            debug!("dropping Checksum without a value");
            return;
        }

        let mut element = self.element(Tag::Checksum);
        set_keyword(&mut element, "algorithm", checksum.algorithm);
        self.push_text(&mut element, Tag::Value, checksum.value.as_str());
        self.push_text(&mut element, Tag::Key, checksum.key.as_deref());
        parent.push_element(element);
    }
}
