use log::trace;

use crate::err::{IdmefError, Result};
use crate::model::xml::XmlElement;
use crate::model::{
    Checksum, File, FileAccess, Inode, Linkage, Permission, Service, ServiceKind,
    SnmpService, Source, Target, User, UserId, WebService,
};
use crate::tag_names::Tag;
use crate::utils::parse_portlist;

use super::{MessageReader, attr_int, attr_keyword, attr_string, text_int};

impl MessageReader<'_> {
    pub(super) fn read_source(&self, element: &XmlElement) -> Result<Source> {
        let mut source = Source {
            spoofed: attr_keyword(element, "spoofed")?,
            ..self.read_endpoint_attributes(element)
        };

        for (tag, child) in self.children(element) {
            self.read_endpoint_child(element, tag, child, &mut source)?;
        }

        Ok(source)
    }

    /// A target is read as the common endpoint shape, then its own fields are layered on.
    pub(super) fn read_target(&self, element: &XmlElement) -> Result<Target> {
        let mut common = self.read_endpoint_attributes(element);
        let mut files = Vec::new();

        for (tag, child) in self.children(element) {
            match tag {
                Tag::File => files.push(self.read_file(child)?),
                _ => self.read_endpoint_child(element, tag, child, &mut common)?,
            }
        }

        Ok(Target {
            decoy: attr_keyword(element, "decoy")?,
            files,
            ..Target::from(common)
        })
    }

    fn read_endpoint_attributes(&self, element: &XmlElement) -> Source {
        Source {
            ident: attr_string(element, "ident"),
            interface: attr_string(element, "interface"),
            ..Default::default()
        }
    }

    fn read_endpoint_child(
        &self,
        parent: &XmlElement,
        tag: Tag,
        child: &XmlElement,
        endpoint: &mut Source,
    ) -> Result<()> {
        match tag {
            Tag::Node => endpoint.node = Some(self.read_node(child)?),
            Tag::User => endpoint.user = Some(self.read_user(child)?),
            Tag::Process => endpoint.process = Some(self.read_process(child)?),
            Tag::Service => endpoint.service = Some(self.read_service(child)?),
            _ => self.ignore(parent, child),
        }
        Ok(())
    }

    fn read_user(&self, element: &XmlElement) -> Result<User> {
        let mut user = User {
            ident: attr_string(element, "ident"),
            category: attr_keyword(element, "category")?,
            ..Default::default()
        };

        for (tag, child) in self.children(element) {
            match tag {
                Tag::UserId => user.user_ids.push(self.read_user_id(child)?),
                _ => self.ignore(element, child),
            }
        }

        Ok(user)
    }

    fn read_user_id(&self, element: &XmlElement) -> Result<UserId> {
        let mut user_id = UserId {
            ident: attr_string(element, "ident"),
            id_type: attr_keyword(element, "type")?,
            tty: attr_string(element, "tty"),
            ..Default::default()
        };

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Name => user_id.name = child.text(),
                Tag::Number => user_id.number = text_int(child)?,
                _ => self.ignore(element, child),
            }
        }

        Ok(user_id)
    }

    fn read_service(&self, element: &XmlElement) -> Result<Service> {
        let mut service = Service {
            ident: attr_string(element, "ident"),
            ip_version: attr_int(element, "ip_version")?,
            iana_protocol_number: attr_int(element, "iana_protocol_number")?,
            iana_protocol_name: attr_string(element, "iana_protocol_name"),
            ..Default::default()
        };
        let mut subtype: Option<&XmlElement> = None;

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Name => service.name = child.text(),
                Tag::Port => service.port = text_int(child)?,
                Tag::Portlist => {
                    if let Some(text) = child.text() {
                        service.portlist = parse_portlist(&text)
                            .map_err(|e| IdmefError::value(child.name.clone(), e))?;
                    }
                }
                Tag::Protocol => service.protocol = child.text(),
                Tag::WebService | Tag::SnmpService => {
                    if let Some(first) = subtype {
                        return Err(IdmefError::MultipleServiceSubtypes {
                            first: first.name.clone(),
                            second: child.name.clone(),
                        });
                    }
                    subtype = Some(child);
                    service.kind = if tag == Tag::WebService {
                        ServiceKind::Web(self.read_web_service(child)?)
                    } else {
                        ServiceKind::Snmp(self.read_snmp_service(child)?)
                    };
                }
                _ => self.ignore(element, child),
            }
        }

        Ok(service)
    }

    fn read_web_service(&self, element: &XmlElement) -> Result<WebService> {
        let mut web = WebService::default();

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Url => web.url = child.text().unwrap_or_default(),
                Tag::Cgi => web.cgi = child.text(),
                Tag::HttpMethod => web.http_method = child.text(),
                Tag::Arg => web.args.extend(child.text()),
                _ => self.ignore(element, child),
            }
        }

        Ok(web)
    }

    fn read_snmp_service(&self, element: &XmlElement) -> Result<SnmpService> {
        let mut snmp = SnmpService::default();

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Oid => snmp.oid = child.text(),
                Tag::MessageProcessingModel => snmp.message_processing_model = text_int(child)?,
                Tag::SecurityModel => snmp.security_model = text_int(child)?,
                Tag::SecurityName => snmp.security_name = child.text(),
                Tag::SecurityLevel => snmp.security_level = text_int(child)?,
                Tag::ContextName => snmp.context_name = child.text(),
                Tag::ContextEngineId => snmp.context_engine_id = child.text(),
                Tag::Command => snmp.command = child.text(),
                _ => self.ignore(element, child),
            }
        }

        Ok(snmp)
    }

    fn read_file(&self, element: &XmlElement) -> Result<File> {
        trace!("reading file");
        let mut file = File {
            ident: attr_string(element, "ident"),
            category: attr_keyword(element, "category")?,
            fstype: attr_string(element, "fstype"),
            file_type: attr_string(element, "file-type"),
            ..Default::default()
        };

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Name => file.name = child.text().unwrap_or_default(),
                Tag::Path => file.path = child.text().unwrap_or_default(),
                Tag::FileCreateTime => file.create_time = Some(self.read_time(child)?),
                Tag::FileModifyTime => file.modify_time = Some(self.read_time(child)?),
                Tag::FileAccessTime => file.access_time = Some(self.read_time(child)?),
                Tag::DataSize => file.data_size = text_int(child)?,
                Tag::DiskSize => file.disk_size = text_int(child)?,
                Tag::FileAccess => file.file_accesses.push(self.read_file_access(child)?),
                Tag::Linkage => file.linkages.push(self.read_linkage(child)?),
                Tag::Inode => file.inode = Some(self.read_inode(child)?),
                Tag::Checksum => file.checksums.push(self.read_checksum(child)?),
                _ => self.ignore(element, child),
            }
        }

        Ok(file)
    }

    fn read_file_access(&self, element: &XmlElement) -> Result<FileAccess> {
        let mut access = FileAccess::default();

        for (tag, child) in self.children(element) {
            match tag {
                Tag::UserId => access.user_id = self.read_user_id(child)?,
                Tag::Permission => {
                    if let Some(permission) = attr_keyword::<Permission>(child, "perms")? {
                        access.permissions.push(permission);
                    }
                }
                _ => self.ignore(element, child),
            }
        }

        Ok(access)
    }

    fn read_linkage(&self, element: &XmlElement) -> Result<Linkage> {
        let mut linkage = Linkage {
            category: attr_keyword(element, "category")?,
            ..Default::default()
        };

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Name => linkage.name = child.text().unwrap_or_default(),
                Tag::Path => linkage.path = child.text().unwrap_or_default(),
                Tag::File => linkage.file = Some(Box::new(self.read_file(child)?)),
                _ => self.ignore(element, child),
            }
        }

        Ok(linkage)
    }

    fn read_inode(&self, element: &XmlElement) -> Result<Inode> {
        let mut inode = Inode::default();

        for (tag, child) in self.children(element) {
            match tag {
                Tag::ChangeTime => inode.change_time = Some(self.read_time(child)?),
                Tag::Number => inode.number = text_int(child)?,
                Tag::MajorDevice => inode.major_device = text_int(child)?,
                Tag::MinorDevice => inode.minor_device = text_int(child)?,
                Tag::CMajorDevice => inode.c_major_device = text_int(child)?,
                Tag::CMinorDevice => inode.c_minor_device = text_int(child)?,
                _ => self.ignore(element, child),
            }
        }

        Ok(inode)
    }

    fn read_checksum(&self, element: &XmlElement) -> Result<Checksum> {
        let mut checksum = Checksum {
            algorithm: attr_keyword(element, "algorithm")?,
            ..Default::default()
        };

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Value => checksum.value = child.text().unwrap_or_default(),
                Tag::Key => checksum.key = child.text(),
                _ => self.ignore(element, child),
            }
        }

        Ok(checksum)
    }
}
