//! Reads a document into an [`XmlElement`] tree.
//!
//! The reader refuses anything that could make it reach outside the document:
//! a `DOCTYPE` declaration is an error, and so is any entity reference other than
//! the five predefined ones and character references. Nesting deeper than the
//! configured limit is an error as well, which bounds every recursive walk done
//! on the tree afterwards.

use log::trace;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::err::{IdmefError, Result};
use crate::model::xml::XmlElement;

pub(crate) fn read_document(xml: &str, max_depth: usize) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| IdmefError::xml(reader.error_position() as u64, e))?;

        match event {
            Event::Start(start) => {
                if stack.len() >= max_depth {
                    return Err(IdmefError::DepthLimitExceeded { limit: max_depth });
                }
                let element = open_element(&start, position)?;
                ensure_single_root(&root, &element, position)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                if stack.len() >= max_depth {
                    return Err(IdmefError::DepthLimitExceeded { limit: max_depth });
                }
                let element = open_element(&start, position)?;
                ensure_single_root(&root, &element, position)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| IdmefError::Xml {
                    position,
                    message: "closing tag without a matching opening tag".to_owned(),
                })?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| IdmefError::xml(position, e))?;
                match stack.last_mut() {
                    Some(parent) => parent.push_text(text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(IdmefError::Xml {
                            position,
                            message: "text outside of the root element".to_owned(),
                        });
                    }
                }
            }
            Event::CData(data) => {
                let text = String::from_utf8(data.into_inner().into_owned())
                    .map_err(|e| IdmefError::xml(position, e))?;
                match stack.last_mut() {
                    Some(parent) => parent.push_text(text),
                    None => {
                        return Err(IdmefError::Xml {
                            position,
                            message: "CDATA outside of the root element".to_owned(),
                        });
                    }
                }
            }
            Event::DocType(_) => {
                return Err(IdmefError::DoctypeForbidden { position });
            }
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) => {
                trace!("skipping prolog/comment event at {}", position);
            }
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(IdmefError::Xml {
            position: xml.len() as u64,
            message: format!("element `{}` is never closed", open.name),
        });
    }

    root.ok_or_else(|| IdmefError::Xml {
        position: 0,
        message: "document has no root element".to_owned(),
    })
}

fn open_element(start: &BytesStart<'_>, position: u64) -> Result<XmlElement> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| IdmefError::xml(position, e))?
        .to_owned();

    let mut element = XmlElement::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| IdmefError::xml(position, e))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|e| IdmefError::xml(position, e))?
            .to_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| IdmefError::xml(position, e))?;
        element.set_attribute(key, value);
    }

    Ok(element)
}

fn ensure_single_root(
    root: &Option<XmlElement>,
    element: &XmlElement,
    position: u64,
) -> Result<()> {
    if root.is_some() {
        return Err(IdmefError::Xml {
            position,
            message: format!("second root element `{}`", element.name),
        });
    }
    Ok(())
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.push_element(element),
        None => *root = Some(element),
    }
}
