//! A small owned element tree.
//!
//! The reader builds it from a document and the message parser walks it; the
//! message serializer builds one and the emitter writes it out. Namespaces are not
//! resolved, names are compared exactly as written.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        XmlElement {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The trimmed value of an attribute; an empty value counts as absent.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    pub fn first_element(&self) -> Option<&XmlElement> {
        self.elements().next()
    }

    /// All descendant text, concatenated in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }

    /// The trimmed text content; an empty text counts as absent.
    pub fn text(&self) -> Option<String> {
        let text = self.text_content();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == text.len() {
            Some(text)
        } else {
            Some(trimmed.to_owned())
        }
    }

    pub fn has_element_children(&self) -> bool {
        self.elements().next().is_some()
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(XmlAttribute { name, value }),
        }
    }

    pub fn push_element(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlNode::Text(text.into()));
    }

    /// Nesting depth of the tree, counting this element as one.
    pub fn depth(&self) -> usize {
        1 + self.elements().map(XmlElement::depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> XmlElement {
        let mut name = XmlElement::new("name");
        name.push_text("  host  ");

        let mut node = XmlElement::new("Node");
        node.set_attribute("category", "dns");
        node.set_attribute("ident", "  ");
        node.push_text("\n  ");
        node.push_element(name);
        node
    }

    #[test]
    fn test_attributes_are_trimmed_and_empty_is_absent() {
        let node = sample();
        assert_eq!(node.attribute("category"), Some("dns"));
        assert_eq!(node.attribute("ident"), None);
        assert_eq!(node.attribute("missing"), None);
    }

    #[test]
    fn test_text_content_is_trimmed() {
        let node = sample();
        assert_eq!(node.first_element().and_then(XmlElement::text), Some("host".to_owned()));
        assert_eq!(node.text_content(), "\n    host  ");
        assert_eq!(XmlElement::new("empty").text(), None);
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut node = sample();
        node.set_attribute("category", "nis");
        assert_eq!(node.attribute("category"), Some("nis"));
        assert_eq!(node.attributes.len(), 2);
    }

    #[test]
    fn test_depth() {
        assert_eq!(sample().depth(), 2);
        assert_eq!(XmlElement::new("leaf").depth(), 1);
    }
}
