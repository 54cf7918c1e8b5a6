//! Minimal XML tree.
//!
//! Inbound responses are read into a small owned tree (elements, attributes,
//! text) so that the parser can look nodes up by name instead of by position.
//! Name matching is on the local part and ignores ASCII case, which keeps
//! lookups independent of the namespace prefixes chosen by the IdP.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{SamlError, SamlResult};

/// Maximum element nesting accepted by [`XmlElement::parse`].
///
/// Lookups and drops recurse over the tree, so depth must stay bounded for
/// untrusted input. Real ADFS responses nest fewer than ten levels.
pub const MAX_DEPTH: usize = 256;

/// A node in the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// A child element.
    Element(XmlElement),
    /// Character data (text or CDATA), already unescaped.
    Text(String),
}

/// An XML element with its attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

/// Returns the part of a qualified name after the namespace prefix.
fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

impl XmlElement {
    /// Parses a document and returns its root element.
    ///
    /// Whitespace-only text is dropped; comments, processing instructions and
    /// the XML declaration are skipped. Documents nested deeper than
    /// [`MAX_DEPTH`] are rejected.
    pub fn parse(xml: &str) -> SamlResult<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Self> = Vec::new();
        let mut root: Option<Self> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    if stack.len() >= MAX_DEPTH {
                        return Err(too_deep());
                    }
                    stack.push(Self::from_start(&e)?);
                }
                Event::Empty(e) => {
                    if stack.len() >= MAX_DEPTH {
                        return Err(too_deep());
                    }
                    let element = Self::from_start(&e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        SamlError::XmlParse("unexpected closing tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(e) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::Text(e.unescape()?.into_owned()));
                    }
                }
                Event::CData(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8(e.into_inner().into_owned())
                            .map_err(|e| SamlError::XmlParse(format!("invalid CDATA: {e}")))?;
                        parent.children.push(XmlNode::Text(text));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(SamlError::XmlParse(format!(
                "element '{}' is not closed",
                open.name
            )));
        }

        root.ok_or_else(|| SamlError::XmlParse("document has no root element".to_string()))
    }

    fn from_start(start: &BytesStart<'_>) -> SamlResult<Self> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| SamlError::XmlParse(format!("invalid element name: {e}")))?
            .to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| SamlError::XmlParse(e.to_string()))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| SamlError::XmlParse(format!("invalid attribute name: {e}")))?
                .to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Returns the qualified element name as written in the document.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the element name without its namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Returns true if the local name matches, ignoring ASCII case.
    #[must_use]
    pub fn is_named(&self, local_name: &str) -> bool {
        self.local_name().eq_ignore_ascii_case(local_name)
    }

    /// Looks up an attribute value by local name, ignoring ASCII case.
    #[must_use]
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| local_part(key).eq_ignore_ascii_case(local_name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns all child nodes in document order.
    #[must_use]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Iterates over child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Returns the first child element with the given local name.
    #[must_use]
    pub fn child(&self, local_name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|e| e.is_named(local_name))
    }

    /// Returns every child element with the given local name.
    pub fn children_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.child_elements().filter(move |e| e.is_named(local_name))
    }

    /// Collects every descendant element with the given local name in
    /// document order. The element itself is not included.
    #[must_use]
    pub fn descendants_named(&self, local_name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        self.collect_named(local_name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, local_name: &str, found: &mut Vec<&'a XmlElement>) {
        for child in self.child_elements() {
            if child.is_named(local_name) {
                found.push(child);
            }
            child.collect_named(local_name, found);
        }
    }

    /// Returns the concatenated direct text content of this element.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }
}

fn too_deep() -> SamlError {
    SamlError::XmlParse(format!("element nesting exceeds {MAX_DEPTH} levels"))
}

/// Attaches a finished element to its parent, or makes it the root.
fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> SamlResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(SamlError::XmlParse(
            "document has more than one root element".to_string(),
        ));
    }
    *root = Some(element);
    Ok(())
}
