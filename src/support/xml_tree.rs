//! Namespace-resolved XML element tree
//!
//! SOAP payloads are small, so the codec reads the whole document into an
//! owned tree first and then walks it with schema-aware code. Every element
//! carries the namespace URI its prefix resolved to, which lets callers match
//! `soap:Body`, `soapenv:Body` and `s:Body` alike.

use std::fmt;

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

/// Error while reading an XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlTreeError(pub String);

impl fmt::Display for XmlTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for XmlTreeError {}

/// One element with its resolved namespace, text content and children.
///
/// Attributes are not kept: nothing in the availability contract uses them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Namespace URI, `None` for unqualified elements
    pub namespace: Option<String>,
    /// Local name (prefix stripped)
    pub name: String,
    /// Concatenated, unescaped text directly inside this element
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn new(namespace: Option<String>, name: String) -> Self {
        Self {
            namespace,
            name,
            ..Default::default()
        }
    }

    /// Parse a complete document and return its root element.
    pub fn parse(xml: &str) -> Result<Self, XmlTreeError> {
        let mut reader = NsReader::from_str(xml);
        reader.trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let (resolved, event) = reader
                .read_resolved_event()
                .map_err(|e| XmlTreeError(e.to_string()))?;
            let namespace = match resolved {
                ResolveResult::Bound(Namespace(ns)) => {
                    Some(String::from_utf8_lossy(ns).into_owned())
                }
                ResolveResult::Unknown(prefix) => {
                    return Err(XmlTreeError(format!(
                        "unbound namespace prefix '{}'",
                        String::from_utf8_lossy(&prefix)
                    )));
                }
                ResolveResult::Unbound => None,
            };

            match event {
                Event::Start(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    stack.push(XmlElement::new(namespace, name));
                }
                Event::Empty(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    attach(&mut stack, &mut root, XmlElement::new(namespace, name))?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| XmlTreeError("unexpected closing tag".into()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(t) => {
                    let text = t.unescape().map_err(|e| XmlTreeError(e.to_string()))?;
                    match stack.last_mut() {
                        Some(top) => top.text.push_str(&text),
                        None => {
                            return Err(XmlTreeError("text outside of the root element".into()))
                        }
                    }
                }
                Event::CData(c) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(XmlTreeError("unexpected end of document".into()));
        }
        root.ok_or_else(|| XmlTreeError("document has no root element".into()))
    }

    /// Whether this element is `{namespace}name`
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    /// First child with the given local name, whatever its namespace
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First child that is exactly `{namespace}name`
    pub fn child_ns(&self, namespace: &str, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is(namespace, name))
    }

    /// All children with the given local name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text content with surrounding whitespace removed
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Text of the named child, if the child exists
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlElement::text)
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlTreeError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(XmlTreeError("multiple root elements".into())),
    }
}
