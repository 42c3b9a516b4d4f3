//! XML support for service management and storage payloads.
//!
//! Responses are read with a quick-xml pull parser into a small element tree
//! keyed by local names, so the `http://schemas.microsoft.com/windowsazure`
//! default namespace (or any prefix) does not matter to the models. Models
//! implement [`FromXml`] against that tree.
//!
//! ```
//! use azure_rest_core::xml::XmlElement;
//!
//! let doc = XmlElement::parse(
//!     br#"<Error xmlns="http://schemas.microsoft.com/windowsazure"><Code>ResourceNotFound</Code></Error>"#,
//! ).unwrap();
//! assert_eq!(doc.name, "Error");
//! assert_eq!(doc.child_text("Code").as_deref(), Some("ResourceNotFound"));
//! ```

use crate::error::{AzureError, AzureResult};
use crate::time;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fmt::Display;
use std::io::Cursor;
use std::str::{self, FromStr};

/// Types that can be built from a parsed XML element.
pub trait FromXml: Sized {
    /// Build `Self` from `element`, which is the element named by the caller.
    fn from_xml(element: &XmlElement) -> AzureResult<Self>;
}

/// A parsed XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Local name (namespace prefix stripped).
    pub name: String,
    /// Attributes as `(local name, unescaped value)`.
    pub attributes: Vec<(String, String)>,
    /// Concatenated text and CDATA content, trimmed.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parse a document and return its root element.
    ///
    /// A leading UTF-8 byte order mark is ignored.
    pub fn parse(body: &[u8]) -> AzureResult<Self> {
        let body = body.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(body);
        let content = str::from_utf8(body)
            .map_err(|e| AzureError::Xml(format!("response is not valid UTF-8: {e}")))?;

        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stack.push(Self::from_start(e)?),
                Ok(Event::Empty(ref e)) => {
                    let element = Self::from_start(e)?;
                    Self::attach(&mut stack, &mut root, element);
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| AzureError::Xml("unbalanced end tag".into()))?;
                    Self::attach(&mut stack, &mut root, element);
                }
                Ok(Event::Text(ref t)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&t.unescape()?);
                    }
                }
                Ok(Event::CData(ref c)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(c));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(AzureError::Xml(format!(
                        "XML error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(AzureError::Xml("document ended inside an element".into()));
        }
        root.ok_or_else(|| AzureError::Xml("document has no root element".into()))
    }

    /// Parse a document whose root element must be named `root`.
    pub fn parse_root(body: &[u8], root: &str) -> AzureResult<Self> {
        let element = Self::parse(body)?;
        if element.name != root {
            return Err(AzureError::Deserialization(format!(
                "expected root element <{root}>, found <{}>",
                element.name
            )));
        }
        Ok(element)
    }

    fn from_start(start: &BytesStart<'_>) -> AzureResult<Self> {
        let name = str::from_utf8(start.local_name().as_ref())
            .map_err(|_| AzureError::Xml("Invalid UTF-8 in tag name".into()))?
            .to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = str::from_utf8(attr.key.local_name().as_ref())
                .map_err(|_| AzureError::Xml("Invalid UTF-8 in attribute name".into()))?
                .to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => *root = Some(element),
        }
    }

    /// Value of the attribute with the given local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the element is marked `nil="true"` (any namespace prefix).
    pub fn is_nil(&self) -> bool {
        self.attribute("nil") == Some("true")
    }

    /// First child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text content, or `None` when the element is empty or nil.
    pub fn value(&self) -> Option<&str> {
        if self.is_nil() || self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    /// Text content of the named child.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).and_then(|c| c.value()).map(str::to_string)
    }

    /// Parse the named child's text with [`FromStr`].
    pub fn child_parse<T>(&self, name: &str) -> AzureResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.child(name).and_then(|c| c.value()) {
            Some(text) => text.parse::<T>().map(Some).map_err(|e| {
                AzureError::Deserialization(format!("invalid value '{text}' for <{name}>: {e}"))
            }),
            None => Ok(None),
        }
    }

    /// Parse the named child as a boolean (`true`/`false`, any case).
    pub fn child_bool(&self, name: &str) -> AzureResult<Option<bool>> {
        match self.child(name).and_then(|c| c.value()) {
            Some(text) if text.eq_ignore_ascii_case("true") => Ok(Some(true)),
            Some(text) if text.eq_ignore_ascii_case("false") => Ok(Some(false)),
            Some(text) => Err(AzureError::Deserialization(format!(
                "invalid boolean '{text}' for <{name}>"
            ))),
            None => Ok(None),
        }
    }

    /// Parse the named child as an ISO-8601 timestamp.
    pub fn child_datetime(&self, name: &str) -> AzureResult<Option<DateTime<Utc>>> {
        self.child(name)
            .and_then(|c| c.value())
            .map(time::parse_iso8601)
            .transpose()
    }

    /// Build a model from every child named `name` inside the child `wrapper`.
    ///
    /// A missing wrapper yields an empty list.
    pub fn child_list<T: FromXml>(&self, wrapper: &str, name: &str) -> AzureResult<Vec<T>> {
        match self.child(wrapper) {
            Some(list) => list.children_named(name).map(T::from_xml).collect(),
            None => Ok(Vec::new()),
        }
    }
}

/// Incremental writer for XML request bodies.
///
/// ```
/// use azure_rest_core::xml::XmlBuilder;
///
/// let mut builder = XmlBuilder::new().unwrap();
/// builder.start("BlockList").unwrap();
/// builder.element("Latest", "AAAA").unwrap();
/// builder.end("BlockList").unwrap();
/// let body = builder.finish().unwrap();
/// assert!(body.ends_with("<BlockList><Latest>AAAA</Latest></BlockList>"));
/// ```
pub struct XmlBuilder {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlBuilder {
    /// Start a document with a UTF-8 XML declaration.
    pub fn new() -> AzureResult<Self> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(|e| AzureError::Xml(e.to_string()))?;
        Ok(Self { writer })
    }

    /// Open an element.
    pub fn start(&mut self, name: &str) -> AzureResult<&mut Self> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(|e| AzureError::Xml(e.to_string()))?;
        Ok(self)
    }

    /// Close an element.
    pub fn end(&mut self, name: &str) -> AzureResult<&mut Self> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(|e| AzureError::Xml(e.to_string()))?;
        Ok(self)
    }

    /// Write `<name>text</name>`, escaping the text.
    pub fn element(&mut self, name: &str, text: &str) -> AzureResult<&mut Self> {
        self.start(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| AzureError::Xml(e.to_string()))?;
        self.end(name)
    }

    /// Finish the document.
    pub fn finish(self) -> AzureResult<String> {
        let bytes = self.writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(|e| AzureError::Xml(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS_DOC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ClientRootCertificates xmlns="http://schemas.microsoft.com/windowsazure" xmlns:i="http://www.w3.org/2001/XMLSchema-instance">
  <ClientRootCertificate>
    <ExpirationTime>2024-01-01T00:00:00Z</ExpirationTime>
    <Subject>CN=Root</Subject>
    <Thumbprint>ABC123</Thumbprint>
  </ClientRootCertificate>
  <ClientRootCertificate>
    <Subject>CN=Other</Subject>
    <Thumbprint i:nil="true"/>
  </ClientRootCertificate>
</ClientRootCertificates>"#;

    #[test]
    fn parses_namespaced_document_by_local_name() {
        let root = XmlElement::parse(NS_DOC.as_bytes()).expect("should parse");

        assert_eq!(root.name, "ClientRootCertificates");
        let certs: Vec<_> = root.children_named("ClientRootCertificate").collect();
        assert_eq!(certs.len(), 2);
        assert_eq!(certs[0].child_text("Subject").as_deref(), Some("CN=Root"));
        assert_eq!(certs[0].child_text("Thumbprint").as_deref(), Some("ABC123"));
    }

    #[test]
    fn nil_and_missing_children_are_unset() {
        let root = XmlElement::parse(NS_DOC.as_bytes()).unwrap();
        let second = root.children_named("ClientRootCertificate").nth(1).unwrap();

        assert!(second.child("Thumbprint").unwrap().is_nil());
        assert_eq!(second.child_text("Thumbprint"), None);
        assert_eq!(second.child_datetime("ExpirationTime").unwrap(), None);
    }

    #[test]
    fn ignores_byte_order_mark() {
        let mut body = b"\xEF\xBB\xBF".to_vec();
        body.extend_from_slice(b"<Root><A>1</A></Root>");

        let root = XmlElement::parse(&body).expect("should parse");
        assert_eq!(root.child_parse::<u32>("A").unwrap(), Some(1));
    }

    #[test]
    fn unescapes_text_and_reads_cdata() {
        let root =
            XmlElement::parse(b"<Root><A>a &amp; b</A><B><![CDATA[<raw>]]></B></Root>").unwrap();

        assert_eq!(root.child_text("A").as_deref(), Some("a & b"));
        assert_eq!(root.child_text("B").as_deref(), Some("<raw>"));
    }

    #[test]
    fn child_parse_reports_bad_values() {
        let root = XmlElement::parse(b"<Root><Count>many</Count></Root>").unwrap();
        let err = root.child_parse::<u64>("Count").unwrap_err();
        assert!(matches!(err, AzureError::Deserialization(_)));
    }

    #[test]
    fn child_bool_is_case_insensitive() {
        let root = XmlElement::parse(b"<Root><A>True</A><B>false</B></Root>").unwrap();
        assert_eq!(root.child_bool("A").unwrap(), Some(true));
        assert_eq!(root.child_bool("B").unwrap(), Some(false));
        assert_eq!(root.child_bool("C").unwrap(), None);
    }

    #[test]
    fn parse_root_rejects_unexpected_root() {
        let err = XmlElement::parse_root(b"<Other/>", "Expected").unwrap_err();
        assert!(matches!(err, AzureError::Deserialization(_)));
    }

    #[test]
    fn malformed_documents_are_errors() {
        assert!(XmlElement::parse(b"").is_err());
        assert!(XmlElement::parse(b"<Root><A></Root>").is_err());
        assert!(XmlElement::parse(b"<Root>").is_err());
    }

    #[test]
    fn builder_escapes_text() {
        let mut builder = XmlBuilder::new().unwrap();
        builder.element("Value", "a<b").unwrap();
        let body = builder.finish().unwrap();

        assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(body.contains("<Value>a&lt;b</Value>"));
    }
}
