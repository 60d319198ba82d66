//! Minimal element tree built on top of the quick-xml event reader.
//!
//! Only elements and attributes are kept; text, comments and processing
//! instructions carry nothing the converter needs.

use miette::SourceSpan;
use quick_xml::{Reader, events::BytesStart, events::Event};

use crate::error::{Result, SourceContext};

/// An XML element with its attributes and child elements.
#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Byte range of the opening tag.
    pub span: SourceSpan,
}

impl Element {
    /// Value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute interpreted as a boolean flag (`"true"`).
    pub fn flag(&self, name: &str) -> bool {
        self.attr(name) == Some("true")
    }

    /// Child elements with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Parse a document into its root element.
pub(crate) fn parse_document(ctx: &SourceContext) -> Result<Element> {
    let mut reader = Reader::from_str(ctx.src());
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let start = reader.buffer_position() as usize;
        let event = reader
            .read_event()
            .map_err(|e| ctx.xml_error(e, reader.error_position() as usize))?;
        let end = reader.buffer_position() as usize;

        match event {
            Event::Start(tag) => {
                let element = element(ctx, &reader, &tag, start, end)?;
                stack.push(element);
            }
            Event::Empty(tag) => {
                let element = element(ctx, &reader, &tag, start, end)?;
                attach(ctx, &mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                // quick-xml verifies that end tags match their start tags
                if let Some(element) = stack.pop() {
                    attach(ctx, &mut stack, &mut root, element)?;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ctx.structure_error(
            format!("unclosed element <{}>", open.name),
            Some(open.span),
        ));
    }

    root.ok_or_else(|| ctx.structure_error("document has no root element", None))
}

fn element(
    ctx: &SourceContext,
    reader: &Reader<&[u8]>,
    tag: &BytesStart<'_>,
    start: usize,
    end: usize,
) -> Result<Element> {
    let span = SourceSpan::from((start, end.saturating_sub(start)));
    let name = String::from_utf8_lossy(tag.local_name().as_ref()).into_owned();

    let mut attrs = Vec::new();
    for attr in tag.attributes() {
        let attr = attr.map_err(|e| ctx.attribute_error(e.to_string(), span))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .map_err(|e| ctx.attribute_error(format!("{}: {}", key, e), span))?;
        attrs.push((key, value.into_owned()));
    }

    Ok(Element {
        name,
        attrs,
        children: Vec::new(),
        span,
    })
}

fn attach(
    ctx: &SourceContext,
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(ctx.structure_error(
                format!("unexpected second root element <{}>", element.name),
                Some(element.span),
            ));
        }
    }
    Ok(())
}
