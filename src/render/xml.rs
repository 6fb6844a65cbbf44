//! Conversion of submitted form data into the XML document the forms
//! service merges into its template.
//!
//! Object keys become element names, scalars become text content and
//! arrays repeat their parent element once per item. The output has no
//! XML declaration and is indented with four spaces.

use crate::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::{Map, Value};

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub content: XmlContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlContent {
    Empty,
    Text(String),
    Children(Vec<XmlElement>),
}

/// Builds the element tree for a JSON object. Every top-level key yields
/// one root element (or several, when its value is an array).
pub fn build_tree(value: &Value) -> Result<Vec<XmlElement>> {
    match value {
        Value::Object(map) => elements_from_map(map),
        other => Err(Error::xml(format!(
            "form data must be an object, got {}",
            json_kind(other)
        ))),
    }
}

fn elements_from_map(map: &Map<String, Value>) -> Result<Vec<XmlElement>> {
    let mut elements = Vec::with_capacity(map.len());
    for (key, value) in map {
        push_elements(key, value, &mut elements)?;
    }
    Ok(elements)
}

fn push_elements(name: &str, value: &Value, out: &mut Vec<XmlElement>) -> Result<()> {
    if !is_valid_name(name) {
        return Err(Error::xml(format!("'{}' is not a valid element name", name)));
    }

    let content = match value {
        Value::Null => XmlContent::Empty,
        Value::Bool(b) => XmlContent::Text(b.to_string()),
        Value::Number(n) => XmlContent::Text(n.to_string()),
        Value::String(s) => {
            if let Some(c) = s.chars().find(|c| !is_xml_char(*c)) {
                return Err(Error::xml(format!(
                    "'{}' contains a character not allowed in XML (U+{:04X})",
                    name, c as u32
                )));
            }
            XmlContent::Text(s.clone())
        }
        Value::Array(items) => {
            for item in items {
                push_elements(name, item, out)?;
            }
            return Ok(());
        }
        Value::Object(map) if map.is_empty() => XmlContent::Empty,
        Value::Object(map) => XmlContent::Children(elements_from_map(map)?),
    };

    out.push(XmlElement {
        name: name.to_string(),
        content,
    });
    Ok(())
}

/// Serializes an element tree. Deterministic for a given tree.
pub fn serialize(elements: &[XmlElement]) -> String {
    let mut out = String::new();
    for element in elements {
        write_element(element, 0, &mut out);
    }
    // no trailing newline after the last root
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

fn write_element(element: &XmlElement, depth: usize, out: &mut String) {
    let indent = INDENT.repeat(depth);
    match &element.content {
        XmlContent::Empty => {
            out.push_str(&format!("{}<{}/>\n", indent, element.name));
        }
        XmlContent::Text(text) => {
            out.push_str(&format!(
                "{}<{}>{}</{}>\n",
                indent,
                element.name,
                escape_text(text),
                element.name
            ));
        }
        XmlContent::Children(children) => {
            out.push_str(&format!("{}<{}>\n", indent, element.name));
            for child in children {
                write_element(child, depth + 1, out);
            }
            out.push_str(&format!("{}</{}>\n", indent, element.name));
        }
    }
}

/// Converts form data to an XML string. An empty result is an error.
pub fn to_xml(form_data: &Value) -> Result<String> {
    let xml = serialize(&build_tree(form_data)?);
    if xml.is_empty() {
        return Err(Error::xml("conversion produced no output"));
    }
    Ok(xml)
}

/// Converts form data to XML and base64-encodes the UTF-8 bytes, as the
/// render endpoint expects in `xmlData`.
pub fn to_base64_xml(form_data: &Value) -> Result<String> {
    let xml = to_xml(form_data)?;
    Ok(STANDARD.encode(xml.as_bytes()))
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Characters permitted by the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || matches!(c, '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
