//! BioSample attribute-package schema loading.
//!
//! The package document lists `Attribute` elements, each with a `use`
//! attribute (`mandatory` or `optional`) and a `HarmonizedName` child giving
//! the field name used in submissions:
//!
//! ```xml
//! <BioSampleAttributes>
//!   <Attribute use="mandatory" group_name="Source">
//!     <Name>collection date</Name>
//!     <HarmonizedName>collection_date</HarmonizedName>
//!   </Attribute>
//! </BioSampleAttributes>
//! ```

use std::borrow::Cow;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};
use tracing::debug;

use seqsub_model::FieldRequirements;

use crate::error::StandardsError;

/// Field name recorded for an attribute without a `HarmonizedName`.
pub const UNKNOWN_FIELD: &str = "Unknown";

#[derive(Debug)]
struct AttributeDecl {
    usage: Option<String>,
    name: Option<String>,
    depth: usize,
}

impl AttributeDecl {
    fn record(self, requirements: &mut FieldRequirements) {
        let name = self
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string());
        match self.usage.as_deref() {
            Some("mandatory") => requirements.push_mandatory(name),
            Some("optional") => requirements.push_optional(name),
            _ => {}
        }
    }
}

fn decode(raw: &[u8]) -> Result<String, StandardsError> {
    let text = String::from_utf8_lossy(raw);
    let value = unescape(&text).map_err(|e| StandardsError::malformed(e.to_string()))?;
    Ok(match value {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    })
}

/// Text of an entity reference such as `&amp;` or `&#38;`.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, StandardsError> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| StandardsError::malformed(e.to_string()))?
    {
        return Ok(ch.to_string());
    }
    let name = String::from_utf8_lossy(reference);
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| StandardsError::malformed(format!("unknown entity `&{name};`")))
}

fn attribute_value(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, StandardsError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| StandardsError::malformed(e.to_string()))?;
        if attr.key.local_name().as_ref() == key {
            return decode(&attr.value).map(Some);
        }
    }
    Ok(None)
}

/// Parses a BioSample package document into mandatory and optional fields.
///
/// Attributes are collected at any depth, in document order.
pub fn parse_biosample_requirements(xml: &str) -> Result<FieldRequirements, StandardsError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut requirements = FieldRequirements::default();
    let mut current: Option<AttributeDecl> = None;
    let mut in_harmonized = false;
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => {
                depth += 1;
                saw_root = true;
                match element.local_name().as_ref() {
                    b"Attribute" => {
                        if let Some(open) = current.take() {
                            open.record(&mut requirements);
                        }
                        current = Some(AttributeDecl {
                            usage: attribute_value(&element, b"use")?,
                            name: None,
                            depth,
                        });
                    }
                    b"HarmonizedName" => {
                        in_harmonized = current
                            .as_ref()
                            .is_some_and(|decl| decl.depth + 1 == depth);
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(element)) => {
                saw_root = true;
                if element.local_name().as_ref() == b"Attribute" {
                    AttributeDecl {
                        usage: attribute_value(&element, b"use")?,
                        name: None,
                        depth: depth + 1,
                    }
                    .record(&mut requirements);
                }
            }
            Ok(Event::Text(text)) => {
                if in_harmonized && let Some(decl) = current.as_mut() {
                    let chunk = decode(&text)?;
                    decl.name.get_or_insert_with(String::new).push_str(&chunk);
                }
            }
            Ok(Event::GeneralRef(reference)) => {
                if in_harmonized && let Some(decl) = current.as_mut() {
                    let chunk = resolve_reference(&reference)?;
                    decl.name.get_or_insert_with(String::new).push_str(&chunk);
                }
            }
            Ok(Event::CData(data)) => {
                if in_harmonized && let Some(decl) = current.as_mut() {
                    let chunk = String::from_utf8_lossy(&data);
                    decl.name.get_or_insert_with(String::new).push_str(&chunk);
                }
            }
            Ok(Event::End(element)) => {
                match element.local_name().as_ref() {
                    b"HarmonizedName" => in_harmonized = false,
                    b"Attribute" => {
                        if current.as_ref().is_some_and(|decl| decl.depth == depth)
                            && let Some(decl) = current.take()
                        {
                            decl.record(&mut requirements);
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(StandardsError::malformed(e.to_string())),
        }
    }

    if !saw_root {
        return Err(StandardsError::malformed("document has no root element"));
    }
    if depth != 0 {
        return Err(StandardsError::malformed(format!(
            "{depth} element(s) left unclosed at end of document"
        )));
    }
    debug!(
        mandatory = requirements.mandatory().len(),
        optional = requirements.optional().len(),
        "parsed BioSample attribute package"
    );
    Ok(requirements)
}

/// Loads a BioSample package document from disk.
pub fn load_biosample_requirements(path: &Path) -> Result<FieldRequirements, StandardsError> {
    let xml = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    parse_biosample_requirements(&xml).map_err(|e| e.at(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_harmonized_name_is_ignored() {
        let xml = r#"<Package><Attribute use="optional">
            <Note><HarmonizedName>not_this</HarmonizedName></Note>
        </Attribute></Package>"#;
        let requirements = parse_biosample_requirements(xml).unwrap();
        assert_eq!(requirements.optional(), &[UNKNOWN_FIELD]);
    }

    #[test]
    fn test_self_closing_attribute_is_unknown() {
        let xml = r#"<Package><Attribute use="mandatory"/></Package>"#;
        let requirements = parse_biosample_requirements(xml).unwrap();
        assert_eq!(requirements.mandatory(), &[UNKNOWN_FIELD]);
    }

    #[test]
    fn test_escaped_text_is_unescaped() {
        let xml = r#"<P><Attribute use="optional"><HarmonizedName>a&amp;b</HarmonizedName></Attribute></P>"#;
        let requirements = parse_biosample_requirements(xml).unwrap();
        assert_eq!(requirements.optional(), &["a&b"]);
    }

    #[test]
    fn test_character_reference_is_resolved() {
        let xml = r#"<P><Attribute use="mandatory"><HarmonizedName>host&#95;age</HarmonizedName></Attribute></P>"#;
        let requirements = parse_biosample_requirements(xml).unwrap();
        assert_eq!(requirements.mandatory(), &["host_age"]);
    }

    #[test]
    fn test_cdata_name_is_kept() {
        let xml = r#"<P><Attribute use="optional"><HarmonizedName><![CDATA[lat_lon]]></HarmonizedName></Attribute></P>"#;
        let requirements = parse_biosample_requirements(xml).unwrap();
        assert_eq!(requirements.optional(), &["lat_lon"]);
    }

    #[test]
    fn test_unknown_entity_is_malformed() {
        let xml = r#"<P><Attribute use="optional"><HarmonizedName>a&bogus;b</HarmonizedName></Attribute></P>"#;
        assert!(parse_biosample_requirements(xml).is_err());
    }
}
