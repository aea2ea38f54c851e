use crate::ports::outbound::BomParser;
use crate::shared::error::VexError;
use crate::shared::Result;
use crate::vex_generation::domain::component::NESTED_COMPONENTS_FIELD;
use crate::vex_generation::domain::{BomDocument, Component};
use anyhow::Context;
use roxmltree::{Document, Node};

const ROOT_ELEMENT: &str = "bom";

/// CycloneDxXmlParser adapter for the XML BOM encoding
///
/// Element names are matched on their local name, so any CycloneDX schema
/// namespace is accepted. A component's attributes and its text-only child
/// elements are fed to the shared component builder.
pub struct CycloneDxXmlParser;

impl CycloneDxXmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CycloneDxXmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BomParser for CycloneDxXmlParser {
    fn parse(&self, content: &str) -> Result<BomDocument> {
        let doc = Document::parse(content).map_err(|e| VexError::BomParse {
            stage: "XML document".to_string(),
            details: e.to_string(),
        })?;

        let root = doc.root_element();
        if !root.has_tag_name(ROOT_ELEMENT) {
            return Err(VexError::BomParse {
                stage: "root element".to_string(),
                details: format!(
                    "expected <{}>, found <{}>",
                    ROOT_ELEMENT,
                    root.tag_name().name()
                ),
            }
            .into());
        }

        let serial_number = root.attribute("serialNumber").map(str::to_string);
        let version = match root.attribute("version") {
            None => None,
            Some(v) => Some(
                v.trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| VexError::BomParse {
                        stage: "document version".to_string(),
                        details: format!("expected a positive integer, found '{}'", v),
                    })?,
            ),
        };

        let metadata = child(root, "metadata")
            .filter(|m| m.children().any(|c| c.is_element()))
            .ok_or_else(|| VexError::MissingSection {
                section: "metadata".to_string(),
            })?;
        let primary = child(metadata, "component").ok_or_else(|| VexError::MissingSection {
            section: "metadata.component".to_string(),
        })?;
        let primary_component = parse_component(primary, "metadata.component")?;

        let mut components = Vec::new();
        if let Some(list) = child(root, NESTED_COMPONENTS_FIELD) {
            collect_components(list, "components", &mut components)?;
        }

        Ok(BomDocument::new(
            serial_number,
            version,
            primary_component,
            components,
        ))
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(name))
}

/// Depth-first: each `<component>`, then its nested `<components>`
fn collect_components(list: Node, path: &str, out: &mut Vec<Component>) -> Result<()> {
    for (index, node) in list
        .children()
        .filter(|c| c.has_tag_name("component"))
        .enumerate()
    {
        let item_path = format!("{}[{}]", path, index);
        out.push(parse_component(node, &item_path)?);

        if let Some(children) = child(node, NESTED_COMPONENTS_FIELD) {
            collect_components(children, &format!("{}.components", item_path), out)?;
        }
    }
    Ok(())
}

fn parse_component(node: Node, path: &str) -> Result<Component> {
    let context = || format!("Failed to parse CycloneDX BOM component at {}", path);
    let mut builder = Component::builder();

    for attribute in node.attributes() {
        builder = builder
            .field(attribute.name(), attribute.value())
            .with_context(context)?;
    }

    for element in node.children().filter(|c| c.is_element()) {
        if !is_scalar(element) {
            continue;
        }
        builder = builder
            .field(element.tag_name().name(), &text_content(element))
            .with_context(context)?;
    }

    builder.build().with_context(context)
}

/// Text-only child element: no attributes, no element children
fn is_scalar(element: Node) -> bool {
    element.tag_name().name() != NESTED_COMPONENTS_FIELD
        && element.attributes().next().is_none()
        && !element.children().any(|c| c.is_element())
}

/// All text nodes of `element`, concatenated; comments split text nodes
fn text_content(element: Node) -> String {
    element
        .children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect()
}
