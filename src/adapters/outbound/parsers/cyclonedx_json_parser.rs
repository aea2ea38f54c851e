use crate::ports::outbound::BomParser;
use crate::shared::error::VexError;
use crate::shared::Result;
use crate::vex_generation::domain::component::NESTED_COMPONENTS_FIELD;
use crate::vex_generation::domain::{BomDocument, Component};
use anyhow::Context;
use serde_json::{Map, Value};

/// CycloneDxJsonParser adapter for the JSON BOM encoding
///
/// Scalar component fields go through the shared component builder; nested
/// objects and arrays are skipped, except `components`, which is flattened.
pub struct CycloneDxJsonParser;

impl CycloneDxJsonParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CycloneDxJsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BomParser for CycloneDxJsonParser {
    fn parse(&self, content: &str) -> Result<BomDocument> {
        let root: Value = serde_json::from_str(content).map_err(|e| VexError::BomParse {
            stage: "JSON document".to_string(),
            details: e.to_string(),
        })?;
        let root = root.as_object().ok_or_else(|| VexError::BomParse {
            stage: "JSON document".to_string(),
            details: "top-level value is not an object".to_string(),
        })?;

        let serial_number = root
            .get("serialNumber")
            .and_then(Value::as_str)
            .map(str::to_string);
        let version = parse_version(root.get("version"))?;

        let metadata = root
            .get("metadata")
            .and_then(Value::as_object)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| VexError::MissingSection {
                section: "metadata".to_string(),
            })?;
        let primary = metadata
            .get("component")
            .and_then(Value::as_object)
            .ok_or_else(|| VexError::MissingSection {
                section: "metadata.component".to_string(),
            })?;
        let primary_component = parse_component(primary, "metadata.component")?;

        let mut components = Vec::new();
        match root.get(NESTED_COMPONENTS_FIELD) {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                collect_components(items, "components", &mut components)?;
            }
            Some(_) => {
                return Err(VexError::BomParse {
                    stage: "components".to_string(),
                    details: "expected an array of components".to_string(),
                }
                .into())
            }
        }

        Ok(BomDocument::new(
            serial_number,
            version,
            primary_component,
            components,
        ))
    }
}

fn parse_version(value: Option<&Value>) -> Result<Option<u32>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .map(Some)
            .ok_or_else(|| {
                VexError::BomParse {
                    stage: "document version".to_string(),
                    details: format!("expected a positive integer, found {}", v),
                }
                .into()
            }),
    }
}

/// Depth-first: each component, then its nested components
fn collect_components(items: &[Value], path: &str, out: &mut Vec<Component>) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        let item_path = format!("{}[{}]", path, index);
        let fields = item.as_object().ok_or_else(|| VexError::BomParse {
            stage: item_path.clone(),
            details: "component is not an object".to_string(),
        })?;

        out.push(parse_component(fields, &item_path)?);

        let nested_path = format!("{}.components", item_path);
        match fields.get(NESTED_COMPONENTS_FIELD) {
            None | Some(Value::Null) => {}
            Some(Value::Array(children)) => collect_components(children, &nested_path, out)?,
            Some(_) => {
                return Err(VexError::BomParse {
                    stage: nested_path,
                    details: "expected an array of components".to_string(),
                }
                .into())
            }
        }
    }
    Ok(())
}

fn parse_component(fields: &Map<String, Value>, path: &str) -> Result<Component> {
    let mut builder = Component::builder();
    for (key, value) in fields {
        let scalar = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        builder = builder
            .field(key, &scalar)
            .with_context(|| format!("Failed to parse CycloneDX BOM component at {}", path))?;
    }
    builder
        .build()
        .with_context(|| format!("Failed to parse CycloneDX BOM component at {}", path))
}
