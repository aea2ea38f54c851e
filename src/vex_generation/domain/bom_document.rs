use super::component::Component;

/// Canonical view of a parsed CycloneDX BOM
///
/// Owns its components for the duration of a run; nothing downstream mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomDocument {
    serial_number: String,
    version: u32,
    primary_component: Component,
    components: Vec<Component>,
}

impl BomDocument {
    pub fn new(
        serial_number: Option<String>,
        version: Option<u32>,
        primary_component: Component,
        components: Vec<Component>,
    ) -> Self {
        let serial_number = serial_number
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("urn:uuid:{}", uuid::Uuid::new_v4()));

        Self {
            serial_number,
            version: version.unwrap_or(1),
            primary_component,
            components,
        }
    }

    /// Document URN used to scope component references
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// The component described by the BOM's metadata block
    pub fn primary_component(&self) -> &Component {
        &self.primary_component
    }

    /// Components listed by the BOM, nested sub-components flattened in document order
    pub fn components(&self) -> &[Component] {
        &self.components
    }
}
