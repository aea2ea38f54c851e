use super::purl::Purl;
use crate::shared::Result;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Maximum length for component names (security limit)
const MAX_COMPONENT_NAME_LENGTH: usize = 1024;

/// Declared kind of a component (`type` on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentKind {
    Application,
    Framework,
    #[default]
    Library,
    Container,
    Platform,
    OperatingSystem,
    Device,
    DeviceDriver,
    Firmware,
    File,
    MachineLearningModel,
    Data,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Application => "application",
            ComponentKind::Framework => "framework",
            ComponentKind::Library => "library",
            ComponentKind::Container => "container",
            ComponentKind::Platform => "platform",
            ComponentKind::OperatingSystem => "operating-system",
            ComponentKind::Device => "device",
            ComponentKind::DeviceDriver => "device-driver",
            ComponentKind::Firmware => "firmware",
            ComponentKind::File => "file",
            ComponentKind::MachineLearningModel => "machine-learning-model",
            ComponentKind::Data => "data",
        }
    }
}

impl std::str::FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "application" => Ok(ComponentKind::Application),
            "framework" => Ok(ComponentKind::Framework),
            "library" => Ok(ComponentKind::Library),
            "container" => Ok(ComponentKind::Container),
            "platform" => Ok(ComponentKind::Platform),
            "operating-system" => Ok(ComponentKind::OperatingSystem),
            "device" => Ok(ComponentKind::Device),
            "device-driver" => Ok(ComponentKind::DeviceDriver),
            "firmware" => Ok(ComponentKind::Firmware),
            "file" => Ok(ComponentKind::File),
            "machine-learning-model" => Ok(ComponentKind::MachineLearningModel),
            "data" => Ok(ComponentKind::Data),
            _ => Err(format!("Unknown component type: {}", s)),
        }
    }
}

/// Wire fields the core never interprets
pub const IGNORED_WIRE_FIELDS: [&str; 3] = ["externalReferences", "hashes", "licenses"];

/// Wire field holding nested sub-components
pub const NESTED_COMPONENTS_FIELD: &str = "components";

const FIELD_RENAMES: [(&str, &str); 3] = [
    ("type", "kind"),
    ("bom-ref", "bom_ref"),
    ("mime-type", "mime_type"),
];

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try",
    "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Maps a wire field name to the model attribute it populates.
///
/// Wire-compatibility shim only: a fixed rename table first, then `-` becomes
/// `_` and any name still colliding with a Rust keyword gets a trailing `_`.
/// The mapping carries no business meaning.
pub fn model_field_name(wire_name: &str) -> Cow<'_, str> {
    if let Some((_, renamed)) = FIELD_RENAMES.iter().find(|(wire, _)| *wire == wire_name) {
        return Cow::Borrowed(*renamed);
    }

    let mut name = if wire_name.contains('-') {
        Cow::Owned(wire_name.replace('-', "_"))
    } else {
        Cow::Borrowed(wire_name)
    };

    if RUST_KEYWORDS.contains(&&*name) {
        name = Cow::Owned(format!("{}_", name));
    }

    name
}

/// A software package referenced by the input BOM
///
/// Built once by a BOM parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    kind: ComponentKind,
    bom_ref: Option<String>,
    mime_type: Option<String>,
    group: Option<String>,
    name: String,
    version: Option<String>,
    description: Option<String>,
    author: Option<String>,
    publisher: Option<String>,
    scope: Option<String>,
    copyright: Option<String>,
    cpe: Option<String>,
    purl: Option<Purl>,
    extra: BTreeMap<String, String>,
}

impl Component {
    pub fn builder() -> ComponentBuilder {
        ComponentBuilder::default()
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn bom_ref(&self) -> Option<&str> {
        self.bom_ref.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    pub fn cpe(&self) -> Option<&str> {
        self.cpe.as_deref()
    }

    pub fn purl(&self) -> Option<&Purl> {
        self.purl.as_ref()
    }

    /// Scalar wire fields the model has no dedicated attribute for
    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    /// Stable reference for this component within its BOM:
    /// the `bom-ref`, else the purl, else `name@version`.
    pub fn reference(&self) -> String {
        if let Some(bom_ref) = &self.bom_ref {
            return bom_ref.clone();
        }
        if let Some(purl) = &self.purl {
            return purl.to_string();
        }
        match &self.version {
            Some(version) => format!("{}@{}", self.name, version),
            None => self.name.clone(),
        }
    }
}

/// Accumulates wire fields for one component
///
/// Both BOM encodings feed fields through [`ComponentBuilder::field`], which is
/// what keeps their canonical output identical.
#[derive(Debug, Default)]
pub struct ComponentBuilder {
    kind: Option<ComponentKind>,
    bom_ref: Option<String>,
    mime_type: Option<String>,
    group: Option<String>,
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    author: Option<String>,
    publisher: Option<String>,
    scope: Option<String>,
    copyright: Option<String>,
    cpe: Option<String>,
    purl: Option<Purl>,
    extra: BTreeMap<String, String>,
}

impl ComponentBuilder {
    /// Applies one scalar wire field.
    ///
    /// # Errors
    /// Returns an error for an unknown component type or a non-empty value
    /// in `purl` that is not a valid package URL.
    pub fn field(mut self, wire_name: &str, value: &str) -> Result<Self> {
        if IGNORED_WIRE_FIELDS.contains(&wire_name) {
            return Ok(self);
        }

        let value = value.trim();
        match &*model_field_name(wire_name) {
            "kind" => {
                let kind = value.parse::<ComponentKind>().map_err(anyhow::Error::msg)?;
                self.kind = Some(kind);
            }
            "purl" => {
                self.purl = if value.is_empty() {
                    None
                } else {
                    Some(Purl::parse(value)?)
                };
            }
            "bom_ref" => self.bom_ref = non_empty(value),
            "mime_type" => self.mime_type = non_empty(value),
            "group" => self.group = non_empty(value),
            "name" => self.name = non_empty(value),
            "version" => self.version = non_empty(value),
            "description" => self.description = non_empty(value),
            "author" => self.author = non_empty(value),
            "publisher" => self.publisher = non_empty(value),
            "scope" => self.scope = non_empty(value),
            "copyright" => self.copyright = non_empty(value),
            "cpe" => self.cpe = non_empty(value),
            other => {
                self.extra.insert(other.to_string(), value.to_string());
            }
        }

        Ok(self)
    }

    pub fn kind(mut self, kind: ComponentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn bom_ref(mut self, bom_ref: impl Into<String>) -> Self {
        self.bom_ref = Some(bom_ref.into());
        self
    }

    pub fn purl(mut self, purl: Purl) -> Self {
        self.purl = Some(purl);
        self
    }

    pub fn build(self) -> Result<Component> {
        let name = self
            .name
            .ok_or_else(|| anyhow::anyhow!("Component is missing the required 'name' field"))?;

        if name.len() > MAX_COMPONENT_NAME_LENGTH {
            anyhow::bail!(
                "Component name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_COMPONENT_NAME_LENGTH
            );
        }

        Ok(Component {
            kind: self.kind.unwrap_or_default(),
            bom_ref: self.bom_ref,
            mime_type: self.mime_type,
            group: self.group,
            name,
            version: self.version,
            description: self.description,
            author: self.author,
            publisher: self.publisher,
            scope: self.scope,
            copyright: self.copyright,
            cpe: self.cpe,
            purl: self.purl,
            extra: self.extra,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
