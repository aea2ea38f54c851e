use crate::shared::error::VexError;
use crate::shared::Result;
use packageurl::PackageUrl;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Structured package URL
///
/// Parsing is delegated to `packageurl`; the canonical string it renders is
/// kept alongside the parts so the purl can be written back out verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Purl {
    ty: String,
    namespace: Option<String>,
    name: String,
    version: Option<String>,
    qualifiers: BTreeMap<String, String>,
    subpath: Option<String>,
    canonical: String,
}

impl Purl {
    pub fn parse(value: &str) -> Result<Self> {
        let package_url = PackageUrl::from_str(value).map_err(|e| VexError::InvalidPurl {
            purl: value.to_string(),
            details: e.to_string(),
        })?;
        Ok(package_url.into())
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn qualifiers(&self) -> &BTreeMap<String, String> {
        &self.qualifiers
    }

    pub fn subpath(&self) -> Option<&str> {
        self.subpath.as_deref()
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Same package, ignoring version, qualifiers and subpath
    pub fn same_package(&self, other: &Purl) -> bool {
        self.ty.eq_ignore_ascii_case(&other.ty)
            && self.namespace == other.namespace
            && self.name == other.name
    }
}

impl From<PackageUrl<'_>> for Purl {
    fn from(value: PackageUrl<'_>) -> Self {
        Self {
            ty: value.ty().to_string(),
            namespace: value.namespace().map(|inner| inner.to_string()),
            name: value.name().to_string(),
            version: value.version().map(|inner| inner.to_string()),
            qualifiers: value
                .qualifiers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            subpath: value.subpath().map(|inner| inner.to_string()),
            canonical: value.to_string(),
        }
    }
}

impl FromStr for Purl {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for Purl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical)
    }
}
