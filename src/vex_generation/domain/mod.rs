pub mod bom_document;
pub mod component;
pub mod ecosystem;
pub mod purl;
pub mod rating;
pub mod vex_document;
pub mod vulnerability;

pub use bom_document::BomDocument;
pub use component::{Component, ComponentBuilder, ComponentKind};
pub use ecosystem::{EcoSystem, EcoSystemInfo};
pub use purl::Purl;
pub use rating::{CvssScore, Rating, ScoreMethod, Severity};
pub use vex_document::{ToolIdentity, VexDocument};
pub use vulnerability::{
    AffectedStatus, AffectedTarget, Contact, Credits, VersionSpec, Vulnerability,
    VulnerabilityReference, VulnerabilitySource,
};
