/// Static description of a package ecosystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcoSystemInfo {
    pub name: &'static str,
    pub purl_type: &'static str,
    pub description: &'static str,
}

/// Package ecosystems a vulnerability source can claim coverage for
///
/// The set is closed: every variant maps to exactly one purl type and one
/// description, so looking one up can never fail at runtime.
/// See <https://github.com/package-url/purl-spec/blob/master/PURL-TYPES.rst>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EcoSystem {
    Cargo,
    CocoaPods,
    Composer,
    Conan,
    Conda,
    Cran,
    Debian,
    Go,
    Maven,
    Npm,
    NuGet,
    PyPi,
    Rpm,
    RubyGems,
    Swift,
}

impl EcoSystem {
    pub const ALL: [EcoSystem; 15] = [
        EcoSystem::Cargo,
        EcoSystem::CocoaPods,
        EcoSystem::Composer,
        EcoSystem::Conan,
        EcoSystem::Conda,
        EcoSystem::Cran,
        EcoSystem::Debian,
        EcoSystem::Go,
        EcoSystem::Maven,
        EcoSystem::Npm,
        EcoSystem::NuGet,
        EcoSystem::PyPi,
        EcoSystem::Rpm,
        EcoSystem::RubyGems,
        EcoSystem::Swift,
    ];

    pub const fn info(self) -> EcoSystemInfo {
        match self {
            EcoSystem::Cargo => EcoSystemInfo {
                name: "Cargo",
                purl_type: "cargo",
                description: "The Rust community's crate registry",
            },
            EcoSystem::CocoaPods => EcoSystemInfo {
                name: "CocoaPods",
                purl_type: "cocoapods",
                description: "The Cocoa dependency manager",
            },
            EcoSystem::Composer => EcoSystemInfo {
                name: "Composer",
                purl_type: "composer",
                description: "Dependency Manager for PHP",
            },
            EcoSystem::Conan => EcoSystemInfo {
                name: "Conan",
                purl_type: "conan",
                description: "The open-source C/C++ package manager",
            },
            EcoSystem::Conda => EcoSystemInfo {
                name: "Conda",
                purl_type: "conda",
                description:
                    "Conda is a cross-platform, language-agnostic binary package manager",
            },
            EcoSystem::Cran => EcoSystemInfo {
                name: "CRAN",
                purl_type: "cran",
                description: "Comprehensive R Archive Network",
            },
            EcoSystem::Debian => EcoSystemInfo {
                name: "Debian",
                purl_type: "deb",
                description: "Debian packages and derivatives",
            },
            EcoSystem::Go => EcoSystemInfo {
                name: "Go",
                purl_type: "golang",
                description: "Go Package Managers",
            },
            EcoSystem::Maven => EcoSystemInfo {
                name: "Maven",
                purl_type: "maven",
                description: "Apache Maven",
            },
            EcoSystem::Npm => EcoSystemInfo {
                name: "npm",
                purl_type: "npm",
                description: "Package manager for the JavaScript programming language",
            },
            EcoSystem::NuGet => EcoSystemInfo {
                name: "NuGet",
                purl_type: "nuget",
                description: "Microsoft NuGet",
            },
            EcoSystem::PyPi => EcoSystemInfo {
                name: "PyPI",
                purl_type: "pypi",
                description: "Python Package Index",
            },
            EcoSystem::Rpm => EcoSystemInfo {
                name: "RPM",
                purl_type: "rpm",
                description: "Redhat Package Manager",
            },
            EcoSystem::RubyGems => EcoSystemInfo {
                name: "RubyGems",
                purl_type: "gem",
                description: "Ruby package system",
            },
            EcoSystem::Swift => EcoSystemInfo {
                name: "Swift",
                purl_type: "swift",
                description: "Swift Package Manager",
            },
        }
    }

    pub const fn purl_type(self) -> &'static str {
        self.info().purl_type
    }

    /// Reverse lookup from a purl type (case-insensitive)
    pub fn from_purl_type(purl_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.purl_type().eq_ignore_ascii_case(purl_type))
    }
}

impl std::fmt::Display for EcoSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.info().name)
    }
}
