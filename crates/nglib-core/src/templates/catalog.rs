//! The static list of template entries and the order they are written in

use crate::answers::TestFramework;
use std::slice;

/// Whether an entry is copied byte-for-byte or rendered with placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Copy,
    Render,
}

/// Where an entry's content comes from, relative to the template root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    /// One file, written to `to` (relative to the destination)
    File {
        from: &'static str,
        to: &'static str,
    },
    /// Every file under `base` whose relative path matches `pattern`,
    /// written below `to` with the same relative path
    Glob {
        base: &'static str,
        pattern: &'static str,
        to: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub source: EntrySource,
    pub mode: Mode,
}

impl TemplateEntry {
    pub const fn copy(from: &'static str, to: &'static str) -> Self {
        Self {
            source: EntrySource::File { from, to },
            mode: Mode::Copy,
        }
    }

    pub const fn render(from: &'static str, to: &'static str) -> Self {
        Self {
            source: EntrySource::File { from, to },
            mode: Mode::Render,
        }
    }

    pub const fn copy_glob(base: &'static str, pattern: &'static str, to: &'static str) -> Self {
        Self {
            source: EntrySource::Glob { base, pattern, to },
            mode: Mode::Copy,
        }
    }

    pub const fn render_glob(base: &'static str, pattern: &'static str, to: &'static str) -> Self {
        Self {
            source: EntrySource::Glob { base, pattern, to },
            mode: Mode::Render,
        }
    }
}

/// One step of the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStep {
    Always(TemplateEntry),
    /// Mutually exclusive entry sets, chosen by the test framework answer
    ByTestFramework {
        karma_jasmine: Vec<TemplateEntry>,
        jest: Vec<TemplateEntry>,
    },
}

impl CatalogStep {
    /// Entries this step contributes for the given framework
    pub fn entries_for(&self, framework: TestFramework) -> &[TemplateEntry] {
        match self {
            CatalogStep::Always(entry) => slice::from_ref(entry),
            CatalogStep::ByTestFramework {
                karma_jasmine,
                jest,
            } => match framework {
                TestFramework::KarmaJasmine => karma_jasmine,
                TestFramework::Jest => jest,
            },
        }
    }
}

/// Ordered template catalog. Later steps may rely on directories created by
/// earlier ones, so the order is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    steps: Vec<CatalogStep>,
}

impl Catalog {
    pub fn new(steps: Vec<CatalogStep>) -> Self {
        Self { steps }
    }

    /// The Angular library project layout
    pub fn standard() -> Self {
        use CatalogStep::Always;

        Self::new(vec![
            // Ignore rules and CI
            Always(TemplateEntry::copy("gitignore", ".gitignore")),
            Always(TemplateEntry::copy("npmignore", ".npmignore")),
            Always(TemplateEntry::copy("travis.yml", ".travis.yml")),
            // Build and lint configuration
            Always(TemplateEntry::render("_tsconfig.json", "tsconfig.json")),
            Always(TemplateEntry::render("_tslint.json", "tslint.json")),
            CatalogStep::ByTestFramework {
                karma_jasmine: vec![TemplateEntry::render("_package.json", "package.json")],
                jest: vec![
                    TemplateEntry::render("_package_jest.json", "package.json"),
                    TemplateEntry::render("_jest.ts", "src/jest.ts"),
                    TemplateEntry::render("_jest-global-mocks.ts", "src/jest-global-mocks.ts"),
                ],
            },
            Always(TemplateEntry::render("README.MD", "README.MD")),
            Always(TemplateEntry::copy_glob("tools", "**/*", "tools")),
            Always(TemplateEntry::render("gulpfile.js", "gulpfile.js")),
            // Library sources, then the manifests that live next to them
            Always(TemplateEntry::copy_glob("src", "**/*.ts", "src")),
            Always(TemplateEntry::render("src/_package.json", "src/package.json")),
            Always(TemplateEntry::render(
                "src/_tsconfig.es5.json",
                "src/tsconfig.es5.json",
            )),
            Always(TemplateEntry::render(
                "src/_tsconfig.spec.json",
                "src/tsconfig.spec.json",
            )),
        ])
    }

    /// Flattened entries for one framework, in write order
    pub fn entries_for(&self, framework: TestFramework) -> Vec<&TemplateEntry> {
        self.steps
            .iter()
            .flat_map(|step| step.entries_for(framework))
            .collect()
    }

    /// Every entry regardless of branch, for authoring checks
    pub fn all_entries(&self) -> Vec<&TemplateEntry> {
        self.steps
            .iter()
            .flat_map(|step| match step {
                CatalogStep::Always(entry) => vec![entry],
                CatalogStep::ByTestFramework {
                    karma_jasmine,
                    jest,
                } => karma_jasmine.iter().chain(jest.iter()).collect(),
            })
            .collect()
    }
}
