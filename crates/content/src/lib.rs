mod error;
mod model;

use std::{collections::HashSet, path::Path};

use config::{Config, File, FileFormat};
use validator::Validate;

pub use error::*;
pub use model::*;

const BUILTIN: &str = include_str!("../portfolio.toml");

impl Portfolio {
    /// Content shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::parse("builtin content", File::from_str(BUILTIN, FileFormat::Toml))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse("inline content", File::from_str(content, FileFormat::Toml))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        Self::parse(
            &path.display().to_string(),
            File::from(path).format(FileFormat::Toml).required(true),
        )
    }

    /// Loads `path` when given, the built-in content otherwise.
    pub fn load_or_builtin(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    fn parse<S>(origin: &str, source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let portfolio: Portfolio = Config::builder()
            .add_source(source)
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|err| ContentError::Load {
                origin: origin.to_owned(),
                err,
            })?;

        portfolio.check()?;

        tracing::debug!(
            origin,
            projects = portfolio.projects.len(),
            skills = portfolio.skills.len(),
            "portfolio content loaded"
        );

        Ok(portfolio)
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;

        unique("experience", self.experience.iter().map(|e| e.id.as_str()))?;
        unique("project", self.projects.iter().map(|p| p.id.as_str()))?;
        unique("education", self.education.iter().map(|e| e.id.as_str()))?;
        unique(
            "certification",
            self.certifications.iter().map(|c| c.id.as_str()),
        )?;

        Ok(())
    }

    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Navigation in page order; list sections without entries are left out.
    pub fn sections(&self) -> Vec<Section> {
        let candidates = [
            (Section { id: "home", label: "Home" }, true),
            (
                Section {
                    id: "experience",
                    label: "Experience",
                },
                !self.experience.is_empty(),
            ),
            (
                Section {
                    id: "projects",
                    label: "Projects",
                },
                !self.projects.is_empty(),
            ),
            (
                Section {
                    id: "tech",
                    label: "Tech Stack",
                },
                !self.skills.is_empty(),
            ),
            (
                Section {
                    id: "education",
                    label: "Education",
                },
                !self.education.is_empty(),
            ),
            (
                Section {
                    id: "certifications",
                    label: "Certifications",
                },
                !self.certifications.is_empty(),
            ),
            (
                Section {
                    id: "contact",
                    label: "Contact me",
                },
                true,
            ),
        ];

        candidates
            .into_iter()
            .filter_map(|(section, shown)| shown.then_some(section))
            .collect()
    }

    pub fn skill_tags(&self) -> Vec<Tag<'_>> {
        self.skills
            .iter()
            .map(|label| Tag {
                label,
                slug: slug(label),
            })
            .collect()
    }

    pub fn has_section(&self, id: &str) -> bool {
        self.sections().iter().any(|section| section.id == id)
    }
}

fn unique<'a>(section: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();

    for id in ids {
        if !seen.insert(id) {
            return Err(ContentError::Duplicate {
                section,
                id: id.to_owned(),
            });
        }
    }

    Ok(())
}

/// Lowercase with whitespace runs collapsed to `-`: `"Product Sense"` → `"product-sense"`.
pub fn slug(text: &str) -> String {
    text.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
