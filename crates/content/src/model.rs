use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::Validate;

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern must compile"));

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct Portfolio {
    #[validate(nested)]
    pub profile: Profile,
    #[serde(default)]
    #[validate(nested)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    #[validate(nested)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub education: Vec<Education>,
    #[serde(default)]
    #[validate(nested)]
    pub certifications: Vec<Certification>,
    #[validate(nested)]
    pub contact: ContactInfo,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct Profile {
    #[validate(length(min = 1))]
    pub name: String,
    pub headline: String,
    #[serde(default)]
    pub badge: Option<String>,
    pub summary: String,
    #[serde(default)]
    #[validate(nested)]
    pub links: Vec<Link>,
    #[serde(default)]
    #[validate(url)]
    pub cv_url: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Profile {
    /// Brand mark shown in the navigation bar.
    pub fn initial(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct Link {
    #[validate(length(min = 1))]
    pub label: String,
    #[validate(url)]
    pub href: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct Experience {
    #[validate(regex(path = *SLUG))]
    pub id: String,
    pub company: String,
    pub role: String,
    pub period: String,
}

#[derive(Deserialize, Validate, Clone, Debug, PartialEq)]
pub struct Project {
    #[validate(regex(path = *SLUG))]
    pub id: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub details: Vec<String>,
    pub link_label: String,
    #[validate(url)]
    pub link_href: String,
}

pub struct Tag<'a> {
    pub label: &'a str,
    pub slug: String,
}

impl Project {
    pub fn tags(&self) -> Vec<Tag<'_>> {
        self.tags
            .iter()
            .map(|label| Tag {
                label,
                slug: crate::slug(label),
            })
            .collect()
    }
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct Education {
    #[validate(regex(path = *SLUG))]
    pub id: String,
    pub school: String,
    pub degree: String,
    pub period: String,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct Certification {
    #[validate(regex(path = *SLUG))]
    pub id: String,
    pub title: String,
    pub issuer: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    #[validate(url)]
    pub url: Option<String>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct ContactInfo {
    pub heading: String,
    pub copy: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub social: Option<String>,
}

/// A navigation target on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub label: &'static str,
}
