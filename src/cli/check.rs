use anyhow::Result;
use folio_content::Portfolio;

/// Loads the content the server would serve and reports what it found.
pub fn check(config: &crate::config::Config) -> Result<()> {
    let origin = config.site.content_path.as_deref().unwrap_or("builtin");
    let content = Portfolio::load_or_builtin(config.site.content_path.as_deref())?;

    let sections = content
        .sections()
        .iter()
        .map(|section| section.label)
        .collect::<Vec<_>>()
        .join(", ");

    tracing::info!(
        origin,
        theme = %config.site.theme,
        projects = content.projects.len(),
        skills = content.skills.len(),
        experience = content.experience.len(),
        education = content.education.len(),
        certifications = content.certifications.len(),
        "content is valid"
    );
    tracing::info!(sections, "navigation");

    Ok(())
}
