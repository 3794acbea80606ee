use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use folio_content::Project;

use crate::{
    routes::{AppState, index::IndexTemplate},
    template::{Fragment, Template},
};

#[derive(askama::Template)]
#[template(path = "partials/project-modal.html")]
pub struct ProjectModalTemplate {
    pub project: Project,
}

pub async fn page(
    template: Template,
    Fragment(fragment): Fragment,
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Response {
    let Some(project) = state.content.find_project(&id).cloned() else {
        tracing::debug!(project = %id, "unknown project");

        return template.not_found();
    };

    if fragment {
        return template
            .render(ProjectModalTemplate { project })
            .into_response();
    }

    template.render(IndexTemplate {
        active_project: Some(project),
        ..IndexTemplate::new(&template, &state, &jar)
    })
}
