use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use folio_content::{Portfolio, Project};

use crate::{
    routes::{AppState, ContactCard},
    template::{Layout, Template},
};

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub layout: Layout,
    pub portfolio: Arc<Portfolio>,
    /// Rendered as an open dialog, used when a project link is followed without scripts.
    pub active_project: Option<Project>,
    pub card: ContactCard,
}

impl IndexTemplate {
    pub fn new(template: &Template, state: &AppState, jar: &CookieJar) -> Self {
        Self {
            layout: template.layout(),
            portfolio: state.content.clone(),
            active_project: None,
            card: ContactCard::for_visitor(state, jar),
        }
    }
}

pub async fn page(
    template: Template,
    State(state): State<AppState>,
    jar: CookieJar,
) -> impl IntoResponse {
    template.render(IndexTemplate::new(&template, &state, &jar))
}
