use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use folio_content::Section;
use std::convert::Infallible;
use time::OffsetDateTime;

use crate::{config::Theme, routes::AppState};

pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong, please retry later";
pub const FRAGMENT_HEADER: &str = "X-Fragment";

/// Page chrome shared by every full page.
#[derive(Clone, Debug)]
pub struct Layout {
    pub theme: Theme,
    pub brand: String,
    pub initial: String,
    pub sections: Vec<Section>,
    pub year: i32,
}

pub struct Template {
    layout: Layout,
}

impl Template {
    pub fn layout(&self) -> Layout {
        self.layout.clone()
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        self.render_with_status(StatusCode::OK, template)
    }

    pub fn render_with_status<T: askama::Template>(
        &self,
        status: StatusCode,
        template: T,
    ) -> Response {
        match template.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(err = %err, "failed to render template");

                match askama::Template::render(&ServerTemplate {
                    layout: self.layout(),
                }) {
                    Ok(html) => (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response(),
                    Err(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
                    }
                }
            }
        }
    }

    pub fn not_found(&self) -> Response {
        self.render_with_status(
            StatusCode::NOT_FOUND,
            NotFoundTemplate {
                layout: self.layout(),
            },
        )
    }
}

impl FromRequestParts<AppState> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let profile = &state.content.profile;

        Ok(Template {
            layout: Layout {
                theme: state.config.site.theme,
                brand: profile.name.to_owned(),
                initial: profile.initial(),
                sections: state.content.sections(),
                year: OffsetDateTime::now_utc().year(),
            },
        })
    }
}

/// `true` when the request asked for a partial (`X-Fragment: 1`) instead of a page.
pub struct Fragment(pub bool);

impl<S: Send + Sync> FromRequestParts<S> for Fragment {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let requested = parts
            .headers
            .get(FRAGMENT_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "1");

        Ok(Fragment(requested))
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
}

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerTemplate {
    pub layout: Layout,
}
