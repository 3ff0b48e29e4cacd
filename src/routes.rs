use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{WithRejection, cookie::SignedCookieJar};
use serde::Deserialize;
use tracing::info;

use crate::{
    AppState, csrf,
    error::{AppError, AppResult},
    forms::{FieldErrors, RatingForm, TitleForm},
    templates,
};

/// What a form submission turns into: a navigation elsewhere, a new page, or the
/// same form again with field errors.
#[derive(Debug)]
pub enum FormOutcome {
    Redirect(String),
    Render(String),
    Invalid(String),
}

impl IntoResponse for FormOutcome {
    fn into_response(self) -> Response {
        match self {
            FormOutcome::Redirect(target) => Redirect::to(&target).into_response(),
            FormOutcome::Render(body) => Html(body).into_response(),
            FormOutcome::Invalid(body) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response()
            },
        }
    }
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let movies = state.store.list_all().await?;
    Ok(Html(templates::list_page(&movies)))
}

pub async fn add_form(jar: SignedCookieJar) -> (SignedCookieJar, Html<String>) {
    let (jar, token) = csrf::issue(jar);
    (jar, Html(templates::add_page("", &FieldErrors::default(), &token)))
}

pub async fn add_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<TitleForm>,
) -> AppResult<(SignedCookieJar, FormOutcome)> {
    match csrf::guard(&jar, &form.csrf_token, form.validate()) {
        Err(errors) => {
            let (jar, token) = csrf::issue(jar);
            let body = templates::add_page(&form.title, &errors, &token);
            Ok((jar, FormOutcome::Invalid(body)))
        },
        Ok(title) => {
            let candidates = state.tmdb.search(&title).await?;
            info!(%title, results = candidates.len(), "search complete");
            Ok((jar, FormOutcome::Render(templates::select_page(&title, &candidates))))
        },
    }
}

pub async fn find(
    State(state): State<AppState>,
    WithRejection(Path(external_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Redirect> {
    let detail = state.tmdb.fetch(external_id).await?;
    let new = state.tmdb.to_new_movie(detail)?;
    let movie = state.store.create(new).await?;

    info!(id = movie.id, external_id, title = %movie.title, "movie staged");
    Ok(Redirect::to(&format!("/edit/{}", movie.id)))
}

pub async fn edit_form(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    let movie = state.store.get(id).await?;
    let rating = movie.rating.map(|r| r.to_string()).unwrap_or_default();
    let review = movie.review.clone().unwrap_or_default();

    let (jar, token) = csrf::issue(jar);
    let body = templates::edit_page(&movie, &rating, &review, &FieldErrors::default(), &token);
    Ok((jar, Html(body)))
}

pub async fn edit_submit(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    jar: SignedCookieJar,
    Form(form): Form<RatingForm>,
) -> AppResult<(SignedCookieJar, FormOutcome)> {
    match csrf::guard(&jar, &form.csrf_token, form.validate()) {
        Err(errors) => {
            let movie = state.store.get(id).await?;
            let (jar, token) = csrf::issue(jar);
            let body = templates::edit_page(&movie, &form.rating, &form.review, &errors, &token);
            Ok((jar, FormOutcome::Invalid(body)))
        },
        Ok(valid) => {
            let movie = state.store.update(id, valid.rating, valid.review).await?;
            info!(id = movie.id, rating = valid.rating, "rating saved");
            Ok((jar, FormOutcome::Redirect("/".to_string())))
        },
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    id: Option<i32>,
}

pub async fn delete(
    State(state): State<AppState>,
    WithRejection(Query(q), _): WithRejection<Query<DeleteQuery>, AppError>,
) -> AppResult<Redirect> {
    let id = q.id.ok_or_else(|| AppError::BadRequest("id is required".to_string()))?;
    state.store.delete(id).await?;

    info!(id, "movie deleted");
    Ok(Redirect::to("/"))
}
