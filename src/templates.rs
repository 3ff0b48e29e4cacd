use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    csrf::CSRF_FIELD,
    forms::FieldErrors,
    models::{CandidateSummary, MovieRecord},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn list_page(movies: &[MovieRecord]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                            p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet." }
                        }
                    } @else {
                        div id="movies" class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

fn movie_card(movie: &MovieRecord) -> Markup {
    html! {
        div class="movie bg-white shadow rounded-lg p-6 flex gap-6" data-movie-id=(movie.id) {
            img class="w-32 rounded" src=(movie.img_url) alt=(movie.title);
            div class="flex-1" {
                @if let Some(ranking) = movie.ranking {
                    p class="text-4xl font-bold text-gray-300" { (ranking) }
                }
                h2 class="title text-xl font-semibold text-gray-900" {
                    (movie.title) " "
                    span class="font-normal text-gray-500" { "(" (movie.year) ")" }
                }
                @match movie.rating {
                    Some(rating) => {
                        p class="rating mt-2 text-gray-800" { (format!("{rating:.1}")) " / 10" }
                    }
                    None => {
                        p class="rating mt-2 text-gray-500 italic" { "Not rated yet" }
                    }
                }
                @if let Some(review) = &movie.review {
                    p class="review mt-1 text-gray-700" { "\u{201c}" (review) "\u{201d}" }
                }
                p class="mt-3 text-sm text-gray-600" { (movie.description) }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit/{}", movie.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                }
            }
        }
    }
}

pub fn add_page(title: &str, errors: &FieldErrors, csrf_token: &str) -> String {
    page(
        "Add Movie",
        card(html! {
            h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }
            (form_errors(errors, CSRF_FIELD))
            form class="mt-8 space-y-6" method="post" action="/add" {
                input type="hidden" name=(CSRF_FIELD) value=(csrf_token);
                div {
                    label class="block text-sm font-medium text-gray-700" for="title" { "Movie Title" }
                    input class=(INPUT_CLASS) name="title" id="title" value=(title);
                    (form_errors(errors, "title"))
                }
                button class=(BUTTON_CLASS) type="submit" { "Add Movie" }
            }
        }),
    )
}

pub fn select_page(query: &str, candidates: &[CandidateSummary]) -> String {
    page(
        "Select Movie",
        card(html! {
            h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
            p class="mt-2 text-gray-600" { "Results for \u{201c}" (query) "\u{201d}" }
            @if candidates.is_empty() {
                p class="mt-8 text-gray-600" { "No movies found." }
            } @else {
                ul id="candidates" class="mt-8 space-y-2" {
                    @for candidate in candidates {
                        li {
                            a class="candidate text-blue-600 hover:text-blue-800" href=(format!("/find/{}", candidate.external_id)) {
                                (candidate.title)
                                @if let Some(date) = &candidate.release_date {
                                    " - " (date)
                                }
                            }
                        }
                    }
                }
            }
            a class="mt-6 inline-block text-sm text-gray-500 hover:text-gray-700" href="/add" { "Search again" }
        }),
    )
}

pub fn edit_page(
    movie: &MovieRecord,
    rating: &str,
    review: &str,
    errors: &FieldErrors,
    csrf_token: &str,
) -> String {
    page(
        "Edit Movie",
        card(html! {
            h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
            p class="mt-2 text-gray-600" { "Edit Movie Rating" }
            (form_errors(errors, CSRF_FIELD))
            form class="mt-8 space-y-6" method="post" action=(format!("/edit/{}", movie.id)) {
                input type="hidden" name=(CSRF_FIELD) value=(csrf_token);
                div {
                    label class="block text-sm font-medium text-gray-700" for="rating" { "Your Rating Out of 10 e.g. 7.5" }
                    input class=(INPUT_CLASS) name="rating" id="rating" value=(rating);
                    (form_errors(errors, "rating"))
                }
                div {
                    label class="block text-sm font-medium text-gray-700" for="review" { "Your Review" }
                    input class=(INPUT_CLASS) name="review" id="review" value=(review);
                    (form_errors(errors, "review"))
                }
                button class=(BUTTON_CLASS) type="submit" { "Done" }
            }
        }),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { (status) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn form_errors(errors: &FieldErrors, field: &str) -> Markup {
    html! {
        @for message in errors.get(field) {
            p class="error mt-2 text-sm text-red-600" data-field=(field) { (message) }
        }
    }
}

fn card(inner: Markup) -> Markup {
    html! {
        div class="min-h-screen bg-gray-50" {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" { (inner) }
            }
        }
    }
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}
