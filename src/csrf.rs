use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

use crate::forms::FieldErrors;

pub const CSRF_COOKIE: &str = "csrf_token";
pub const CSRF_FIELD: &str = "csrf_token";

const TOKEN_TTL_HOURS: i64 = 12;

/// Returns the token to embed in a form, minting and signing a new one if the
/// browser does not already hold a valid cookie.
pub fn issue(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(existing) = jar.get(CSRF_COOKIE) {
        let token = existing.value().to_string();
        return (jar, token);
    }

    let token = uuid::Uuid::new_v4().simple().to_string();
    let cookie = Cookie::build((CSRF_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(TOKEN_TTL_HOURS));
    (jar.add(cookie), token)
}

/// Folds the token check into a form's validation result.
pub fn guard<T>(
    jar: &SignedCookieJar,
    submitted: &str,
    validated: Result<T, FieldErrors>,
) -> Result<T, FieldErrors> {
    let mut errors = FieldErrors::default();
    verify(jar, submitted, &mut errors);
    match validated {
        Ok(value) if errors.is_empty() => Ok(value),
        Ok(_) => Err(errors),
        Err(field_errors) => {
            errors.extend(field_errors);
            Err(errors)
        },
    }
}

/// Records a form-level error when the submitted token does not match the signed cookie.
fn verify(jar: &SignedCookieJar, submitted: &str, errors: &mut FieldErrors) {
    if submitted.is_empty() {
        errors.add(CSRF_FIELD, "The CSRF token is missing.");
        return;
    }
    match jar.get(CSRF_COOKIE) {
        Some(cookie) if cookie.value() == submitted => {},
        _ => errors.add(CSRF_FIELD, "The CSRF token is invalid."),
    }
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::Key;

    use super::*;

    fn jar() -> SignedCookieJar {
        SignedCookieJar::new(Key::derive_from(&[7u8; 32]))
    }

    #[test]
    fn test_issue_reuses_existing_token() {
        let (jar, first) = issue(jar());
        let (_, second) = issue(jar);
        assert_eq!(first, second);
        assert_eq!(first.len(), 32);
    }

    #[test]
    fn test_verify() {
        let (jar, token) = issue(jar());

        let mut errors = FieldErrors::default();
        verify(&jar, &token, &mut errors);
        assert!(errors.is_empty());

        let mut errors = FieldErrors::default();
        verify(&jar, "forged", &mut errors);
        assert_eq!(errors.get(CSRF_FIELD), ["The CSRF token is invalid."]);

        let mut errors = FieldErrors::default();
        verify(&jar, "", &mut errors);
        assert_eq!(errors.get(CSRF_FIELD), ["The CSRF token is missing."]);
    }

    #[test]
    fn test_guard_merges_field_errors() {
        let (jar, token) = issue(jar());
        let ok: Result<u8, FieldErrors> = Ok(1);
        assert_eq!(guard(&jar, &token, ok), Ok(1));

        let mut field_errors = FieldErrors::default();
        field_errors.add("title", "This field is required.");
        let errors = guard::<u8>(&jar, "forged", Err(field_errors)).unwrap_err();
        assert_eq!(errors.get(CSRF_FIELD).len(), 1);
        assert_eq!(errors.get("title").len(), 1);
    }

    #[test]
    fn test_verify_without_cookie() {
        let mut errors = FieldErrors::default();
        verify(&jar(), "abc", &mut errors);
        assert_eq!(errors.get(CSRF_FIELD), ["The CSRF token is invalid."]);
    }
}
