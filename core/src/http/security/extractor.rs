//! Handler access to the user bound by [`SecurityTransform`].
//!
//! # Spring Equivalent
//! `@AuthenticationPrincipal` / `SecurityContextHolder`
//!
//! [`SecurityTransform`]: crate::http::security::middleware::SecurityTransform

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::AuthError;
use crate::http::security::User;

fn current_user(req: &HttpRequest) -> Option<User> {
    req.extensions().get::<User>().cloned()
}

/// The authenticated user. Extraction fails with `401 Unauthorized` when the
/// request was not authenticated (e.g. on a `permit_all` route).
///
/// ```ignore
/// #[get("/me")]
/// async fn me(user: AuthenticatedUser) -> impl Responder {
///     format!("Hello, {}!", user.get_username())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl Deref for AuthenticatedUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(current_user(req).map(AuthenticatedUser).ok_or(AuthError::Unauthorized))
    }
}

/// The user if one was authenticated, for routes open to anonymous requests.
#[derive(Debug, Clone)]
pub struct OptionalUser(Option<User>);

impl OptionalUser {
    pub fn into_inner(self) -> Option<User> {
        self.0
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl Deref for OptionalUser {
    type Target = Option<User>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for OptionalUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalUser(current_user(req))))
    }
}

/// Authority checks directly on the request.
pub trait SecurityExt {
    fn get_user(&self) -> Option<User>;

    fn is_authenticated(&self) -> bool {
        self.get_user().is_some()
    }

    fn has_role(&self, role: &str) -> bool {
        self.get_user().is_some_and(|u| u.has_role(role))
    }

    fn has_authority(&self, authority: &str) -> bool {
        self.get_user().is_some_and(|u| u.has_authority(authority))
    }
}

impl SecurityExt for HttpRequest {
    fn get_user(&self) -> Option<User> {
        current_user(self)
    }
}
