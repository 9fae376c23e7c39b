//! API routes, guarded by authority rules.

use actix_web::{get, HttpRequest, HttpResponse, Responder};

use actix_security_config::http::security::{AuthenticatedUser, SecurityExt};

#[get("/api/users")]
pub async fn api_users(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(format!(
            r#"{{"message": "User list", "requestedBy": "{}"}}"#,
            user.get_username()
        ))
}

/// Writers see an extra field.
#[get("/api/stats")]
pub async fn api_stats(req: HttpRequest) -> impl Responder {
    let writable = req.has_authority("users:write");
    HttpResponse::Ok()
        .content_type("application/json")
        .body(format!(r#"{{"users": 3, "writable": {}}}"#, writable))
}
