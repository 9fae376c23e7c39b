//! Public routes (permitted for everyone, or ignored by security).

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginForm {
    pub user_name: String,
}

/// The login page stays reachable whatever the URL rules say.
#[get("/login")]
pub async fn login() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(
            "<html><body><form method=\"post\" action=\"/login\">\
             <input name=\"user_name\"/><button>Sign in</button></form></body></html>",
        )
}

#[post("/login")]
pub async fn post_login(login_form: web::Form<LoginForm>) -> impl Responder {
    HttpResponse::Ok().body(format!(
        "Use HTTP Basic Auth: curl -u {}:<password> <url>",
        login_form.user_name
    ))
}

/// Served from an ignored path: no chain runs, no security headers are written.
#[get("/static/{file}")]
pub async fn asset(file: web::Path<String>) -> impl Responder {
    HttpResponse::Ok().body(format!("asset {}", file.into_inner()))
}
