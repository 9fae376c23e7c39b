//! Admin and user areas, guarded by role rules.

use actix_web::{get, HttpResponse, Responder};

use actix_security_config::http::security::AuthenticatedUser;

#[get("/admin/dashboard")]
pub async fn admin_dashboard(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!(
        "Admin Dashboard\n\nWelcome, {}!\nYou have admin access.",
        user.get_username()
    ))
}

#[get("/admin/users")]
pub async fn admin_users(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!(
        "User Management (Admin)\n\nLogged in as: {}",
        user.get_username()
    ))
}

/// Requires USER or ADMIN.
#[get("/user/settings")]
pub async fn user_settings(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!(
        "User Settings\n\nUser: {}\nRoles: {:?}",
        user.get_username(),
        user.get_roles()
    ))
}
