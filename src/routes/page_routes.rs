// src/routes/page_routes.rs
use crate::models::ServiceError;
use crate::services::query_service;
use crate::utils::pages;
use crate::utils::storage::Storage;
use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpResponse, Responder};
use log::info;

fn html(body: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body.into())
}

#[get("/")]
async fn index() -> impl Responder {
    html(pages::INDEX_HTML)
}

#[get("/register")]
async fn register_page() -> impl Responder {
    html(pages::REGISTER_HTML)
}

#[get("/dashboard")]
async fn dashboard() -> impl Responder {
    html(pages::DASHBOARD_HTML)
}

#[get("/static/script.js")]
async fn script() -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(pages::SCRIPT_JS)
}

// Admin overview rendered server side
#[get("/admin")]
async fn admin(storage: web::Data<Storage>) -> Result<HttpResponse, ServiceError> {
    let teams = query_service::get_admin_view(&storage)?;

    info!("📋 Rendering admin view for {} teams", teams.len());

    Ok(html(pages::render_admin(&teams)?))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(register_page)
        .service(dashboard)
        .service(script)
        .service(admin);
}
