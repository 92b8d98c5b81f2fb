//! HTTP routes

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};
use dns_onboarder_app::AppState;
use dns_onboarder_core::CoreError;
use serde::Deserialize;

use crate::pages;

/// Shared state handed to every handler.
pub struct WebContext {
    pub app: Arc<AppState>,
    /// Shown on the submission page
    pub expected_nameservers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    domain: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/submit", web::get().to(submit_page))
        .route("/submit", web::post().to(submit))
        .route("/domains.json", web::get().to(domains_json));
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

async fn index(ctx: web::Data<WebContext>) -> impl Responder {
    let snapshot = ctx.app.status_service.snapshot().await;
    html(pages::render_index(&snapshot))
}

async fn submit_page(ctx: web::Data<WebContext>) -> impl Responder {
    html(pages::render_submit(&ctx.expected_nameservers))
}

async fn submit(ctx: web::Data<WebContext>, form: web::Form<SubmitForm>) -> impl Responder {
    match ctx.app.submission_service.submit(&form.domain).await {
        Ok(()) => {
            tracing::info!(domain = %form.domain.trim(), "Domain submitted");
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/"))
                .finish()
        }
        Err(CoreError::ValidationError(msg)) => HttpResponse::BadRequest()
            .content_type("text/plain; charset=utf-8")
            .body(msg),
        Err(e) => {
            tracing::error!("Submission failed: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

async fn domains_json(ctx: web::Data<WebContext>) -> impl Responder {
    HttpResponse::Ok().json(ctx.app.status_service.export_active().await)
}
