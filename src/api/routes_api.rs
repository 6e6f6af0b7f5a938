use actix_web::{get, web, HttpResponse};

use crate::api::models::SearchQuery;
use crate::config::AppConfig;
use crate::db::service::DbService;

/// JSON mirror of the search page, used by client-side refresh.
#[get("/search")]
pub async fn api_search(
    config: web::Data<AppConfig>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let db = config.database.clone();
    let term = query.q.trim().to_string();
    let results = web::block(move || DbService::search_sessions(&db, &term))
        .await
        .unwrap_or_default();

    HttpResponse::Ok().json(results)
}

/// JSON mirror of the conversation page.
#[get("/messages/{session_id}")]
pub async fn api_messages(
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> HttpResponse {
    let db = config.database.clone();
    let session_id = path.into_inner();
    let messages = web::block(move || DbService::conversation_messages(&db, &session_id))
        .await
        .unwrap_or_default();

    HttpResponse::Ok().json(messages)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(api_search)
            .service(api_messages),
    );
}
