use actix_session::Session;
use actix_web::{get, http::header, post, web, HttpResponse};
use minijinja::{context, Environment};
use tracing::{error, warn};

use crate::api::middleware::AUTH_FLAG;
use crate::api::models::{LoginForm, SearchQuery};
use crate::api::templates::render;
use crate::config::AppConfig;
use crate::db::service::DbService;

// The query layer drives a synchronous connection, so every call goes
// through web::block to keep it off the async workers.

#[get("/health")]
pub async fn health(config: web::Data<AppConfig>) -> HttpResponse {
    let db = config.database.clone();
    let healthy = web::block(move || DbService::ping(&db))
        .await
        .unwrap_or(false);

    if healthy {
        HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        }))
    } else {
        HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "database": "disconnected"
        }))
    }
}

#[get("/login")]
pub async fn login_form(env: web::Data<Environment<'static>>) -> HttpResponse {
    render(&env, "login.html", context! {})
}

#[post("/login")]
pub async fn login_submit(
    config: web::Data<AppConfig>,
    env: web::Data<Environment<'static>>,
    session: Session,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    let form = form.into_inner();

    if form.username == config.auth.username && form.password == config.auth.password {
        if let Err(e) = session.insert(AUTH_FLAG, true) {
            error!("failed to persist session: {}", e);
            return HttpResponse::InternalServerError().body("erro interno");
        }
        return HttpResponse::Found()
            .insert_header((header::LOCATION, "/"))
            .finish();
    }

    // One generic message regardless of which credential was wrong
    warn!("rejected login attempt for user {:?}", form.username);
    render(
        &env,
        "login.html",
        context! { error => "Credenciais inválidas" },
    )
}

#[get("/logout")]
pub async fn logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/login"))
        .finish()
}

#[get("/")]
pub async fn index(
    config: web::Data<AppConfig>,
    env: web::Data<Environment<'static>>,
) -> HttpResponse {
    let db = config.database.clone();
    let clients = web::block(move || DbService::client_rollup(&db))
        .await
        .unwrap_or_default();

    render(&env, "index.html", context! { clients => clients })
}

#[get("/client/{name}")]
pub async fn client_detail(
    config: web::Data<AppConfig>,
    env: web::Data<Environment<'static>>,
    path: web::Path<String>,
) -> HttpResponse {
    let client = path.into_inner();
    let db = config.database.clone();
    let sessions = {
        let client = client.clone();
        web::block(move || DbService::client_sessions(&db, &client))
            .await
            .unwrap_or_default()
    };

    render(
        &env,
        "client.html",
        context! { client => client, sessions => sessions },
    )
}

#[get("/chat/{session_id}")]
pub async fn view_chat(
    config: web::Data<AppConfig>,
    env: web::Data<Environment<'static>>,
    path: web::Path<String>,
) -> HttpResponse {
    let session_id = path.into_inner();
    let db = config.database.clone();
    let messages = {
        let session_id = session_id.clone();
        web::block(move || DbService::conversation_messages(&db, &session_id))
            .await
            .unwrap_or_default()
    };

    render(
        &env,
        "chat.html",
        context! { session_id => session_id, messages => messages },
    )
}

#[get("/search")]
pub async fn search_page(
    config: web::Data<AppConfig>,
    env: web::Data<Environment<'static>>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let term = query.q.trim().to_string();
    if term.is_empty() {
        return HttpResponse::Found()
            .insert_header((header::LOCATION, "/"))
            .finish();
    }

    let db = config.database.clone();
    let results = {
        let term = term.clone();
        web::block(move || DbService::search_sessions(&db, &term))
            .await
            .unwrap_or_default()
    };

    render(
        &env,
        "search.html",
        context! { query => term, results => results },
    )
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(login_form)
        .service(login_submit)
        .service(logout)
        .service(index)
        .service(client_detail)
        .service(view_chat)
        .service(search_page);
}
