use actix_web::HttpResponse;
use minijinja::Environment;
use tracing::error;

/// Builds the template environment once at startup. All templates ship
/// embedded in the binary.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("base.html", include_str!("../../templates/base.html"))?;
    env.add_template("login.html", include_str!("../../templates/login.html"))?;
    env.add_template("index.html", include_str!("../../templates/index.html"))?;
    env.add_template("client.html", include_str!("../../templates/client.html"))?;
    env.add_template("chat.html", include_str!("../../templates/chat.html"))?;
    env.add_template("search.html", include_str!("../../templates/search.html"))?;
    Ok(env)
}

pub fn render(env: &Environment<'static>, name: &str, ctx: minijinja::Value) -> HttpResponse {
    match env.get_template(name).and_then(|tmpl| tmpl.render(ctx)) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            error!("failed to render {}: {}", name, e);
            HttpResponse::InternalServerError().body("erro interno")
        }
    }
}
