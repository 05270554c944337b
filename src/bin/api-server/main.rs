use actix_cors::Cors;
use actix_web::{dev::Service as _, web, App, HttpServer};
use anyhow::Context;
use food_finder::config::{open_pool, ServerConfig};

mod api;

fn cors(allowed_origin: Option<&str>) -> Cors {
    let cors = Cors::default().allow_any_method().allow_any_header();
    match allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env()?;

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_ansi(true)
        .with_file(false)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("fail to setup logging")?;

    let db_pool = open_pool(&config).await?;
    let state = web::Data::new(api::ApiState::new(db_pool));

    let allowed_origin = config.allowed_origin.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(allowed_origin.as_deref()))
            .wrap_fn(|req, srv| {
                let method = req.method().clone();
                let path = req.path().to_owned();
                let fut = srv.call(req);
                async move {
                    let resp = fut.await?;
                    tracing::info!(%method, %path, status = resp.status().as_u16(), "request");
                    Ok(resp)
                }
            })
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("fail to bind {}:{}", config.host, config.port))?;

    tracing::info!("App listening at http://{}:{}", config.host, config.port);
    server.run().await?;
    Ok(())
}
