use crate::configuration::Settings;
use crate::health::HealthChecker;
use crate::helpers::JsonResponse;
use crate::middleware;
use crate::routes;
use crate::services::{
    PgCandidateSource, StackMutationPipeline, StackQuery, TechnologyCatalog,
    TechnologySuggestionService, VersionHistoryStore,
};
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let catalog = web::Data::new(TechnologyCatalog::new(pg_pool.clone()));
    let suggestions = web::Data::new(TechnologySuggestionService::new(Arc::new(
        PgCandidateSource::new(pg_pool.clone()),
    )));
    let pipeline = web::Data::new(StackMutationPipeline::new(pg_pool.clone()));
    let stacks = web::Data::new(StackQuery::new(pg_pool.clone()));
    let history = web::Data::new(VersionHistoryStore::new(pg_pool.clone()));
    let health_checker = web::Data::new(HealthChecker::new(pg_pool.clone()));

    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let oauth_http_client = reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    let oauth_http_client = web::Data::new(oauth_http_client);

    let oauth_cache = web::Data::new(middleware::authentication::OAuthCache::new(
        Duration::from_secs(60),
    ));

    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        JsonResponse::<()>::build().form_error(format!("Invalid query string: {}", err))
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::authentication::Manager::new())
            .wrap(actix_web::middleware::Compress::default())
            .wrap(Cors::permissive())
            .app_data(query_config.clone())
            .app_data(settings.clone())
            .app_data(pg_pool.clone())
            .app_data(oauth_http_client.clone())
            .app_data(oauth_cache.clone())
            .app_data(health_checker.clone())
            .app_data(catalog.clone())
            .app_data(suggestions.clone())
            .app_data(pipeline.clone())
            .app_data(stacks.clone())
            .app_data(history.clone())
            .service(
                web::scope("/health_check")
                    .service(routes::health_check)
                    .service(routes::health_status),
            )
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/technologies")
                            .service(routes::technology::suggest_handler)
                            .service(routes::technology::list_handler)
                            .service(routes::technology::add_handler),
                    )
                    .service(
                        web::scope("/stacks")
                            .service(routes::stack::list_handler)
                            .service(routes::stack::add_handler)
                            .service(routes::stack::history_handler)
                            .service(routes::stack::item_handler)
                            .service(routes::stack::update_handler)
                            .service(routes::stack::delete_handler),
                    ),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
