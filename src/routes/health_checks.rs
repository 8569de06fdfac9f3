use crate::health::HealthChecker;
use actix_web::{get, web, HttpResponse};

#[get("")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[tracing::instrument(name = "Health status.", skip(checker))]
#[get("/status")]
pub async fn health_status(checker: web::Data<HealthChecker>) -> HttpResponse {
    let report = checker.check_all().await;
    if report.is_healthy() {
        HttpResponse::Ok().json(report)
    } else {
        HttpResponse::ServiceUnavailable().json(report)
    }
}
