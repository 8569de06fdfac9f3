use super::models::{ComponentHealth, HealthReport};
use sqlx::PgPool;
use std::time::{Duration, Instant};
use tokio::time::timeout;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);
const SLOW_RESPONSE_THRESHOLD_MS: u64 = 1000;

pub struct HealthChecker {
    pg_pool: PgPool,
    start_time: Instant,
}

impl HealthChecker {
    pub fn new(pg_pool: PgPool) -> Self {
        Self {
            pg_pool,
            start_time: Instant::now(),
        }
    }

    pub async fn check_all(&self) -> HealthReport {
        let version = env!("CARGO_PKG_VERSION").to_string();
        let uptime = self.start_time.elapsed().as_secs();
        let mut report = HealthReport::new(version, uptime);

        let database = timeout(CHECK_TIMEOUT, self.check_database())
            .await
            .unwrap_or_else(|_| ComponentHealth::unhealthy("Timeout".to_string()));
        report.add_component("database", database);

        report
    }

    #[tracing::instrument(name = "Check database health", skip(self))]
    async fn check_database(&self) -> ComponentHealth {
        let start = Instant::now();

        let technologies = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM technology WHERE is_active",
        )
        .fetch_one(&self.pg_pool)
        .await;

        match technologies {
            Ok(technologies) => {
                let elapsed = start.elapsed().as_millis() as u64;
                let health = if elapsed > SLOW_RESPONSE_THRESHOLD_MS {
                    ComponentHealth::degraded("Database responding slowly".to_string(), Some(elapsed))
                } else {
                    ComponentHealth::healthy(elapsed)
                };

                let pool_size = self.pg_pool.size();
                let idle_connections = self.pg_pool.num_idle();
                health
                    .with_detail("pool_size", serde_json::json!(pool_size))
                    .with_detail("idle_connections", serde_json::json!(idle_connections))
                    .with_detail("active_technologies", serde_json::json!(technologies))
            }
            Err(e) => {
                tracing::error!("Database health check failed: {:?}", e);
                ComponentHealth::unhealthy("Database unavailable".to_string())
            }
        }
    }
}
