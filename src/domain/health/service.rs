use std::sync::OnceLock;
use std::time::{Duration, Instant};

use sea_orm::DatabaseConnection;
use tokio::time::timeout;
use tracing::warn;

use super::dto::{DatabaseCheck, HealthStatus};

static START_TIME: OnceLock<Instant> = OnceLock::new();

const PING_TIMEOUT: Duration = Duration::from_secs(3);

/// main에서 서버 시작 시 호출
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

fn uptime_secs() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

pub async fn check_health(db: &DatabaseConnection) -> HealthStatus {
    let database = ping_database(db).await;

    HealthStatus {
        status: database.state(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: uptime_secs(),
        database,
    }
}

async fn ping_database(db: &DatabaseConnection) -> DatabaseCheck {
    let started = Instant::now();
    let outcome = timeout(PING_TIMEOUT, db.ping()).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(Ok(())) => DatabaseCheck::reachable(elapsed_ms),
        Ok(Err(e)) => {
            warn!(error = %e, "database ping failed");
            DatabaseCheck::unreachable(elapsed_ms, e.to_string())
        }
        Err(_) => {
            warn!(limit_ms = PING_TIMEOUT.as_millis() as u64, "database ping timed out");
            DatabaseCheck::unreachable(elapsed_ms, "ping timed out")
        }
    }
}
