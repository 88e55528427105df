use std::{fs, path::Path};

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

pub fn ensure_sqlite_dir(db_url: &str) -> std::io::Result<()> {
    let path = if let Some(path) = db_url.strip_prefix("sqlite://") {
        Some(path)
    } else if let Some(path) = db_url.strip_prefix("sqlite:") {
        Some(path)
    } else {
        None
    };

    let Some(path) = path else {
        return Ok(());
    };

    let path = path.split('?').next().unwrap_or(path);
    if path == ":memory:" || path.is_empty() {
        return Ok(());
    }

    let path = path.strip_prefix("file:").unwrap_or(path);
    let db_path = Path::new(path);
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Barbers and services are managed out-of-band; a fresh database gets a
/// default roster so the booking form is usable immediately.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    seed_barbers(pool).await?;
    seed_services(pool).await?;
    Ok(())
}

async fn seed_barbers(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM barbers")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    for name in ["Mohamad", "Ahmed", "Karwan"] {
        sqlx::query("INSERT INTO barbers (id, name, active, created_at) VALUES (?, ?, 1, ?)")
            .bind(new_id())
            .bind(name)
            .bind(now_rfc3339())
            .execute(pool)
            .await?;
    }
    Ok(())
}

async fn seed_services(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM services")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    let services = [
        ("Beard Trim", "ڕێکخستنی ڕیش", "تهذيب اللحية", 5000_i64),
        ("Kids Haircut", "قژبڕینی منداڵان", "قص شعر أطفال", 7000),
        ("Haircut", "قژبڕین", "قص شعر", 10000),
        ("Haircut & Beard", "قژبڕین و ڕیش", "قص شعر ولحية", 13000),
    ];

    for (name, name_ku, name_ar, price) in services {
        sqlx::query(
            r#"INSERT INTO services (id, name, name_ku, name_ar, price, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(new_id())
        .bind(name)
        .bind(name_ku)
        .bind(name_ar)
        .bind(price)
        .bind(now_rfc3339())
        .execute(pool)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    use sqlx::sqlite::SqlitePoolOptions;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    run_migrations(&pool).await.expect("migrations");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn seeding_is_idempotent() {
        let pool = test_pool().await;
        seed_defaults(&pool).await.unwrap();
        seed_defaults(&pool).await.unwrap();

        let barbers = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM barbers")
            .fetch_one(&pool)
            .await
            .unwrap();
        let services = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM services")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(barbers, 3);
        assert_eq!(services, 4);
    }

    #[test]
    fn sqlite_dir_handles_memory_urls() {
        assert!(ensure_sqlite_dir("sqlite::memory:").is_ok());
        assert!(ensure_sqlite_dir("postgres://elsewhere").is_ok());
    }
}
