//! Conexión a PostgreSQL
//!
//! Este módulo abre el pool de conexiones y aplica las migraciones del registro.

use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Conexión a la base de datos con las migraciones aplicadas
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Conectar y ejecutar las migraciones pendientes
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        info!("🗄️ Conectando a PostgreSQL en {}", mask_database_url(&config.url));
        let pool = config.create_pool().await?;
        run_migrations(&pool).await?;
        info!("✅ Base de datos lista");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
