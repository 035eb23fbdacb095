use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn, Level};

use vehicle_registry::config::{DatabaseConfig, EnvironmentConfig, StorageBackend};
use vehicle_registry::create_router;
use vehicle_registry::database::DatabaseConnection;
use vehicle_registry::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("configuración inválida")?;

    // Configurar logging
    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚓 Registro de vehículos - API de avis de recherche");
    info!("==================================================");
    info!("🌍 Entorno: {}", config.environment);

    let state = match config.storage_backend {
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .clone()
                .context("DATABASE_URL must be set")?;
            let db_config = DatabaseConfig::from_env(url).context("configuración de base de datos inválida")?;
            let db_connection = match DatabaseConnection::connect(&db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            AppState::postgres(db_connection.pool().clone(), config.clone())
        }
        StorageBackend::Memory => {
            warn!("⚠️ Almacenamiento en memoria: los datos se pierden al reiniciar");
            AppState::in_memory(config.clone())
        }
    };

    state
        .auth
        .bootstrap_admin(config.admin_email.as_deref(), config.admin_password.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Error creando el super-admin inicial: {}", e))?;

    let app = create_router(state);

    let addr = config.server_url();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("no se pudo escuchar en {}", addr))?;

    info!("🌐 Servidor iniciado en http://{}", addr);
    info!("📋 Endpoints principales:");
    info!("   GET  /health");
    info!("   GET  /api/vehicles");
    info!("   POST /api/vehicles");
    info!("   GET  /api/alerts");
    info!("   POST /api/users/login");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor detenido");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el manejador de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Señal de apagado recibida, cerrando servidor...");
}
