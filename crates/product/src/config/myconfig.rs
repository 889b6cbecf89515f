use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub grpc_port: u16,
    pub db_min_connections: u32,
    pub db_max_connections: u32,
    pub run_migrations: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let grpc_port = std::env::var("PORT")
            .context("Missing environment variable: PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_min_connections = match std::env::var("DB_MIN_CONNECTIONS") {
            Ok(raw) => raw
                .parse::<u32>()
                .context("DB_MIN_CONNECTIONS must be a valid u32 integer")?,
            Err(_) => 1,
        };

        let db_max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a valid u32 integer")?,
            Err(_) => 5,
        };

        let run_migrations = match std::env::var("RUN_MIGRATIONS") {
            Ok(raw) => match raw.as_str() {
                "true" => true,
                "false" => false,
                other => {
                    return Err(anyhow!(
                        "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                        other
                    ));
                }
            },
            Err(_) => true,
        };

        Ok(Self {
            database_url,
            grpc_port,
            db_min_connections,
            db_max_connections,
            run_migrations,
        })
    }
}
