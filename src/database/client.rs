use std::sync::Arc;

use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::info;

use crate::database::repositories::project_repo::ProjectRepository;
use crate::database::repositories::rating_repo::RatingRepository;
use crate::middleware::error::AppResult;

pub type Db = Surreal<Any>;

#[derive(Debug)]
pub struct DbConfig<'a> {
    pub url: &'a str,
    pub database: &'a str,
    pub namespace: &'a str,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

/// Store handle owned by the server state. Opened once in `main`, closed on shutdown.
#[derive(Debug)]
pub struct Database {
    pub client: Arc<Db>,
    pub projects: ProjectRepository,
    pub ratings: RatingRepository,
}

impl Database {
    pub async fn connect(config: DbConfig<'_>) -> AppResult<Self> {
        info!(
            "->> connecting DB url={} ns={} db={}",
            config.url, config.namespace, config.database
        );
        let conn = connect(config.url).await?;

        if let (Some(password), Some(username)) = (config.password, config.username) {
            conn.signin(Root { username, password }).await?;
        }

        conn.use_ns(config.namespace)
            .use_db(config.database)
            .await?;

        let version = conn.version().await?;
        info!("->> connected DB version: {version}");

        let client = Arc::new(conn);
        Ok(Self {
            projects: ProjectRepository::new(client.clone()),
            ratings: RatingRepository::new(client.clone()),
            client,
        })
    }

    pub async fn run_migrations(&self) -> AppResult<()> {
        self.projects.mutate_db().await?;
        self.ratings.mutate_db().await?;
        Ok(())
    }

    /// Drops the database, used by tests after each run.
    pub async fn remove_database(&self, database: &str) -> AppResult<()> {
        self.client
            .query(format!("REMOVE DATABASE IF EXISTS {database};"))
            .await?
            .check()?;
        Ok(())
    }

    pub async fn close(self) -> AppResult<()> {
        self.client.invalidate().await?;
        info!("->> DB connection closed");
        Ok(())
    }
}
