use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::{
    database::client::Db,
    entities::project::{
        project_entity::TABLE_NAME as PROJECT_TABLE_NAME,
        rating_entity::{Rating, RatingCreate, TABLE_NAME},
    },
    interfaces::repositories::rating_ifce::RatingRepositoryInterface,
    middleware::error::{AppError, AppResult},
};

#[derive(Debug)]
pub struct RatingRepository {
    client: Arc<Db>,
    table_name: &'static str,
}

impl RatingRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self {
            client,
            table_name: TABLE_NAME,
        }
    }

    pub(in crate::database) async fn mutate_db(&self) -> Result<(), AppError> {
        let table_name = self.table_name;
        let sql = format!("
        DEFINE TABLE IF NOT EXISTS {table_name} SCHEMAFULL;
        DEFINE FIELD IF NOT EXISTS project          ON TABLE {table_name} TYPE record<{PROJECT_TABLE_NAME}>;
        DEFINE INDEX IF NOT EXISTS project_idx      ON TABLE {table_name} COLUMNS project UNIQUE;
        DEFINE FIELD IF NOT EXISTS score            ON TABLE {table_name} TYPE float ASSERT $value >= 1 AND $value <= 5;
        DEFINE FIELD IF NOT EXISTS review           ON TABLE {table_name} TYPE option<string>;
        DEFINE FIELD IF NOT EXISTS categories       ON TABLE {table_name} FLEXIBLE TYPE option<object>;
        DEFINE FIELD IF NOT EXISTS suggestion       ON TABLE {table_name} TYPE option<string>;
        DEFINE FIELD IF NOT EXISTS job_title        ON TABLE {table_name} TYPE string;
        DEFINE FIELD IF NOT EXISTS freelancer_id    ON TABLE {table_name} TYPE option<string>;
        DEFINE INDEX IF NOT EXISTS freelancer_id_idx ON TABLE {table_name} COLUMNS freelancer_id;
        DEFINE FIELD IF NOT EXISTS freelancer_name  ON TABLE {table_name} TYPE option<string>;
        DEFINE FIELD IF NOT EXISTS client_email     ON TABLE {table_name} TYPE string;
        DEFINE FIELD IF NOT EXISTS created_at       ON TABLE {table_name} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
        DEFINE FIELD IF NOT EXISTS updated_at       ON TABLE {table_name} TYPE datetime VALUE time::now();
    ");
        let mutation = self.client.query(sql).await?;
        mutation.check()?;
        Ok(())
    }
}

#[async_trait]
impl RatingRepositoryInterface for RatingRepository {
    /// The record key is the project key, so a second create for the same project fails.
    async fn create(&self, data: RatingCreate) -> AppResult<Rating> {
        let key = data.project.id.to_raw();
        let res: Option<Rating> = self
            .client
            .create((self.table_name, key.as_str()))
            .content(data)
            .await?;
        res.ok_or(AppError::SurrealDbNoResult {
            source: "create".to_string(),
            id: key,
        })
    }

    async fn get_by_project(&self, project_id: &str) -> AppResult<Option<Rating>> {
        let res: Option<Rating> = self.client.select((self.table_name, project_id)).await?;
        Ok(res)
    }

    async fn get_by_projects(&self, project_ids: Vec<String>) -> AppResult<Vec<Rating>> {
        if project_ids.is_empty() {
            return Ok(vec![]);
        }
        let projects = project_ids
            .iter()
            .map(|id| Thing::from((PROJECT_TABLE_NAME, id.as_str())))
            .collect::<Vec<Thing>>();
        let query = format!("SELECT * FROM {} WHERE project IN $projects;", self.table_name);
        let mut res = self.client.query(query).bind(("projects", projects)).await?;
        Ok(res.take::<Vec<Rating>>(0)?)
    }

    async fn list(&self, start: u32, count: u16) -> AppResult<Vec<Rating>> {
        let query = format!(
            "SELECT * FROM {} ORDER BY created_at DESC LIMIT {count} START {start};",
            self.table_name
        );
        let mut res = self.client.query(query).await?;
        Ok(res.take::<Vec<Rating>>(0)?)
    }

    async fn average_score(&self) -> AppResult<Option<f64>> {
        let query = format!("SELECT VALUE score FROM {};", self.table_name);
        let mut res = self.client.query(query).await?;
        let scores = res.take::<Vec<f64>>(0)?;
        if scores.is_empty() {
            return Ok(None);
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        Ok(Some((mean * 10.0).round() / 10.0))
    }

    async fn delete_by_project(&self, project_id: &str) -> AppResult<()> {
        let _res: Option<Rating> = self.client.delete((self.table_name, project_id)).await?;
        Ok(())
    }
}
