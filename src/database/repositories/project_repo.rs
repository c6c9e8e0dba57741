use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use surrealdb::sql::Thing;

use crate::{
    database::client::Db,
    entities::project::{
        project_entity::{
            Assignee, ProgressPatch, Project, ProjectCreate, ProjectDetailsPatch, ProjectFilter,
            SubmissionCreate, TABLE_NAME,
        },
        project_status::ProjectStatus,
    },
    interfaces::repositories::project_ifce::ProjectRepositoryInterface,
    middleware::error::{AppError, AppResult},
};

#[derive(Debug)]
pub struct ProjectRepository {
    client: Arc<Db>,
    table_name: &'static str,
}

impl ProjectRepository {
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
        DEFINE FIELD IF NOT EXISTS title                ON TABLE {table_name} TYPE string ASSERT string::len(string::trim($value)) > 0;
        DEFINE FIELD IF NOT EXISTS description          ON TABLE {table_name} TYPE string DEFAULT '';
        DEFINE FIELD IF NOT EXISTS skills               ON TABLE {table_name} TYPE array<string> DEFAULT [];
        DEFINE FIELD IF NOT EXISTS requirements         ON TABLE {table_name} TYPE option<string>;
        DEFINE FIELD IF NOT EXISTS budget_from          ON TABLE {table_name} TYPE option<int>;
        DEFINE FIELD IF NOT EXISTS budget_to            ON TABLE {table_name} TYPE option<int>;
        DEFINE FIELD IF NOT EXISTS deadline             ON TABLE {table_name} TYPE option<string>;
        DEFINE FIELD IF NOT EXISTS duration_days        ON TABLE {table_name} TYPE option<int>;
        DEFINE FIELD IF NOT EXISTS client_email         ON TABLE {table_name} TYPE string;
        DEFINE INDEX IF NOT EXISTS client_email_idx     ON TABLE {table_name} COLUMNS client_email;
        DEFINE FIELD IF NOT EXISTS client_name          ON TABLE {table_name} TYPE option<string>;
        DEFINE FIELD IF NOT EXISTS selected_freelancer  ON TABLE {table_name} FLEXIBLE TYPE option<object>;
        DEFINE FIELD IF NOT EXISTS freelancer_id        ON TABLE {table_name} TYPE option<string>;
        DEFINE INDEX IF NOT EXISTS freelancer_id_idx    ON TABLE {table_name} COLUMNS freelancer_id;
        DEFINE FIELD IF NOT EXISTS status               ON TABLE {table_name} TYPE string;
        DEFINE INDEX IF NOT EXISTS status_idx           ON TABLE {table_name} COLUMNS status;
        DEFINE FIELD IF NOT EXISTS progress             ON TABLE {table_name} TYPE int DEFAULT 0 ASSERT $value >= 0 AND $value <= 100;
        DEFINE FIELD IF NOT EXISTS submission           ON TABLE {table_name} FLEXIBLE TYPE option<object>;
        DEFINE FIELD IF NOT EXISTS rating               ON TABLE {table_name} TYPE option<float>;
        DEFINE FIELD IF NOT EXISTS review               ON TABLE {table_name} TYPE option<string>;
        DEFINE FIELD IF NOT EXISTS rated_at             ON TABLE {table_name} TYPE option<datetime>;
        DEFINE FIELD IF NOT EXISTS created_at           ON TABLE {table_name} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
        DEFINE FIELD IF NOT EXISTS updated_at           ON TABLE {table_name} TYPE datetime VALUE time::now();
    ");
        let mutation = self.client.query(sql).await?;
        mutation.check()?;
        Ok(())
    }

    fn thing(&self, project_id: &str) -> Thing {
        Thing::from((self.table_name, project_id))
    }
}

const STORED_STATUS: &str = "string::lowercase(string::trim(status))";

/// `WHERE` fragment matching any stored spelling of `statuses`, bound as `$param`.
/// Unknown stored values read as Pending, so a set holding Pending is written as
/// the complement of the other statuses.
fn status_condition(param: &str, statuses: &[ProjectStatus]) -> (String, Vec<String>) {
    if statuses.contains(&ProjectStatus::Pending) {
        let others = ProjectStatus::ALL
            .into_iter()
            .filter(|s| !statuses.contains(s))
            .collect::<Vec<ProjectStatus>>();
        (
            format!("{STORED_STATUS} NOTINSIDE ${param}"),
            ProjectStatus::stored_spellings(&others),
        )
    } else {
        (
            format!("{STORED_STATUS} INSIDE ${param}"),
            ProjectStatus::stored_spellings(statuses),
        )
    }
}

/// Guard for a conditional update on the current status, `None` leaves it unguarded.
fn status_guard(allowed_from: Option<Vec<ProjectStatus>>) -> (String, Vec<String>) {
    match allowed_from {
        Some(allowed_from) => status_condition("allowed_from", &allowed_from),
        None => ("true".to_string(), vec![]),
    }
}

#[derive(Debug, Deserialize)]
struct StatusCount {
    status: ProjectStatus,
    count: u64,
}

#[async_trait]
impl ProjectRepositoryInterface for ProjectRepository {
    async fn create(&self, data: ProjectCreate) -> AppResult<Project> {
        let res: Option<Project> = self.client.create(self.table_name).content(data).await?;
        res.ok_or(AppError::SurrealDbNoResult {
            source: "create".to_string(),
            id: self.table_name.to_string(),
        })
    }

    async fn get(&self, project_id: &str) -> AppResult<Option<Project>> {
        let res: Option<Project> = self.client.select((self.table_name, project_id)).await?;
        Ok(res)
    }

    async fn list(&self, filter: ProjectFilter) -> AppResult<Vec<Project>> {
        let (status_filter, statuses) = match filter.status {
            Some(status) => status_condition("statuses", &[status]),
            None => (String::new(), vec![]),
        };
        let mut conditions: Vec<&str> = vec![];
        if filter.client_email.is_some() {
            conditions.push("client_email = $client_email");
        }
        if filter.freelancer_id.is_some() {
            conditions.push("freelancer_id = $freelancer_id");
        }
        if filter.status.is_some() {
            conditions.push(&status_filter);
        }
        if filter.unassigned_only {
            conditions.push("selected_freelancer IS NONE");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT * FROM {} {where_clause} {};",
            self.table_name,
            filter.pagination.to_query_tail()
        );
        let mut res = self
            .client
            .query(query)
            .bind(("client_email", filter.client_email))
            .bind(("freelancer_id", filter.freelancer_id))
            .bind(("statuses", statuses))
            .await?;
        Ok(res.take::<Vec<Project>>(0)?)
    }

    async fn count_by_status(&self) -> AppResult<Vec<(ProjectStatus, u64)>> {
        let query = format!(
            "SELECT status, count() AS count FROM {} GROUP BY status;",
            self.table_name
        );
        let mut res = self.client.query(query).await?;
        let rows = res.take::<Vec<StatusCount>>(0)?;

        // legacy spellings fold into their canonical bucket
        let mut counts: HashMap<ProjectStatus, u64> = HashMap::new();
        for row in rows {
            *counts.entry(row.status).or_default() += row.count;
        }
        Ok(ProjectStatus::ALL
            .into_iter()
            .map(|s| (s, counts.get(&s).copied().unwrap_or(0)))
            .collect())
    }

    async fn update_details(
        &self,
        project_id: &str,
        patch: ProjectDetailsPatch,
    ) -> AppResult<Option<Project>> {
        let mut res = self
            .client
            .query("UPDATE $id MERGE $patch RETURN AFTER;")
            .bind(("id", self.thing(project_id)))
            .bind(("patch", patch))
            .await?;
        Ok(res.take::<Option<Project>>(0)?)
    }

    async fn delete(&self, project_id: &str) -> AppResult<Option<Project>> {
        let mut res = self
            .client
            .query("DELETE $id RETURN BEFORE;")
            .bind(("id", self.thing(project_id)))
            .await?;
        Ok(res.take::<Option<Project>>(0)?)
    }

    async fn assign(
        &self,
        project_id: &str,
        assignee: Assignee,
        allowed_from: Option<Vec<ProjectStatus>>,
    ) -> AppResult<Option<Project>> {
        let (guard, allowed_from) = status_guard(allowed_from);
        let query = format!(
            "UPDATE $id SET
                selected_freelancer = $assignee,
                freelancer_id = $freelancer_id,
                status = $status
            WHERE selected_freelancer IS NONE AND {guard}
            RETURN AFTER;"
        );
        let mut res = self
            .client
            .query(query)
            .bind(("id", self.thing(project_id)))
            .bind(("freelancer_id", assignee.id.clone()))
            .bind(("assignee", assignee))
            .bind(("status", ProjectStatus::Assigned.to_string()))
            .bind(("allowed_from", allowed_from))
            .await?;
        Ok(res.take::<Option<Project>>(0)?)
    }

    async fn update_progress(
        &self,
        project_id: &str,
        patch: ProgressPatch,
        allowed_from: Option<Vec<ProjectStatus>>,
    ) -> AppResult<Option<Project>> {
        let (guard, allowed_from) = status_guard(allowed_from);
        let query = format!("UPDATE $id MERGE $patch WHERE {guard} RETURN AFTER;");
        let mut res = self
            .client
            .query(query)
            .bind(("id", self.thing(project_id)))
            .bind(("patch", patch))
            .bind(("allowed_from", allowed_from))
            .await?;
        Ok(res.take::<Option<Project>>(0)?)
    }

    async fn submit(
        &self,
        project_id: &str,
        submission: SubmissionCreate,
        allowed_from: Option<Vec<ProjectStatus>>,
    ) -> AppResult<Option<Project>> {
        let (guard, allowed_from) = status_guard(allowed_from);
        let query = format!(
            "UPDATE $id SET
                status = $status,
                progress = 100,
                submission = {{
                    link: $link,
                    file: $file,
                    file_name: $file_name,
                    note: $note,
                    submitted_at: time::now()
                }}
            WHERE {guard}
            RETURN AFTER;"
        );
        let mut res = self
            .client
            .query(query)
            .bind(("id", self.thing(project_id)))
            .bind(("status", ProjectStatus::Completed.to_string()))
            .bind(("link", submission.link))
            .bind(("file", submission.file))
            .bind(("file_name", submission.file_name))
            .bind(("note", submission.note))
            .bind(("allowed_from", allowed_from))
            .await?;
        Ok(res.take::<Option<Project>>(0)?)
    }

    async fn set_rating_summary(
        &self,
        project_id: &str,
        score: f64,
        review: Option<String>,
        allowed_from: Option<Vec<ProjectStatus>>,
    ) -> AppResult<Option<Project>> {
        let (guard, allowed_from) = status_guard(allowed_from);
        let query = format!(
            "UPDATE $id SET rating = $score, review = $review, rated_at = time::now()
            WHERE rated_at IS NONE AND {guard}
            RETURN AFTER;"
        );
        let mut res = self
            .client
            .query(query)
            .bind(("id", self.thing(project_id)))
            .bind(("score", score))
            .bind(("review", review))
            .bind(("allowed_from", allowed_from))
            .await?;
        Ok(res.take::<Option<Project>>(0)?)
    }

    async fn clear_rating_summary(&self, project_id: &str) -> AppResult<()> {
        self.client
            .query("UPDATE $id UNSET rating, review, rated_at;")
            .bind(("id", self.thing(project_id)))
            .await?
            .check()?;
        Ok(())
    }
}
