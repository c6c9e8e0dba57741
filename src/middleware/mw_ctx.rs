use crate::config::AppConfig;
use crate::database::client::Database;
use crate::entities::project::project_status::TransitionPolicy;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

pub struct CtxState {
    pub db: Database,
    pub upload_max_size_mb: u64,
    pub transition_policy: TransitionPolicy,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtxState")
            .field("upload_max_size_mb", &self.upload_max_size_mb)
            .field("transition_policy", &self.transition_policy)
            .finish()
    }
}

pub fn create_ctx_state(db: Database, config: &AppConfig) -> Arc<CtxState> {
    let ctx_state = CtxState {
        db,
        upload_max_size_mb: config.upload_file_size_max_mb,
        transition_policy: config.transition_policy,
    };
    Arc::new(ctx_state)
}
