use crate::middleware::ctx::Ctx;
use crate::middleware::error::{AppError, CtxResult};

pub const DEFAULT_PAGE_COUNT: u16 = 50;
pub const MAX_PAGE_COUNT: u16 = 200;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub count: u16,
    pub start: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            count: DEFAULT_PAGE_COUNT,
            start: 0,
        }
    }
}

impl Pagination {
    pub fn new(start: Option<u32>, count: Option<u16>) -> Self {
        Self {
            count: count.unwrap_or(DEFAULT_PAGE_COUNT).clamp(1, MAX_PAGE_COUNT),
            start: start.unwrap_or(0),
        }
    }

    /// `ORDER BY .. LIMIT .. START ..` tail, newest first.
    pub fn to_query_tail(&self) -> String {
        format!(
            "ORDER BY created_at DESC LIMIT {} START {}",
            self.count, self.start
        )
    }
}

pub fn with_not_found_err<T>(opt: Option<T>, ctx: &Ctx, ident: &str) -> CtxResult<T> {
    match opt {
        Some(res) => Ok(res),
        None => Err(ctx.to_ctx_error(AppError::EntityFailIdNotFound {
            ident: ident.to_string(),
        })),
    }
}
