use crate::{ExecLog, ExecOp};

use std::sync::{Arc, Mutex};
use tabula::{Executor, Params, Result, Row};

/// An executor that records every query before delegating it.
pub struct LoggingExecutor {
    inner: Arc<dyn Executor + Send + Sync>,

    /// Shared with the [`ExecLog`] handles given out by [`Self::log`]
    ops_log: Arc<Mutex<Vec<ExecOp>>>,
}

impl LoggingExecutor {
    pub fn new(inner: Arc<dyn Executor + Send + Sync>) -> Self {
        Self {
            inner,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }
}

impl Executor for LoggingExecutor {
    fn query(
        &self,
        sql: &str,
        params: &Params,
        each: &mut dyn FnMut(&dyn Row) -> Result<()>,
    ) -> Result<()> {
        let mut rows = 0;

        let result = self.inner.query(sql, params, &mut |row| {
            rows += 1;
            each(row)
        });

        self.ops_log.lock().unwrap().push(ExecOp {
            sql: sql.to_string(),
            params: params.clone(),
            rows,
        });

        result
    }
}
