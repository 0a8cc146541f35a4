use std::sync::{Arc, Mutex};
use tabula::{Params, Value};

/// One query sent to the database.
#[derive(Debug, Clone)]
pub struct ExecOp {
    pub sql: String,
    pub params: Params,
    pub rows: usize,
}

/// A handle onto the queries a [`LoggingExecutor`](crate::LoggingExecutor)
/// has run.
#[derive(Clone)]
pub struct ExecLog {
    ops: Arc<Mutex<Vec<ExecOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<ExecOp>>>) -> Self {
        Self { ops }
    }

    /// Number of logged queries
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// The SQL of every logged query, in execution order
    pub fn sql(&self) -> Vec<String> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.sql.clone())
            .collect()
    }

    /// Count queries whose SQL contains `fragment`
    pub fn count_containing(&self, fragment: &str) -> usize {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| op.sql.contains(fragment))
            .count()
    }

    /// The number of items bound to the list parameter `name` of each query
    pub fn list_lens(&self, name: &str) -> Vec<usize> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter_map(|op| op.params.get(name).and_then(Value::as_list).map(<[_]>::len))
            .collect()
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    /// Remove and return the first logged query
    pub fn pop(&self) -> Option<ExecOp> {
        let mut ops = self.ops.lock().unwrap();
        if ops.is_empty() {
            None
        } else {
            Some(ops.remove(0))
        }
    }
}
