mod db;
mod support;

pub use self::{
    db::{Connection, Database, Pool, Pooled, setup_db},
    support::{TestResult, run_test, run_test_with_pool},
};
