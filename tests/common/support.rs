//! Support framework.
//!
//! This module contains various utilities used by the test suites.

use failure::Error;

use super::db::{Connection, Database, Pool};

/// Only types implementing this trait can be returned from test functions.
pub trait TestResult {
    /// Convert this value into a test result.
    fn into_result(self) -> Result<(), Error>;
}

impl<T, E> TestResult for Result<T, E>
where
    Error: From<E>,
{
    fn into_result(self) -> Result<(), Error> {
        self.map(|_| ()).map_err(From::from)
    }
}

impl TestResult for () {
    fn into_result(self) -> Result<(), Error> {
        Ok(self)
    }
}

/// Run a test case against a freshly re-seeded database.
pub fn run_test<F, R>(db: &Database, test: F)
where
    F: FnOnce(&Connection) -> R,
    R: TestResult,
{
    let _ = env_logger::builder().is_test(true).try_init();

    match db.lock(|pool| {
        let conn = pool.get()?;
        test(&conn).into_result()
    }) {
        Ok(_) => (),
        Err(err) => panic!("{}", err),
    }
}

/// Run a test case that needs the whole connection pool, for instance to
/// exercise concurrent writers.
pub fn run_test_with_pool<F, R>(db: &Database, test: F)
where
    F: FnOnce(&Pool) -> R,
    R: TestResult,
{
    let _ = env_logger::builder().is_test(true).try_init();

    match db.lock(|pool| test(&pool).into_result()) {
        Ok(_) => (),
        Err(err) => panic!("{}", err),
    }
}
