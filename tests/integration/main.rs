//! Integration tests for the Servia HTTP API.
//!
//! These tests run against a real Postgres database named by
//! `SERVIA_TEST_DATABASE_URL` and are skipped when it is unset. They
//! share one database and clean it between tests, so run them with
//! `--test-threads=1`.


mod login_test;
mod report_test;
mod session_test;
mod tenant_test;
