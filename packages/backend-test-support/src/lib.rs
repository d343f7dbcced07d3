//! Helpers shared by the backend integration tests: one-time logging setup
//! and Problem Details assertions.

pub mod problem_details;
pub mod test_logging;
