//! Unit tests for the task module.

mod history_tests;
mod visibility_tests;
