//! Unit tests for the submission module.

mod lifecycle_tests;
