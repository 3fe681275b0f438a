//! Integration tests driving the `crossrel` binary against tool doubles.

#![cfg(unix)]

mod build_tests;
