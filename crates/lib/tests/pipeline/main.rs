//! End-to-end tests for the release pipeline, using shell-script doubles for
//! the compiler and the signer.

#![cfg(unix)]

mod common;
