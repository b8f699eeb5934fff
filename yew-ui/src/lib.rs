/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

#![cfg(target_arch = "wasm32")]

//! confab-ui library root.
//!
//! Re-exports public modules so that integration tests (under `tests/`)
//! can import components. The binary entry-point lives in `main.rs`.
//! Browser-only: compiles to an empty crate on non-wasm targets.

pub mod app;
pub mod auth_gate;
pub mod components;
pub mod constants;
pub mod context;
pub mod pages;
pub mod routing;

pub use routing::Route;
