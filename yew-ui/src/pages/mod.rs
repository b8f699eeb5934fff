// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod auth_callback;
pub mod home;
pub mod meeting;
pub mod sign_in;
