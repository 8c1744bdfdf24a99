// SPDX-License-Identifier: MPL-2.0
//! `bulma_toast` shows auto-dismissing toast notifications in a document.
//!
//! Toasts use the Bulma `notification` and `delete` classes for their look
//! and the `animate__*` utility classes for entrance and exit animations.
//! The document and the event loop are both injected, so the same code runs
//! against virtual time in tests and on tokio timers in an application.

#![doc(html_root_url = "https://docs.rs/bulma_toast/0.1.0")]

pub mod config;
pub mod dom;
pub mod error;
pub mod notifications;
pub mod runtime;
