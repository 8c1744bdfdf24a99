// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Toasts are short-lived `div.notification` elements stacked in fixed
//! containers, one container per screen position. They dismiss themselves
//! after a duration, on click, or through a close button.
//!
//! # Components
//!
//! - [`service`] - `ToastService`, the entry point owning defaults and containers
//! - [`toast`] - `Toast` element construction and dismissal
//! - [`container`] - `ContainerRegistry` and container placement styles
//!
//! # Usage
//!
//! ```
//! use bulma_toast::config::{Position, ToastOptions};
//! use bulma_toast::dom::Document;
//! use bulma_toast::notifications::ToastService;
//! use bulma_toast::runtime::{Runtime, VirtualLoop};
//!
//! let event_loop = VirtualLoop::new();
//! let service = ToastService::new(Document::new(), Runtime::from_virtual(&event_loop));
//!
//! let toast = service
//!     .toast(ToastOptions::new("Saved").with_position(Position::BottomCenter))
//!     .expect("message is set");
//! assert!(service.document().contains(&toast.element()));
//!
//! event_loop.advance_ms(2000);
//! assert!(toast.is_removed());
//! ```

pub mod container;
mod service;
mod toast;

pub use container::{container_style, placement_style, ContainerRegistry};
pub use service::ToastService;
pub use toast::{Lifecycle, Toast, ToastId};
