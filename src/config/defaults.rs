// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for the built-in
//! toast defaults and for the fixed styling values the component emits.
//!
//! # Categories
//!
//! - **Toast**: built-in option values restored by `reset_defaults`
//! - **Animation**: animation utility class naming
//! - **Layout**: container and toast inline style values

use super::position::Position;

// ==========================================================================
// Toast Defaults
// ==========================================================================

/// Default time a toast stays on screen (in milliseconds).
pub const DEFAULT_DURATION_MS: u64 = 2000;

/// Default screen position for new toasts.
pub const DEFAULT_POSITION: Position = Position::TopRight;

/// Clicking anywhere on a toast dismisses it by default.
pub const DEFAULT_CLOSE_ON_CLICK: bool = true;

/// Default toast opacity (0.0 to 1.0).
pub const DEFAULT_OPACITY: f32 = 1.0;

/// Multiple toasts may share a container by default.
pub const DEFAULT_SINGLE: bool = false;

/// Default container offset from each screen edge (in pixels).
pub const DEFAULT_OFFSET_PX: i32 = 0;

/// No extra classes are added by default.
pub const DEFAULT_EXTRA_CLASSES: &str = "";

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Prefix shared by every animation utility class.
pub const ANIMATION_CLASS_PREFIX: &str = "animate__";

/// Marker class enabling the animation utilities on an element.
pub const ANIMATED_CLASS: &str = "animate__animated";

/// Speed used when an entrance animation is set without one.
pub const DEFAULT_ANIMATION_SPEED: &str = "faster";

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Stacking order of toast containers.
pub const CONTAINER_Z_INDEX: u32 = 99999;

/// Inner padding of toast containers (in pixels).
pub const CONTAINER_PADDING_PX: u32 = 15;

/// Padding applied to toasts without a close button.
pub const TOAST_PADDING: &str = "1.25rem 1.5rem";

/// Class carried by every toast.
pub const NOTIFICATION_CLASS: &str = "notification";

/// Class of the close button on dismissible toasts.
pub const DELETE_CLASS: &str = "delete";
