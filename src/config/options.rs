// SPDX-License-Identifier: MPL-2.0
//! Toast options and their resolution into a concrete configuration.
//!
//! [`ToastOptions`] is a partial mapping: every field may be absent. Layers
//! of options are combined with [`ToastOptions::merge`], a shallow merge in
//! which any field set on the overriding layer wins. [`ToastConfig`] is the
//! fully resolved result a toast is built from.

use super::defaults::{
    ANIMATION_CLASS_PREFIX, DEFAULT_ANIMATION_SPEED, DEFAULT_CLOSE_ON_CLICK,
    DEFAULT_DURATION_MS, DEFAULT_EXTRA_CLASSES, DEFAULT_OFFSET_PX, DEFAULT_OPACITY,
    DEFAULT_POSITION, DEFAULT_SINGLE,
};
use super::position::{Offsets, Position};
use crate::dom::Node;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Content of a toast.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Trusted markup, parsed and inserted as HTML. Sanitizing it is the
    /// caller's job.
    Markup(String),
    /// A node inserted as-is.
    Node(Node),
}

impl Message {
    /// Empty markup counts as no message at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Message::Markup(markup) if markup.is_empty())
    }
}

impl From<&str> for Message {
    fn from(markup: &str) -> Self {
        Message::Markup(markup.to_string())
    }
}

impl From<String> for Message {
    fn from(markup: String) -> Self {
        Message::Markup(markup)
    }
}

impl From<Node> for Message {
    fn from(node: Node) -> Self {
        Message::Node(node)
    }
}

/// Entrance/exit animation names from the animation utility classes,
/// without their `animate__` prefix (e.g. `fadeIn`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub entrance: Option<String>,
    #[serde(rename = "out", default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
}

impl Animation {
    #[must_use]
    pub fn new(entrance: impl Into<String>, exit: impl Into<String>) -> Self {
        Self {
            entrance: Some(entrance.into()),
            exit: Some(exit.into()),
            speed: None,
        }
    }

    #[must_use]
    pub fn with_speed(mut self, speed: impl Into<String>) -> Self {
        self.speed = Some(speed.into());
        self
    }

    #[must_use]
    pub fn entrance_class(&self) -> Option<String> {
        prefixed(self.entrance.as_deref())
    }

    #[must_use]
    pub fn exit_class(&self) -> Option<String> {
        prefixed(self.exit.as_deref())
    }

    #[must_use]
    pub fn speed_class(&self) -> String {
        let speed = self
            .speed
            .as_deref()
            .filter(|speed| !speed.is_empty())
            .unwrap_or(DEFAULT_ANIMATION_SPEED);
        format!("{ANIMATION_CLASS_PREFIX}{speed}")
    }
}

fn prefixed(name: Option<&str>) -> Option<String> {
    name.filter(|name| !name.is_empty())
        .map(|name| format!("{ANIMATION_CLASS_PREFIX}{name}"))
}

/// A partial toast configuration.
///
/// Field names serialize in camelCase (`closeOnClick`, `offsetTop`, ...).
/// The mount node and the message cannot be persisted and are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastOptions {
    /// Lifetime in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_on_click: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_top: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_bottom: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_left: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_right: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_classes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_on_hover: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animate: Option<Animation>,
    /// Node the container is appended to instead of the document body.
    #[serde(skip)]
    pub append_to: Option<Node>,
    #[serde(skip)]
    pub message: Option<Message>,
}

impl ToastOptions {
    /// Options carrying only a message.
    pub fn new(message: impl Into<Message>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// The built-in defaults.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            duration: Some(DEFAULT_DURATION_MS),
            position: Some(DEFAULT_POSITION),
            close_on_click: Some(DEFAULT_CLOSE_ON_CLICK),
            opacity: Some(DEFAULT_OPACITY),
            single: Some(DEFAULT_SINGLE),
            offset_top: Some(DEFAULT_OFFSET_PX),
            offset_bottom: Some(DEFAULT_OFFSET_PX),
            offset_left: Some(DEFAULT_OFFSET_PX),
            offset_right: Some(DEFAULT_OFFSET_PX),
            extra_classes: Some(DEFAULT_EXTRA_CLASSES.to_string()),
            ..Self::default()
        }
    }

    /// Returns `self` with every field set in `overrides` replaced.
    ///
    /// The merge is shallow: an overriding `animate` replaces the whole
    /// descriptor.
    #[must_use]
    pub fn merge(&self, overrides: &ToastOptions) -> ToastOptions {
        fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
            over.clone().or_else(|| base.clone())
        }

        ToastOptions {
            duration: pick(&self.duration, &overrides.duration),
            position: pick(&self.position, &overrides.position),
            close_on_click: pick(&self.close_on_click, &overrides.close_on_click),
            opacity: pick(&self.opacity, &overrides.opacity),
            single: pick(&self.single, &overrides.single),
            offset_top: pick(&self.offset_top, &overrides.offset_top),
            offset_bottom: pick(&self.offset_bottom, &overrides.offset_bottom),
            offset_left: pick(&self.offset_left, &overrides.offset_left),
            offset_right: pick(&self.offset_right, &overrides.offset_right),
            extra_classes: pick(&self.extra_classes, &overrides.extra_classes),
            dismissible: pick(&self.dismissible, &overrides.dismissible),
            pause_on_hover: pick(&self.pause_on_hover, &overrides.pause_on_hover),
            animate: pick(&self.animate, &overrides.animate),
            append_to: pick(&self.append_to, &overrides.append_to),
            message: pick(&self.message, &overrides.message),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the lifetime in milliseconds.
    #[must_use]
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_close_on_click(mut self, close_on_click: bool) -> Self {
        self.close_on_click = Some(close_on_click);
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn with_single(mut self, single: bool) -> Self {
        self.single = Some(single);
        self
    }

    #[must_use]
    pub fn with_offsets(mut self, offsets: Offsets) -> Self {
        self.offset_top = Some(offsets.top);
        self.offset_bottom = Some(offsets.bottom);
        self.offset_left = Some(offsets.left);
        self.offset_right = Some(offsets.right);
        self
    }

    #[must_use]
    pub fn with_extra_classes(mut self, classes: impl Into<String>) -> Self {
        self.extra_classes = Some(classes.into());
        self
    }

    #[must_use]
    pub fn with_dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    #[must_use]
    pub fn with_pause_on_hover(mut self, pause_on_hover: bool) -> Self {
        self.pause_on_hover = Some(pause_on_hover);
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animate = Some(animation);
        self
    }

    #[must_use]
    pub fn with_append_to(mut self, mount: Node) -> Self {
        self.append_to = Some(mount);
        self
    }
}

/// Fully resolved configuration for one toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastConfig {
    pub duration: Duration,
    pub position: Position,
    pub close_on_click: bool,
    pub opacity: f32,
    pub single: bool,
    pub offsets: Offsets,
    pub extra_classes: String,
    pub dismissible: bool,
    pub pause_on_hover: bool,
    pub animate: Option<Animation>,
    pub append_to: Option<Node>,
    pub message: Message,
}

impl ToastConfig {
    /// Resolves merged options, falling back to the built-in value for any
    /// field still unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMessage`] when no message (or empty markup)
    /// is given.
    pub fn resolve(options: &ToastOptions) -> Result<Self> {
        let message = options
            .message
            .clone()
            .filter(|message| !message.is_empty())
            .ok_or(Error::MissingMessage)?;

        Ok(Self {
            duration: Duration::from_millis(options.duration.unwrap_or(DEFAULT_DURATION_MS)),
            position: options.position.unwrap_or(DEFAULT_POSITION),
            close_on_click: options.close_on_click.unwrap_or(DEFAULT_CLOSE_ON_CLICK),
            opacity: options.opacity.unwrap_or(DEFAULT_OPACITY),
            single: options.single.unwrap_or(DEFAULT_SINGLE),
            offsets: Offsets {
                top: options.offset_top.unwrap_or(DEFAULT_OFFSET_PX),
                bottom: options.offset_bottom.unwrap_or(DEFAULT_OFFSET_PX),
                left: options.offset_left.unwrap_or(DEFAULT_OFFSET_PX),
                right: options.offset_right.unwrap_or(DEFAULT_OFFSET_PX),
            },
            extra_classes: options
                .extra_classes
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTRA_CLASSES.to_string()),
            dismissible: options.dismissible.unwrap_or(false),
            pause_on_hover: options.pause_on_hover.unwrap_or(false),
            animate: options.animate.clone(),
            append_to: options.append_to.clone(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_matches_documented_defaults() {
        let builtin = ToastOptions::builtin();
        assert_eq!(builtin.duration, Some(2000));
        assert_eq!(builtin.position, Some(Position::TopRight));
        assert_eq!(builtin.close_on_click, Some(true));
        assert_eq!(builtin.opacity, Some(1.0));
        assert_eq!(builtin.single, Some(false));
        assert_eq!(builtin.offset_top, Some(0));
        assert_eq!(builtin.extra_classes.as_deref(), Some(""));
        assert!(builtin.dismissible.is_none());
        assert!(builtin.pause_on_hover.is_none());
        assert!(builtin.animate.is_none());
        assert!(builtin.message.is_none());
    }

    #[test]
    fn merge_prefers_overrides_key_by_key() {
        let base = ToastOptions::builtin();
        let overrides = ToastOptions::new("Saved")
            .with_duration(500)
            .with_position(Position::BottomLeft);

        let merged = base.merge(&overrides);

        assert_eq!(merged.duration, Some(500));
        assert_eq!(merged.position, Some(Position::BottomLeft));
        assert_eq!(merged.close_on_click, Some(true));
        assert_eq!(merged.message, Some(Message::from("Saved")));
    }

    #[test]
    fn merge_does_not_touch_the_base() {
        let base = ToastOptions::builtin();
        let _ = base.merge(&ToastOptions::default().with_duration(1));
        assert_eq!(base.duration, Some(2000));
    }

    #[test]
    fn merge_replaces_animation_wholesale() {
        let base = ToastOptions::default()
            .with_animation(Animation::new("fadeIn", "fadeOut").with_speed("slow"));
        let overrides = ToastOptions::default().with_animation(Animation {
            entrance: Some("bounceIn".into()),
            ..Animation::default()
        });

        let animate = base.merge(&overrides).animate.unwrap();
        assert_eq!(animate.entrance.as_deref(), Some("bounceIn"));
        assert!(animate.exit.is_none());
        assert!(animate.speed.is_none());
    }

    #[test]
    fn resolve_requires_message() {
        let err = ToastConfig::resolve(&ToastOptions::builtin()).unwrap_err();
        assert!(matches!(err, Error::MissingMessage));
    }

    #[test]
    fn resolve_rejects_empty_markup() {
        let err = ToastConfig::resolve(&ToastOptions::new("")).unwrap_err();
        assert!(matches!(err, Error::MissingMessage));
    }

    #[test]
    fn resolve_fills_unset_flags() {
        let config = ToastConfig::resolve(&ToastOptions::new("hi")).unwrap();
        assert_eq!(config.duration, Duration::from_millis(2000));
        assert_eq!(config.position, Position::TopRight);
        assert!(config.close_on_click);
        assert!(!config.dismissible);
        assert!(!config.pause_on_hover);
        assert_eq!(config.offsets, Offsets::default());
    }

    #[test]
    fn animation_class_names() {
        let animation = Animation::new("fadeIn", "fadeOut");
        assert_eq!(animation.entrance_class().as_deref(), Some("animate__fadeIn"));
        assert_eq!(animation.exit_class().as_deref(), Some("animate__fadeOut"));
        assert_eq!(animation.speed_class(), "animate__faster");
        assert_eq!(animation.with_speed("slow").speed_class(), "animate__slow");
    }

    #[test]
    fn empty_animation_names_are_ignored() {
        let animation = Animation::new("", "");
        assert!(animation.entrance_class().is_none());
        assert!(animation.exit_class().is_none());
    }

    #[test]
    fn options_read_camel_case_toml() {
        let options: ToastOptions = toml::from_str(
            r#"
            duration = 3500
            position = "bottom-center"
            closeOnClick = false
            offsetTop = 12
            extraClasses = "is-success is-light"
            pauseOnHover = true

            [animate]
            in = "fadeIn"
            out = "fadeOut"
            "#,
        )
        .unwrap();

        assert_eq!(options.duration, Some(3500));
        assert_eq!(options.position, Some(Position::BottomCenter));
        assert_eq!(options.close_on_click, Some(false));
        assert_eq!(options.offset_top, Some(12));
        assert_eq!(options.extra_classes.as_deref(), Some("is-success is-light"));
        assert_eq!(options.pause_on_hover, Some(true));
        assert_eq!(options.animate, Some(Animation::new("fadeIn", "fadeOut")));
        assert!(options.message.is_none());
    }
}
