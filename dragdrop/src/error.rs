// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for the drag and drop runtime.
//!
//! Only configuration and registry operations fail. Input handling never
//! returns an error: an input that cannot be used is ignored.

use thiserror::Error;

use crate::dropzone::DropzoneId;
use dragdrop_event_state::session::DraggableId;

/// Errors returned by [`DragDrop`](crate::DragDrop) registry operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The draggable was never attached or has been detached.
    #[error("unknown draggable: {0}")]
    UnknownDraggable(DraggableId),

    /// The dropzone was never attached or has been detached.
    #[error("unknown dropzone: {0}")]
    UnknownDropzone(DropzoneId),

    /// The minimum drag start distance is negative or not finite.
    #[error("invalid minimum drag start distance: {0}")]
    InvalidMinDragStartDistance(f64),

    /// A selector option was set to an empty string.
    #[error("empty selector for `{option}`")]
    EmptySelector {
        /// Name of the option.
        option: &'static str,
    },

    /// A class name option is empty or contains whitespace.
    #[error("invalid class name {value:?} for `{option}`")]
    InvalidClassName {
        /// Name of the option.
        option: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Auto-scroll margin or step is not a positive finite number.
    #[error("auto-scroll margin and step must be positive and finite")]
    InvalidAutoScroll,
}

/// Result type for registry operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Failure to clear the text selection of the focused element.
///
/// Hosts report this when the focused control has no selection range, for
/// example a file input. The runtime logs it and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The focused element does not support selection ranges.
    #[error("element does not support selection ranges")]
    Unsupported,
}

pub(crate) fn check_selector(option: &'static str, value: Option<&str>) -> Result<()> {
    match value {
        Some(selector) if selector.trim().is_empty() => Err(Error::EmptySelector { option }),
        _ => Ok(()),
    }
}

pub(crate) fn check_class(option: &'static str, value: Option<&str>) -> Result<()> {
    match value {
        Some(class) if class.is_empty() || class.chars().any(char::is_whitespace) => {
            Err(Error::InvalidClassName {
                option,
                value: class.to_owned(),
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_must_not_be_blank() {
        assert!(check_selector("handle", None).is_ok());
        assert!(check_selector("handle", Some(".grip")).is_ok());
        assert_eq!(
            check_selector("cancel", Some("  ")),
            Err(Error::EmptySelector { option: "cancel" })
        );
    }

    #[test]
    fn class_names_are_single_tokens() {
        assert!(check_class("over_class", Some("dragging--over")).is_ok());
        assert!(check_class("over_class", None).is_ok());
        assert_eq!(
            check_class("over_class", Some("a b")),
            Err(Error::InvalidClassName {
                option: "over_class",
                value: "a b".into(),
            })
        );
        assert!(check_class("dragging_class", Some("")).is_err());
    }

    #[test]
    fn messages_name_the_offending_option() {
        let err = Error::EmptySelector { option: "handle" };
        assert_eq!(err.to_string(), "empty selector for `handle`");
        let err = Error::UnknownDraggable(DraggableId::new(3));
        assert_eq!(err.to_string(), "unknown draggable: draggable#3");
    }
}
