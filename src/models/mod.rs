// src/models/mod.rs

//! Domain models for the board change log.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod change;
mod config;
mod raw;
mod snapshot;
mod window;

// Re-export all public types
pub use change::{ChangeDetail, ChangeKind, ChangeRecord};
pub use config::{Config, DetectionConfig, GitHubConfig, LoggingConfig, OutputConfig};
pub use raw::{
    Connection, RawActor, RawBoard, RawCommentNode, RawContent, RawFieldRef, RawFieldValue,
    RawItem, RawLabel, RawRepository, RawTimelineNode,
};
pub use snapshot::{
    ContentInfo, EventPayload, ItemSnapshot, NO_STATUS, RawComment, RawEvent, SnapshotWarning,
};
pub use window::TimeWindow;
