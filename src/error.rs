//! Centralized error types for the planner.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach.

use std::io;

use bevy_ecs::event::Event;

/// Main error type for the planner.
///
/// This is the primary error type that should be used in public APIs.
/// It is also registered as an ECS event so systems can report failures without aborting the frame.
#[derive(thiserror::Error, Debug, Event)]
pub enum EditorError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Plot error: {0}")]
    Plot(#[from] PlotError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Asset not found: {0}")]
    NotFound(String),
}

/// Platform-specific errors.
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("Console initialization failed: {0}")]
    ConsoleInit(String),

    #[error("Export failed: {0}")]
    Export(String),
}

/// Errors raised while reading, validating or writing plot documents.
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    #[error("Malformed plot document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown terrain: {0}")]
    UnknownTerrain(String),

    #[error("Grid for {level} is {found_width}x{found_height}, expected {width}x{height}")]
    DimensionMismatch {
        level: String,
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },

    #[error("Grid row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("Grid must have at least one row and one column")]
    EmptyGrid,

    #[error("Plot is {width}x{height} cells, sides are limited to {max}", max = crate::config::MAX_GRID_SIDE)]
    TooLarge { width: usize, height: usize },

    #[error("Please enter a plot name")]
    MissingName,
}

/// Errors raised while loading the layered configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
