//! Core library for the Asset Generator.
//!
//! A run loads a declarative [`RootConfig`], then walks its asset collections
//! and drives an external rasterizer and video encoder through the
//! [`Renderer`] capability to write placeholder PNG, MP4 and WebM files. Each
//! module owns one step: configuration loading, output layout, overlay text,
//! tool invocation, frame/clip composition and the driver loop.

pub mod assets;
pub mod compose;
pub mod config;
pub mod driver;
pub mod error;
pub mod overlay;
pub mod render;

pub use assets::{collection_folder, delete_file, ensure_folder, DEFAULT_ASSET_ROOT};
pub use compose::{compose_video, render_png, CrossFade, MediaFormat};
pub use config::{AssetCollection, Bucket, ImageSpec, MediaSpec, Options, RootConfig, SizePreset};
pub use driver::{generate, AssetKind, KindBucket, RunSummary};
pub use error::{AssetGenError, Result};
pub use render::{CommandRenderer, ImageJob, Renderer, ToolConfig, VideoJob};
