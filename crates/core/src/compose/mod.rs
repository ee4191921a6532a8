use std::{fmt, path::Path, path::PathBuf};

use crate::{
    assets,
    overlay::{overlay_text, point_size},
    render::{ImageJob, Renderer, VideoJob},
    ImageSpec, MediaSpec, Result, RootConfig,
};

/// Container formats a transition clip can be encoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFormat {
    Mp4,
    Webm,
}

impl MediaFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
        }
    }

    /// Whether the container carries an alpha channel. Also decides whether
    /// the start and end frames are rendered transparent.
    pub fn supports_alpha(self) -> bool {
        matches!(self, Self::Webm)
    }

    pub fn pixel_format(self) -> &'static str {
        if self.supports_alpha() {
            "yuva420p"
        } else {
            "yuv420p"
        }
    }

    /// Explicit video codec, if the encoder default is not suitable.
    pub fn codec(self) -> Option<&'static str> {
        match self {
            Self::Mp4 => None,
            Self::Webm => Some("libvpx-vp9"),
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Timing of the start-to-end transition, in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossFade {
    pub hold_start: u32,
    pub hold_end: u32,
    pub duration: u32,
    pub offset: u32,
    /// ffmpeg `xfade` transition name.
    pub transition: &'static str,
}

impl Default for CrossFade {
    fn default() -> Self {
        Self {
            hold_start: 4,
            hold_end: 2,
            duration: 2,
            offset: 2,
            transition: "fadeblack",
        }
    }
}

impl CrossFade {
    pub fn filter_graph(&self, pixel_format: &str) -> String {
        format!(
            "[0][1]xfade=transition={}:duration={}:offset={},format={pixel_format}",
            self.transition, self.duration, self.offset
        )
    }
}

/// Renders a single gradient PNG into `folder` and returns its path.
pub fn render_png<R: Renderer + ?Sized>(
    renderer: &mut R,
    config: &RootConfig,
    folder: &Path,
    spec: &ImageSpec,
) -> Result<PathBuf> {
    let size = config.size(&spec.size)?;
    let job = ImageJob {
        output: folder.join(format!("{}.png", spec.name)),
        size,
        point_size: point_size(size),
        text: overlay_text(config.options.prefix(), folder, &spec.name),
        transparent: spec.transparent,
    };

    renderer.render_image(&job)?;
    tracing::info!(path = %job.output.display(), "created image");
    Ok(job.output)
}

/// Renders the start and end frames of `spec`, cross-fades them into a clip
/// and removes the frames again. Returns the clip path.
pub fn compose_video<R: Renderer + ?Sized>(
    renderer: &mut R,
    config: &RootConfig,
    folder: &Path,
    spec: &MediaSpec,
    format: MediaFormat,
) -> Result<PathBuf> {
    let [start, end] = spec.frames(format.supports_alpha());
    let start_frame = file_name(&render_png(renderer, config, folder, &start)?);
    let end_frame = file_name(&render_png(renderer, config, folder, &end)?);

    let job = VideoJob {
        folder: folder.to_path_buf(),
        start_frame,
        end_frame,
        output: format!("{}.{format}", spec.name),
        format,
    };
    renderer.render_video(&job)?;
    let output = job.output_path();
    tracing::info!(path = %output.display(), "created video");

    for frame in [&job.start_frame, &job.end_frame] {
        if assets::delete_file(folder, frame) {
            tracing::info!(path = %folder.join(frame).display(), "deleted transient frame");
        }
    }

    Ok(output)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
