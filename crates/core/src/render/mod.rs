use std::{
    path::PathBuf,
    process::{Command, Stdio},
};

use crate::{
    compose::{CrossFade, MediaFormat},
    AssetGenError, Result, SizePreset,
};

/// Colour the radial gradient fades into.
pub const GRADIENT_ACCENT: &str = "firebrick";

/// Everything the rasterizer needs to draw one PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub output: PathBuf,
    pub size: SizePreset,
    pub point_size: u32,
    pub text: String,
    pub transparent: bool,
}

/// A cross-fade between two frames that already exist inside `folder`.
/// Frame and output names are relative to `folder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoJob {
    pub folder: PathBuf,
    pub start_frame: String,
    pub end_frame: String,
    pub output: String,
    pub format: MediaFormat,
}

impl VideoJob {
    pub fn output_path(&self) -> PathBuf {
        self.folder.join(&self.output)
    }
}

/// Capability boundary between the generation logic and the external tools.
pub trait Renderer {
    fn render_image(&mut self, job: &ImageJob) -> Result<()>;
    fn render_video(&mut self, job: &VideoJob) -> Result<()>;
}

/// Program names of the external tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub magick: String,
    pub ffmpeg: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            magick: "magick".to_string(),
            ffmpeg: "ffmpeg".to_string(),
        }
    }
}

impl ToolConfig {
    /// Tools that do not answer `-version` successfully.
    pub fn missing(&self) -> Vec<&str> {
        [self.magick.as_str(), self.ffmpeg.as_str()]
            .into_iter()
            .filter(|program| !is_on_path(program))
            .collect()
    }
}

fn is_on_path(program: &str) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// [`Renderer`] that shells out to ImageMagick and ffmpeg, blocking until
/// each process exits.
#[derive(Debug, Clone, Default)]
pub struct CommandRenderer {
    tools: ToolConfig,
    crossfade: CrossFade,
}

impl CommandRenderer {
    pub fn new(tools: ToolConfig) -> Self {
        Self {
            tools,
            crossfade: CrossFade::default(),
        }
    }

    pub fn with_crossfade(mut self, crossfade: CrossFade) -> Self {
        self.crossfade = crossfade;
        self
    }

    pub fn image_command(&self, job: &ImageJob) -> Command {
        let background = if job.transparent { "none" } else { "white" };

        let mut cmd = Command::new(&self.tools.magick);
        cmd.arg("-size")
            .arg(format!("{}x{}", job.size.width, job.size.height))
            .arg(format!("radial-gradient:{background}-{GRADIENT_ACCENT}"))
            .arg("-pointsize")
            .arg(job.point_size.to_string())
            .args(["-gravity", "Center", "-draw"])
            .arg(format!("text 0,0 '{}'", escape_draw_text(&job.text)))
            .arg(&job.output);
        cmd
    }

    pub fn video_command(&self, job: &VideoJob) -> Command {
        let fade = &self.crossfade;

        let mut cmd = Command::new(&self.tools.ffmpeg);
        cmd.current_dir(&job.folder)
            .arg("-y")
            .args(["-loop", "1", "-t"])
            .arg(fade.hold_start.to_string())
            .arg("-i")
            .arg(&job.start_frame)
            .args(["-loop", "1", "-t"])
            .arg(fade.hold_end.to_string())
            .arg("-i")
            .arg(&job.end_frame)
            .arg("-filter_complex")
            .arg(fade.filter_graph(job.format.pixel_format()));
        if let Some(codec) = job.format.codec() {
            cmd.args(["-c:v", codec]);
        }
        cmd.arg(&job.output)
            .args(["-hide_banner", "-loglevel", "error"]);
        cmd
    }
}

impl Renderer for CommandRenderer {
    fn render_image(&mut self, job: &ImageJob) -> Result<()> {
        run(self.image_command(job))
    }

    fn render_video(&mut self, job: &VideoJob) -> Result<()> {
        run(self.video_command(job))
    }
}

fn run(mut cmd: Command) -> Result<()> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(?cmd, "running external tool");

    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|source| AssetGenError::ToolLaunch {
            program: program.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(AssetGenError::ToolFailed {
            program,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

/// Escapes text for a single-quoted ImageMagick `-draw text` primitive.
fn escape_draw_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '\'') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
