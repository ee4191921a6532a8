//! Text drawn on top of every generated frame.

use std::path::Path;

use crate::SizePreset;

/// Fraction of the mean canvas edge used as the text point size.
pub const POINT_SIZE_FACTOR: f64 = 0.075;

/// Point size for a canvas, proportional to its mean edge length.
pub fn point_size(size: SizePreset) -> u32 {
    let mean_edge = (f64::from(size.width) + f64::from(size.height)) / 2.0;
    (mean_edge * POINT_SIZE_FACTOR).round() as u32
}

/// Breaks a camel-cased identifier at every lowercase to uppercase boundary,
/// so `HomePageHeader` becomes three lines.
pub fn wrap_identifier(name: &str) -> String {
    let mut wrapped = String::with_capacity(name.len() + 4);
    let mut chars = name.chars().peekable();

    while let Some(current) = chars.next() {
        wrapped.push(current);
        if current.is_ascii_lowercase() && chars.peek().is_some_and(char::is_ascii_uppercase) {
            wrapped.push('\n');
        }
    }

    wrapped
}

/// Full overlay: optional prefix, the folder's last segment and the wrapped
/// asset name, separated by blank lines.
pub fn overlay_text(prefix: Option<&str>, folder: &Path, name: &str) -> String {
    let folder_label = folder
        .file_name()
        .map(|segment| segment.to_string_lossy())
        .unwrap_or_default();

    let mut text = String::new();
    if let Some(prefix) = prefix {
        text.push_str(prefix);
        text.push_str("\n\n");
    }
    text.push_str(&folder_label);
    text.push_str("\n\n");
    text.push_str(&wrap_identifier(name));
    text
}
