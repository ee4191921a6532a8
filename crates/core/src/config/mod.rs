use std::{collections::HashMap, fs, path::Path};

use serde::{
    de::{DeserializeOwned, Error as _},
    Deserialize, Deserializer,
};
use serde_json::Value;

use crate::{AssetGenError, Result};

/// Top-level configuration document. Loaded once per run and handed to the
/// driver by reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootConfig {
    pub asset_collections: Vec<AssetCollection>,
    pub sizes: HashMap<String, SizePreset>,
    pub options: Options,
}

impl RootConfig {
    /// Reads and parses the configuration at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| AssetGenError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw).map_err(|source| AssetGenError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration document held in memory.
    pub fn from_json_str(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Resolves a named size preset.
    pub fn size(&self, name: &str) -> Result<SizePreset> {
        self.sizes
            .get(name)
            .copied()
            .ok_or_else(|| AssetGenError::UnknownSize(name.to_string()))
    }

    /// Checks that every asset name is usable as a bare file name inside its
    /// collection folder: non-empty and free of path separators.
    pub fn validate(&self) -> Result<()> {
        for collection in &self.asset_collections {
            let images = collection.pngs.items().iter().map(|spec| &spec.name);
            let media = collection
                .mp4s
                .items()
                .iter()
                .chain(collection.webms.items())
                .map(|spec| &spec.name);

            for name in images.chain(media) {
                if name.is_empty() {
                    return Err(AssetGenError::msg(format!(
                        "asset collection `{}` contains an asset with an empty name",
                        collection.folder
                    )));
                }
                if name.contains(['/', '\\']) {
                    return Err(AssetGenError::msg(format!(
                        "asset name `{name}` in collection `{}` must not contain path separators",
                        collection.folder
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Named canvas dimensions referenced by image and media specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SizePreset {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageSpec {
    pub name: String,
    pub size: String,
    #[serde(default)]
    pub transparent: bool,
}

/// A short transition clip. Rendering it produces two transient frames.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaSpec {
    pub name: String,
    pub size: String,
}

impl MediaSpec {
    /// The start and end frames the clip cross-fades between.
    pub fn frames(&self, transparent: bool) -> [ImageSpec; 2] {
        ["Start", "End"].map(|suffix| ImageSpec {
            name: format!("{}{suffix}", self.name),
            size: self.size.clone(),
            transparent,
        })
    }
}

/// Group of assets written into a single output folder.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetCollection {
    pub folder: String,
    #[serde(default)]
    pub pngs: Bucket<ImageSpec>,
    #[serde(default)]
    pub mp4s: Bucket<MediaSpec>,
    #[serde(default)]
    pub webms: Bucket<MediaSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    pub parent_folder: String,
    #[serde(default)]
    pub global_prefix: Option<String>,
}

impl Options {
    /// Prefix line for overlay text; an empty string counts as unset.
    pub fn prefix(&self) -> Option<&str> {
        self.global_prefix.as_deref().filter(|prefix| !prefix.is_empty())
    }
}

/// Shape of an optional asset list inside a collection.
///
/// Absence and a non-list value are both normal configuration shapes that the
/// driver skips, so they are kept apart from a parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bucket<T> {
    /// The key is not present on the collection.
    Missing,
    /// The key is present but holds a non-array JSON value of the given kind.
    Malformed(String),
    Items(Vec<T>),
}

impl<T> Bucket<T> {
    /// Items of the bucket, empty unless it is a well-formed list.
    pub fn items(&self) -> &[T] {
        match self {
            Self::Items(items) => items,
            Self::Missing | Self::Malformed(_) => &[],
        }
    }
}

impl<T> Default for Bucket<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Bucket<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Array(_) => serde_json::from_value(value)
                .map(Self::Items)
                .map_err(D::Error::custom),
            other => Ok(Self::Malformed(json_kind(&other).to_string())),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const EXAMPLE: &str = r#"{
        "sizes": { "sq": { "width": 512, "height": 512 } },
        "options": { "parentFolder": "p" },
        "assetCollections": [
            {
                "folder": "icons",
                "pngs": [{ "name": "Logo", "size": "sq" }],
                "mp4s": [{ "name": "Intro", "size": "sq" }]
            }
        ]
    }"#;

    #[test]
    fn parses_example_document() {
        let config = RootConfig::from_json_str(EXAMPLE).unwrap();

        assert_eq!(config.options.parent_folder, "p");
        assert_eq!(config.options.prefix(), None);
        assert_eq!(
            config.size("sq").unwrap(),
            SizePreset {
                width: 512,
                height: 512
            }
        );

        let collection = &config.asset_collections[0];
        assert_eq!(collection.folder, "icons");
        assert_eq!(
            collection.pngs.items(),
            &[ImageSpec {
                name: "Logo".to_string(),
                size: "sq".to_string(),
                transparent: false,
            }]
        );
        assert_eq!(collection.mp4s.items().len(), 1);
        assert_eq!(collection.webms, Bucket::Missing);
    }

    #[test]
    fn non_list_buckets_are_kept_as_malformed() {
        let config = RootConfig::from_json_str(
            r#"{
                "sizes": {},
                "options": { "parentFolder": "p", "globalPrefix": "" },
                "assetCollections": [
                    { "folder": "a", "pngs": "Logo", "mp4s": null, "webms": { "name": "x" } }
                ]
            }"#,
        )
        .unwrap();

        let collection = &config.asset_collections[0];
        assert_eq!(collection.pngs, Bucket::Malformed("string".to_string()));
        assert_eq!(collection.mp4s, Bucket::Malformed("null".to_string()));
        assert_eq!(collection.webms, Bucket::Malformed("object".to_string()));
        assert!(collection.pngs.items().is_empty());
        assert_eq!(config.options.prefix(), None);
    }

    #[test]
    fn rejects_mistyped_items_inside_a_list() {
        let result = RootConfig::from_json_str(
            r#"{
                "sizes": {},
                "options": { "parentFolder": "p" },
                "assetCollections": [{ "folder": "a", "pngs": [{ "name": 3, "size": "sq" }] }]
            }"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn unknown_size_is_reported() {
        let config = RootConfig::from_json_str(EXAMPLE).unwrap();
        let err = config.size("banner").unwrap_err();
        assert!(matches!(err, AssetGenError::UnknownSize(name) if name == "banner"));
    }

    #[test]
    fn media_frames_share_size_and_transparency() {
        let spec = MediaSpec {
            name: "Intro".to_string(),
            size: "sq".to_string(),
        };

        let [start, end] = spec.frames(true);
        assert_eq!(start.name, "IntroStart");
        assert_eq!(end.name, "IntroEnd");
        assert!(start.transparent && end.transparent);
        assert_eq!(start.size, "sq");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXAMPLE.as_bytes()).unwrap();

        let config = RootConfig::from_file(file.path()).unwrap();
        assert_eq!(config.asset_collections.len(), 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RootConfig::from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, AssetGenError::ConfigRead { .. }));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = RootConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, AssetGenError::ConfigParse { .. }));
    }

    #[test]
    fn empty_asset_names_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "sizes": {},
                "options": { "parentFolder": "p" },
                "assetCollections": [{ "folder": "a", "webms": [{ "name": "", "size": "sq" }] }]
            }"#,
        )
        .unwrap();

        let err = RootConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("empty name"));
    }

    #[test]
    fn in_memory_configs_are_validated_too() {
        let config = RootConfig::from_json_str(
            r#"{
                "sizes": {},
                "options": { "parentFolder": "p" },
                "assetCollections": [{ "folder": "a", "pngs": [{ "name": "", "size": "sq" }] }]
            }"#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn asset_names_with_separators_are_rejected() {
        let config = RootConfig::from_json_str(
            r#"{
                "sizes": {},
                "options": { "parentFolder": "p" },
                "assetCollections": [{ "folder": "a", "mp4s": [{ "name": "/tmp/Intro", "size": "sq" }] }]
            }"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("path separators"));
    }
}
