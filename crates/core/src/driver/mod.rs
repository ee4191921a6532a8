use std::{
    fmt,
    path::Path,
    time::{Duration, Instant},
};

use crate::{
    assets::{collection_folder, ensure_folder},
    compose::{compose_video, render_png, MediaFormat},
    render::Renderer,
    AssetCollection, Bucket, ImageSpec, MediaSpec, Result, RootConfig,
};

/// The asset lists a collection may carry, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Pngs,
    Mp4s,
    Webms,
}

/// A collection's bucket for one [`AssetKind`], paired with how it renders.
#[derive(Debug, Clone, Copy)]
pub enum KindBucket<'a> {
    Images(&'a Bucket<ImageSpec>),
    Media(MediaFormat, &'a Bucket<MediaSpec>),
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [Self::Pngs, Self::Mp4s, Self::Webms];

    /// Configuration key of the bucket.
    pub fn key(self) -> &'static str {
        match self {
            Self::Pngs => "pngs",
            Self::Mp4s => "mp4s",
            Self::Webms => "webms",
        }
    }

    pub fn bucket(self, collection: &AssetCollection) -> KindBucket<'_> {
        match self {
            Self::Pngs => KindBucket::Images(&collection.pngs),
            Self::Mp4s => KindBucket::Media(MediaFormat::Mp4, &collection.mp4s),
            Self::Webms => KindBucket::Media(MediaFormat::Webm, &collection.webms),
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Counters reported once a run completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub images: usize,
    pub videos: usize,
    /// Buckets skipped because the key was absent.
    pub missing_buckets: usize,
    /// Buckets skipped because the key did not hold a list.
    pub malformed_buckets: usize,
    pub elapsed: Duration,
}

/// Generates every asset of `config` under `asset_root`.
///
/// Collections and their items are processed strictly in declaration order.
/// The first renderer failure aborts the run; anything written before it
/// stays on disk.
pub fn generate<R: Renderer + ?Sized>(
    config: &RootConfig,
    asset_root: &Path,
    renderer: &mut R,
) -> Result<RunSummary> {
    config.validate()?;
    tracing::info!(root = %asset_root.display(), "starting to generate assets");
    let started = Instant::now();
    let mut summary = RunSummary::default();

    for collection in &config.asset_collections {
        let folder = collection_folder(asset_root, &config.options, collection);
        ensure_folder(&folder);

        for kind in AssetKind::ALL {
            match kind.bucket(collection) {
                KindBucket::Images(bucket) => {
                    let Some(specs) = bucket_items(&mut summary, collection, kind, bucket) else {
                        continue;
                    };
                    for spec in specs {
                        let item_started = Instant::now();
                        render_png(renderer, config, &folder, spec)?;
                        tracing::info!(
                            asset = %spec.name,
                            elapsed_s = item_started.elapsed().as_secs_f64(),
                            "image done"
                        );
                        summary.images += 1;
                    }
                }
                KindBucket::Media(format, bucket) => {
                    let Some(specs) = bucket_items(&mut summary, collection, kind, bucket) else {
                        continue;
                    };
                    for spec in specs {
                        let item_started = Instant::now();
                        compose_video(renderer, config, &folder, spec, format)?;
                        tracing::info!(
                            asset = %spec.name,
                            %format,
                            elapsed_s = item_started.elapsed().as_secs_f64(),
                            "video done"
                        );
                        summary.videos += 1;
                    }
                }
            }
        }
    }

    summary.elapsed = started.elapsed();
    tracing::info!(
        images = summary.images,
        videos = summary.videos,
        missing_buckets = summary.missing_buckets,
        malformed_buckets = summary.malformed_buckets,
        "took {:.3}s",
        summary.elapsed.as_secs_f64()
    );
    Ok(summary)
}

fn bucket_items<'a, T>(
    summary: &mut RunSummary,
    collection: &AssetCollection,
    kind: AssetKind,
    bucket: &'a Bucket<T>,
) -> Option<&'a [T]> {
    match bucket {
        Bucket::Items(items) => Some(items),
        Bucket::Missing => {
            summary.missing_buckets += 1;
            tracing::info!(folder = %collection.folder, "no {kind} found on folder, skipping");
            None
        }
        Bucket::Malformed(found) => {
            summary.malformed_buckets += 1;
            tracing::info!(folder = %collection.folder, %found, "property {kind} is not an array, skipping");
            None
        }
    }
}
