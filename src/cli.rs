// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for filter listing and headless capture

use retrocam::backends::camera::StillImageBackend;
use retrocam::storage::{DirectorySink, default_photo_directory};
use retrocam::{AppModel, Config, FacingMode, FilterType, Message, SessionStatus};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments of `retrocam snap`
pub struct SnapOptions {
    pub input: PathBuf,
    pub filter: Option<FilterType>,
    pub facing: Option<FacingMode>,
    pub count: u32,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// List all filters
pub fn list_filters() -> Result<(), Box<dyn std::error::Error>> {
    println!("Available filters:");
    println!();
    for filter in FilterType::ALL {
        let descriptor = filter.descriptor();
        println!("  {:<8} {:<8} {}", filter.tag(), filter.label(), descriptor.css());
    }
    Ok(())
}

/// Take photos from an image file and save them
pub fn snap(options: SnapOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match options.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(facing) = options.facing {
        config.default_facing = facing;
    }
    if let Some(filter) = options.filter {
        config.default_filter = filter;
    }

    let backend = Arc::new(StillImageBackend::from_path(&options.input)?);
    let output_dir = options.output.unwrap_or_else(default_photo_directory);
    let sink = Arc::new(DirectorySink::new(&output_dir));

    println!("Using image: {}", options.input.display());
    println!(
        "Filter: {}  Camera: {}",
        config.default_filter.label(),
        config.default_facing
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_snap(config, backend, sink, options.count))
}

async fn run_snap(
    config: Config,
    backend: Arc<StillImageBackend>,
    sink: Arc<DirectorySink>,
    count: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut model, mut receiver) = AppModel::new(config, backend, sink);

    model.update(Message::Start);
    model
        .run_until(&mut receiver, |m| !m.session.is_loading())
        .await;
    if let SessionStatus::Unavailable(err) = model.session.status() {
        return Err(err.into());
    }

    println!("Capturing...");
    for _ in 0..count {
        if model.session.exposures().is_empty() {
            println!("Out of exposures.");
            break;
        }
        let before = model.gallery.len();
        model.update(Message::Capture);
        if model.gallery.len() == before {
            return Err("Capture failed".into());
        }
        model.run_until(&mut receiver, |m| !m.is_capturing).await;
    }

    let ids: Vec<_> = model.gallery.iter().rev().map(|p| p.id()).collect();
    for id in ids {
        model.update(Message::DownloadPhoto(id));
    }
    model
        .run_until(&mut receiver, |m| m.pending_saves == 0)
        .await;

    for path in &model.saved {
        println!("Photo saved: {}", path.display());
    }
    println!(
        "{} exposures left",
        model.session.exposures().remaining()
    );

    let first_error = model.save_errors.first().cloned();
    model.update(Message::Shutdown);
    model.release_pending(&mut receiver);
    match first_error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
