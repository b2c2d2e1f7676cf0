// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for capture, filters and the gallery

use retrocam::backends::camera::TestPatternBackend;
use retrocam::backends::camera::types::CameraFrame;
use retrocam::pipelines::photo::{CaptureBlocked, SnapshotEngine};
use retrocam::storage::{PhotoSink, DirectorySink};
use retrocam::{AppModel, Config, Exposures, FacingMode, FilterType, Message, PhotoId};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Left half red, right half blue
fn split_frame(size: u32) -> CameraFrame {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for _y in 0..size {
        for x in 0..size {
            if x < size / 2 {
                data.extend_from_slice(&[230, 20, 20, 255]);
            } else {
                data.extend_from_slice(&[20, 20, 230, 255]);
            }
        }
    }
    CameraFrame::from_rgba(size, size, data).unwrap()
}

fn decode(payload: &[u8]) -> image::RgbImage {
    image::load_from_memory(payload).unwrap().to_rgb8()
}

async fn started_model(
    config: Config,
    dir: &std::path::Path,
) -> (AppModel, UnboundedReceiver<Message>) {
    let backend = Arc::new(TestPatternBackend::new(32, 32));
    let sink: Arc<dyn PhotoSink> = Arc::new(DirectorySink::new(dir));
    let (mut model, mut rx) = AppModel::new(config, backend, sink);
    model.update(Message::Start);
    model
        .run_until(&mut rx, |m| !m.session.is_loading())
        .await;
    (model, rx)
}

/// Press the shutter and wait for it to re-enable
async fn shoot(model: &mut AppModel, rx: &mut UnboundedReceiver<Message>) -> Option<PhotoId> {
    let before = model.gallery.len();
    model.update(Message::Capture);
    model.run_until(rx, |m| !m.is_capturing).await;
    (model.gallery.len() > before)
        .then(|| model.gallery.latest().map(|p| p.id()))
        .flatten()
}

#[test]
fn test_every_filter_produces_a_decodable_photo() {
    let engine = SnapshotEngine::default();
    let frame = split_frame(32);
    let mut exposures = Exposures::default();

    for filter in FilterType::ALL {
        let photo = engine
            .capture(&frame, filter, FacingMode::Back, &mut exposures)
            .unwrap()
            .unwrap();
        assert_eq!(photo.filter(), filter);
        assert_eq!(photo.dimensions(), (32, 32));
        assert_eq!(&photo.payload()[..2], &[0xFF, 0xD8], "{filter} is not JPEG");
        assert_eq!(decode(photo.payload()).dimensions(), (32, 32));
    }
    assert_eq!(exposures.remaining(), 24 - FilterType::ALL.len() as u32);
}

#[test]
fn test_front_camera_photo_is_mirrored() {
    let engine = SnapshotEngine::default();
    let frame = split_frame(64);
    let mut exposures = Exposures::default();

    let back = engine
        .capture(&frame, FilterType::Normal, FacingMode::Back, &mut exposures)
        .unwrap()
        .unwrap();
    let front = engine
        .capture(&frame, FilterType::Normal, FacingMode::Front, &mut exposures)
        .unwrap()
        .unwrap();

    let back = decode(back.payload());
    let front = decode(front.payload());

    let [r, _, b] = back.get_pixel(8, 32).0;
    assert!(r > 150 && b < 100, "back left should stay red, got {r},{b}");
    let [r, _, b] = front.get_pixel(8, 32).0;
    assert!(b > 150 && r < 100, "front left should be blue, got {r},{b}");
}

#[test]
fn test_noir_photo_is_grayscale() {
    let engine = SnapshotEngine::default();
    let mut exposures = Exposures::default();
    let photo = engine
        .capture(&split_frame(32), FilterType::Noir, FacingMode::Back, &mut exposures)
        .unwrap()
        .unwrap();

    for pixel in decode(photo.payload()).pixels() {
        let [r, g, b] = pixel.0;
        let spread = r.max(g).max(b) - r.min(g).min(b);
        assert!(spread <= 12, "noir pixel not gray: {r},{g},{b}");
    }
}

#[test]
fn test_empty_roll_is_a_no_op() {
    let engine = SnapshotEngine::default();
    let mut exposures = Exposures::new(1);
    let frame = split_frame(16);

    assert!(engine
        .capture(&frame, FilterType::Warm, FacingMode::Back, &mut exposures)
        .unwrap()
        .is_ok());
    let blocked = engine
        .capture(&frame, FilterType::Warm, FacingMode::Back, &mut exposures)
        .unwrap()
        .unwrap_err();

    assert_eq!(blocked, CaptureBlocked::NoExposures);
    assert_eq!(exposures.remaining(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_capture_delete_exposure_accounting() {
    let dir = tempfile::tempdir().unwrap();
    let (mut model, mut rx) = started_model(Config::default(), dir.path()).await;

    let p1 = shoot(&mut model, &mut rx).await.unwrap();
    let p2 = shoot(&mut model, &mut rx).await.unwrap();
    let p3 = shoot(&mut model, &mut rx).await.unwrap();
    assert_eq!(model.session.exposures().remaining(), 21);

    let order: Vec<_> = model.gallery.iter().map(|p| p.id()).collect();
    assert_eq!(order, vec![p3, p2, p1]);

    model.update(Message::DeletePhoto(p2));
    assert_eq!(model.session.exposures().remaining(), 22);
    let order: Vec<_> = model.gallery.iter().map(|p| p.id()).collect();
    assert_eq!(order, vec![p3, p1]);

    model.update(Message::DeletePhoto(p1));
    model.update(Message::DeletePhoto(p3));
    assert_eq!(model.session.exposures().remaining(), 24);
    assert!(model.gallery.is_empty());

    // Nothing left to delete; the counter stays capped
    model.update(Message::DeletePhoto(p3));
    assert_eq!(model.session.exposures().remaining(), 24);
}

#[tokio::test(start_paused = true)]
async fn test_roll_runs_out() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        max_exposures: 2,
        ..Config::default()
    };
    let (mut model, mut rx) = started_model(config, dir.path()).await;

    assert!(shoot(&mut model, &mut rx).await.is_some());
    assert!(shoot(&mut model, &mut rx).await.is_some());
    assert!(!model.view_state().shutter_enabled);
    assert!(shoot(&mut model, &mut rx).await.is_none());
    assert_eq!(model.gallery.len(), 2);
    assert_eq!(model.session.exposures().remaining(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_noir_session_download() {
    let dir = tempfile::tempdir().unwrap();
    let (mut model, mut rx) = started_model(Config::default(), dir.path()).await;

    model.update(Message::SelectFilter(FilterType::Noir));
    let id = shoot(&mut model, &mut rx).await.unwrap();
    assert_eq!(model.session.exposures().remaining(), 23);

    model.update(Message::DownloadPhoto(id));
    model.run_until(&mut rx, |m| m.pending_saves == 0).await;

    let expected = dir.path().join(format!("retrocam-{id}.jpg"));
    assert_eq!(model.saved, vec![expected.clone()]);
    let bytes = std::fs::read(&expected).unwrap();
    assert_eq!(bytes, model.gallery.get(id).unwrap().payload());
}
