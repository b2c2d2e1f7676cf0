// SPDX-License-Identifier: GPL-3.0-only

//! In-memory photo roll
//!
//! Photos are immutable once captured and are kept newest first for the
//! lifetime of the session.

use crate::backends::camera::types::FacingMode;
use crate::constants::files;
use crate::pipelines::photo::FilterType;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique photo identifier (epoch milliseconds, bumped to stay strictly increasing)
pub type PhotoId = u64;

/// Hands out strictly increasing, time-derived photo ids
#[derive(Debug, Default)]
pub struct PhotoIdGenerator {
    last: AtomicU64,
}

impl PhotoIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for a capture at `at`; never repeats, even within one millisecond
    pub fn next(&self, at: DateTime<Utc>) -> PhotoId {
        let wanted = at.timestamp_millis().max(0) as u64;
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let id = wanted.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, id, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return id,
                Err(current) => last = current,
            }
        }
    }
}

/// A captured, filtered and encoded still image
#[derive(Debug, Clone)]
pub struct Photo {
    id: PhotoId,
    payload: Arc<[u8]>,
    filter: FilterType,
    facing: FacingMode,
    width: u32,
    height: u32,
    captured_at: DateTime<Utc>,
}

impl Photo {
    pub fn new(
        id: PhotoId,
        payload: Vec<u8>,
        filter: FilterType,
        facing: FacingMode,
        (width, height): (u32, u32),
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            payload: Arc::from(payload.into_boxed_slice()),
            filter,
            facing,
            width,
            height,
            captured_at,
        }
    }

    pub fn id(&self) -> PhotoId {
        self.id
    }

    /// Encoded JPEG bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Suggested download name: `retrocam-<millis>.jpg`
    ///
    /// Uses the id, which equals the capture millisecond unless two photos
    /// were taken within the same one.
    pub fn filename(&self) -> String {
        format!(
            "{}-{}.{}",
            files::PHOTO_PREFIX,
            self.id,
            files::PHOTO_EXTENSION
        )
    }
}

/// Ordered photo collection, newest first
#[derive(Debug, Default)]
pub struct Gallery {
    photos: VecDeque<Photo>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly captured photo at the front
    pub fn add(&mut self, photo: Photo) {
        self.photos.push_front(photo);
    }

    /// Remove a photo by id
    pub fn remove(&mut self, id: PhotoId) -> Option<Photo> {
        let index = self.photos.iter().position(|p| p.id == id)?;
        self.photos.remove(index)
    }

    pub fn get(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    /// Most recent photo
    pub fn latest(&self) -> Option<&Photo> {
        self.photos.front()
    }

    /// Photos newest first; `.rev()` walks them in capture order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Photo> + ExactSizeIterator {
        self.photos.iter()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn photo(id: PhotoId) -> Photo {
        Photo::new(
            id,
            vec![0xFF, 0xD8],
            FilterType::Normal,
            FacingMode::Back,
            (1, 1),
            Utc::now(),
        )
    }

    #[test]
    fn test_ids_strictly_increase_within_a_millisecond() {
        let ids = PhotoIdGenerator::new();
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let a = ids.next(at);
        let b = ids.next(at);
        assert_eq!(a, 1_700_000_000_000);
        assert_eq!(b, a + 1);
    }

    #[test]
    fn test_ids_follow_the_clock() {
        let ids = PhotoIdGenerator::new();
        let a = ids.next(Utc.timestamp_millis_opt(1_000).unwrap());
        let b = ids.next(Utc.timestamp_millis_opt(5_000).unwrap());
        assert_eq!((a, b), (1_000, 5_000));
    }

    #[test]
    fn test_newest_first() {
        let mut gallery = Gallery::new();
        gallery.add(photo(1));
        gallery.add(photo(2));
        gallery.add(photo(3));
        let order: Vec<_> = gallery.iter().map(Photo::id).collect();
        assert_eq!(order, vec![3, 2, 1]);
        assert_eq!(gallery.latest().map(Photo::id), Some(3));

        let capture_order: Vec<_> = gallery.iter().rev().map(Photo::id).collect();
        assert_eq!(capture_order, vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_unknown_is_none() {
        let mut gallery = Gallery::new();
        gallery.add(photo(1));
        assert!(gallery.remove(42).is_none());
        assert_eq!(gallery.remove(1).map(|p| p.id()), Some(1));
        assert!(gallery.is_empty());
    }

    #[test]
    fn test_filename_convention() {
        assert_eq!(photo(1_700_000_000_123).filename(), "retrocam-1700000000123.jpg");
    }
}
