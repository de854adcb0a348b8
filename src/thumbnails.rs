use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use image::RgbaImage;
use log::warn;

use crate::catalog::Filter;
use crate::engine::{FilterEngine, FilterSpec};
use crate::error::FilterError;

/// Fixed intensity every thumbnail is rendered at.
pub const THUMBNAIL_INTENSITY: f32 = 0.7;

pub enum ThumbnailEvent {
    Ready { filter: Filter, image: RgbaImage },
    Failed { filter: Filter, error: FilterError },
    /// Sent exactly once, after every catalog entry has resolved one way
    /// or the other.
    Completed,
}

/// Fan the whole catalog out across worker threads at the fixed thumbnail
/// intensity. Results stream back in completion order; a countdown fires
/// the final `Completed` event once the last entry resolves. Individual
/// failures are logged and reported, never fatal to the batch.
pub fn generate_all(source: &Arc<RgbaImage>) -> mpsc::Receiver<ThumbnailEvent> {
    let (tx, rx) = mpsc::channel();
    let remaining = Arc::new(AtomicUsize::new(Filter::ALL.len()));

    for filter in Filter::ALL {
        let tx = tx.clone();
        let remaining = Arc::clone(&remaining);
        let source = Arc::clone(source);
        thread::spawn(move || {
            let event = if filter == Filter::NoFilters {
                // Identity needs no engine pass.
                ThumbnailEvent::Ready {
                    filter,
                    image: (*source).clone(),
                }
            } else {
                let spec = FilterSpec::new(filter, THUMBNAIL_INTENSITY);
                match FilterEngine::new().apply(&source, &spec) {
                    Ok(image) => ThumbnailEvent::Ready { filter, image },
                    Err(error) => {
                        warn!("thumbnail for {} failed: {error}", filter.display_name());
                        ThumbnailEvent::Failed { filter, error }
                    }
                }
            };
            let _ = tx.send(event);

            // The event send precedes the countdown, so by the time the
            // counter hits zero every per-filter event is already queued.
            if remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
                let _ = tx.send(ThumbnailEvent::Completed);
            }
        });
    }

    rx
}
