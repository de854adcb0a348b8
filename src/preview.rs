use std::sync::{mpsc, Arc};
use std::thread;

use image::RgbaImage;
use log::debug;

use crate::catalog::Filter;
use crate::engine::{FilterEngine, FilterSpec};
use crate::error::FilterError;

pub enum PreviewEvent {
    Updated(RgbaImage),
    Failed(FilterError),
}

/// Session state for the single large preview: the selected filter, the
/// slider intensity, and whatever renders are in flight.
///
/// Every issued render carries a generation number. Slider drags can issue
/// requests faster than renders finish; `poll` only ever surfaces the
/// outcome of the freshest request, so the visible preview can never fall
/// back to an older intensity that happened to finish later.
pub struct PreviewPipeline {
    source: Arc<RgbaImage>,
    spec: FilterSpec,
    issued: u64,
    delivered: u64,
    immediate: Option<PreviewEvent>,
    tx: mpsc::Sender<(u64, Result<RgbaImage, FilterError>)>,
    rx: mpsc::Receiver<(u64, Result<RgbaImage, FilterError>)>,
}

impl PreviewPipeline {
    pub fn new(source: Arc<RgbaImage>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            spec: FilterSpec::new(Filter::NoFilters, 0.0),
            issued: 0,
            delivered: 0,
            immediate: None,
            tx,
            rx,
        }
    }

    pub fn spec(&self) -> FilterSpec {
        self.spec
    }

    /// Selecting a filter resets the intensity and kicks one render.
    /// Identity restores the source directly, no worker involved.
    pub fn select_filter(&mut self, filter: Filter) {
        self.spec = FilterSpec::new(filter, 0.0);
        if filter == Filter::NoFilters {
            // Still burn a generation so an in-flight render of the old
            // filter gets dropped instead of overwriting the original.
            self.issued += 1;
            self.delivered = self.issued;
            self.immediate = Some(PreviewEvent::Updated((*self.source).clone()));
        } else {
            self.start_render();
        }
    }

    /// Slider moved. Re-renders the currently selected filter only.
    pub fn set_intensity(&mut self, value: f32) {
        self.spec.intensity = value;
        if self.spec.filter != Filter::NoFilters {
            self.start_render();
        }
    }

    fn start_render(&mut self) {
        self.issued += 1;
        let generation = self.issued;
        let source = Arc::clone(&self.source);
        let spec = self.spec;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = FilterEngine::new().apply(&source, &spec);
            let _ = tx.send((generation, result));
        });
    }

    /// Latest outcome of the freshest request, if one has arrived since the
    /// last poll. Results of superseded requests are discarded here,
    /// whatever order their workers finish in.
    pub fn poll(&mut self) -> Option<PreviewEvent> {
        if let Some(event) = self.immediate.take() {
            return Some(event);
        }

        let mut latest = None;
        for (generation, result) in self.rx.try_iter() {
            if generation < self.issued {
                debug!("dropping superseded preview render {generation} (current {})", self.issued);
                continue;
            }
            self.delivered = generation;
            latest = Some(match result {
                Ok(image) => PreviewEvent::Updated(image),
                Err(error) => PreviewEvent::Failed(error),
            });
        }
        latest
    }

    /// True once the outcome of the freshest request has been delivered.
    /// Saving waits on this so it never reads a half-updated preview.
    pub fn is_settled(&self) -> bool {
        self.delivered == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::time::{Duration, Instant};

    fn source() -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_fn(48, 36, |x, y| {
            Rgba([(x * 3 % 256) as u8, (y * 7 % 256) as u8, 99, 255])
        }))
    }

    fn settle(pipeline: &mut PreviewPipeline) -> Option<PreviewEvent> {
        let deadline = Instant::now() + Duration::from_secs(30);
        let mut last = None;
        while !pipeline.is_settled() {
            assert!(Instant::now() < deadline, "preview never settled");
            if let Some(event) = pipeline.poll() {
                last = Some(event);
            }
            thread::sleep(Duration::from_millis(5));
        }
        last.or_else(|| pipeline.poll())
    }

    #[test]
    fn identity_selection_restores_the_source_immediately() {
        let src = source();
        let mut pipeline = PreviewPipeline::new(Arc::clone(&src));
        pipeline.select_filter(Filter::NoFilters);

        assert!(pipeline.is_settled());
        match pipeline.poll() {
            Some(PreviewEvent::Updated(image)) => assert_eq!(image.as_raw(), src.as_raw()),
            _ => panic!("expected an immediate preview update"),
        }
    }

    #[test]
    fn selection_resets_intensity_to_zero() {
        let mut pipeline = PreviewPipeline::new(source());
        pipeline.select_filter(Filter::SepiaTone);
        pipeline.set_intensity(0.8);
        pipeline.select_filter(Filter::GaussianBlur);
        assert_eq!(pipeline.spec(), FilterSpec::new(Filter::GaussianBlur, 0.0));
        let _ = settle(&mut pipeline);
    }

    #[test]
    fn rapid_intensity_changes_settle_on_the_last_value() {
        let src = source();
        let mut pipeline = PreviewPipeline::new(Arc::clone(&src));
        pipeline.select_filter(Filter::SepiaTone);
        pipeline.set_intensity(0.3);
        pipeline.set_intensity(0.9);

        let last = settle(&mut pipeline);
        let expected = FilterEngine::new()
            .apply(&src, &FilterSpec::new(Filter::SepiaTone, 0.9))
            .unwrap();
        match last {
            Some(PreviewEvent::Updated(image)) => assert_eq!(image.as_raw(), expected.as_raw()),
            _ => panic!("expected the final preview update"),
        }
    }

    #[test]
    fn identity_reselection_wins_over_an_in_flight_render() {
        let src = source();
        let mut pipeline = PreviewPipeline::new(Arc::clone(&src));
        pipeline.select_filter(Filter::GaussianBlur);
        pipeline.set_intensity(0.7);
        pipeline.select_filter(Filter::NoFilters);

        match pipeline.poll() {
            Some(PreviewEvent::Updated(image)) => assert_eq!(image.as_raw(), src.as_raw()),
            _ => panic!("expected the original image back"),
        }

        // Whenever the superseded blur renders land, they must be dropped,
        // not surfaced, and the pipeline stays settled throughout.
        for _ in 0..100 {
            assert!(pipeline.poll().is_none());
            assert!(pipeline.is_settled());
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn slider_on_identity_issues_no_render() {
        let mut pipeline = PreviewPipeline::new(source());
        pipeline.select_filter(Filter::NoFilters);
        let _ = pipeline.poll();
        pipeline.set_intensity(0.5);
        assert!(pipeline.is_settled());
        assert!(pipeline.poll().is_none());
    }
}
