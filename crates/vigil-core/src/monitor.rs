use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vigil_types::Frame;

use crate::detect::ChangeDetector;
use crate::error::Result;
use crate::store::ArtifactStore;

/// Produces one frame of the monitored region per call. The backing capture
/// handle is acquired when the source is built, not per grab.
pub trait FrameSource {
    fn grab(&mut self) -> anyhow::Result<Frame>;
}

/// Recognizes text in a frame. Synchronous, no latency bound, and no
/// guarantees about formatting; an empty string is a valid answer.
pub trait TextExtractor {
    fn extract(&self, frame: &Frame) -> anyhow::Result<String>;
}

impl<X: TextExtractor + ?Sized> TextExtractor for Box<X> {
    fn extract(&self, frame: &Frame) -> anyhow::Result<String> {
        (**self).extract(frame)
    }
}

/// The sampling loop: grab → detect change → extract text → persist, one
/// tick at a time. Everything runs inline on the loop task, so a slow
/// extraction delays the next sample instead of overlapping with it.
pub struct RegionMonitor<S, X> {
    source: S,
    extractor: X,
    store: ArtifactStore,
    detector: ChangeDetector,
    interval: Duration,
}

impl<S: FrameSource, X: TextExtractor> RegionMonitor<S, X> {
    pub fn new(source: S, extractor: X, store: ArtifactStore, interval: Duration) -> Self {
        Self {
            source,
            extractor,
            store,
            detector: ChangeDetector::new(),
            interval,
        }
    }

    /// Runs until the token is cancelled. Capture failures skip the tick and
    /// the next one retries; persistence failures propagate, since silently
    /// losing a capture defeats the point of the tool.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<()> {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick()?;
                }
                _ = cancel.cancelled() => {
                    info!("monitoring stopped");
                    return Ok(());
                }
            }
        }
    }

    fn tick(&mut self) -> Result<()> {
        let frame = match self.source.grab() {
            Ok(frame) => frame,
            Err(err) => {
                warn!("screen capture failed, retrying next tick: {err:#}");
                return Ok(());
            }
        };

        if !self.detector.observe(&frame) {
            debug!("frame unchanged");
            return Ok(());
        }

        let text = match self.extractor.extract(&frame) {
            Ok(text) => text,
            Err(err) => {
                warn!("text extraction failed, keeping the image with empty text: {err:#}");
                String::new()
            }
        };

        self.store.save(&frame, &text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct ScriptedSource {
        frames: Vec<anyhow::Result<Frame>>,
    }

    impl ScriptedSource {
        fn new(frames: Vec<anyhow::Result<Frame>>) -> Self {
            Self { frames }
        }
    }

    impl FrameSource for ScriptedSource {
        fn grab(&mut self) -> anyhow::Result<Frame> {
            self.frames.remove(0)
        }
    }

    struct CountingExtractor {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl TextExtractor for CountingExtractor {
        fn extract(&self, _frame: &Frame) -> anyhow::Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("engine unavailable");
            }
            Ok(format!("text {call}"))
        }
    }

    fn solid_frame(value: u8) -> Frame {
        Frame::new(vec![value; 2 * 2 * 4], 2, 2)
    }

    fn artifact_count(root: &Path) -> usize {
        fs::read_dir(root.join("images")).map_or(0, |dir| dir.count())
    }

    fn monitor_with(
        frames: Vec<anyhow::Result<Frame>>,
        root: &Path,
        calls: Arc<AtomicUsize>,
        fail: bool,
    ) -> RegionMonitor<ScriptedSource, CountingExtractor> {
        RegionMonitor::new(
            ScriptedSource::new(frames),
            CountingExtractor { calls, fail },
            ArtifactStore::new(root),
            Duration::from_millis(1),
        )
    }

    #[test]
    fn extraction_runs_only_for_changed_ticks() {
        // changes at ticks 1 (first sample), 2, 5 and 7
        let frames = vec![
            Ok(solid_frame(0)),
            Ok(solid_frame(1)),
            Ok(solid_frame(1)),
            Ok(solid_frame(1)),
            Ok(solid_frame(2)),
            Ok(solid_frame(2)),
            Ok(solid_frame(3)),
            Ok(solid_frame(3)),
        ];
        let dir = tempfile::tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut monitor = monitor_with(frames, dir.path(), calls.clone(), false);

        for _ in 0..8 {
            monitor.tick().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(artifact_count(dir.path()), 4);
    }

    #[test]
    fn unchanged_tail_produces_no_artifact() {
        // three ticks: first sample, a change, then the same frame again
        let frames = vec![
            Ok(solid_frame(10)),
            Ok(solid_frame(20)),
            Ok(solid_frame(20)),
        ];
        let dir = tempfile::tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut monitor = monitor_with(frames, dir.path(), calls.clone(), false);

        for _ in 0..3 {
            monitor.tick().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(artifact_count(dir.path()), 2);
        assert_eq!(fs::read_dir(dir.path().join("ocr")).unwrap().count(), 2);
    }

    #[test]
    fn capture_failure_skips_the_tick_but_not_the_loop() {
        let frames = vec![
            Err(anyhow::anyhow!("display disconnected")),
            Ok(solid_frame(5)),
        ];
        let dir = tempfile::tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut monitor = monitor_with(frames, dir.path(), calls.clone(), false);

        monitor.tick().unwrap();
        assert_eq!(artifact_count(dir.path()), 0);

        monitor.tick().unwrap();
        assert_eq!(artifact_count(dir.path()), 1);
    }

    #[test]
    fn extraction_failure_keeps_the_image_with_empty_text() {
        let frames = vec![Ok(solid_frame(42))];
        let dir = tempfile::tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut monitor = monitor_with(frames, dir.path(), calls, true);

        monitor.tick().unwrap();

        assert_eq!(artifact_count(dir.path()), 1);
        let text_file = fs::read_dir(dir.path().join("ocr"))
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(fs::read_to_string(text_file.path()).unwrap(), "");
    }

    #[tokio::test]
    async fn cancellation_halts_the_loop() {
        struct StaticSource;
        impl FrameSource for StaticSource {
            fn grab(&mut self) -> anyhow::Result<Frame> {
                Ok(solid_frame(1))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let monitor = RegionMonitor::new(
            StaticSource,
            CountingExtractor {
                calls: Arc::new(AtomicUsize::new(0)),
                fail: false,
            },
            ArtifactStore::new(dir.path()),
            Duration::from_millis(5),
        );

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(monitor.run(cancel.clone()));

        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();

        let result = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("loop did not stop after cancellation")
            .unwrap();
        assert!(result.is_ok());
        // the very first tick fired and captured the initial frame
        assert!(artifact_count(dir.path()) >= 1);
    }
}
