use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::frame_request::FrameRequest;
use crate::controllers::interactive::errors::render::RenderError;
use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::evaluator::{EvaluatorKind, FrameEvaluator};
use crate::core::actions::render_frame::{render_frame, RenderFrameError, RenderedFrame};
use crate::core::fractals::mandelbrot::colour_mapping::factory::colour_map_factory;

struct SharedState {
    generation: AtomicU64,
    last_completed_generation: AtomicU64,
    latest_request: Mutex<Option<(u64, FrameRequest)>>,
    wake: Condvar,
    shutdown: AtomicBool,
    presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
}

/// Renders frames on a background thread, always working on the most recent
/// request. Submitting a new request cancels whatever is in flight.
pub struct InteractiveController {
    shared: Arc<SharedState>,
    evaluator_kind: EvaluatorKind,
    worker: Option<JoinHandle<()>>,
}

impl InteractiveController {
    pub fn new(
        presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
        evaluator: Box<dyn FrameEvaluator>,
    ) -> Self {
        let shared = Arc::new(SharedState {
            generation: AtomicU64::new(0),
            last_completed_generation: AtomicU64::new(0),
            latest_request: Mutex::new(None),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            presenter_port,
        });

        let evaluator_kind = evaluator.kind();
        let worker_shared = Arc::clone(&shared);

        let worker = thread::spawn(move || {
            Self::worker_loop(&worker_shared, evaluator.as_ref());
        });

        Self {
            shared,
            evaluator_kind,
            worker: Some(worker),
        }
    }

    pub fn submit_request(&self, request: FrameRequest) -> u64 {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut guard = self
                .shared
                .latest_request
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *guard = Some((generation, request));
        }

        self.shared.wake.notify_one();
        tracing::trace!(generation, "frame request submitted");

        generation
    }

    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::error!("render worker panicked");
            }
        }
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    #[must_use]
    pub fn evaluator_kind(&self) -> EvaluatorKind {
        self.evaluator_kind
    }

    fn worker_loop(shared: &Arc<SharedState>, evaluator: &dyn FrameEvaluator) {
        loop {
            let (job_generation, request) = {
                let mut guard = shared
                    .latest_request
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(req) = guard.take() {
                        break req;
                    }

                    guard = shared
                        .wake
                        .wait(guard)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            let cancel_token = || {
                shared.shutdown.load(Ordering::Relaxed)
                    || job_generation != shared.generation.load(Ordering::Relaxed)
            };

            let event = match Self::render_request(&request, evaluator, &cancel_token) {
                Ok(frame) => RenderEvent::Frame(FrameData {
                    generation: job_generation,
                    pixel_buffer: frame.pixel_buffer,
                    render_duration: frame.render_duration,
                    evaluator: frame.evaluator,
                }),
                Err(RenderFrameError::Cancelled(_)) => {
                    tracing::trace!(generation = job_generation, "render cancelled");
                    continue;
                }
                Err(err) => {
                    tracing::warn!(generation = job_generation, error = %err, "render failed");
                    RenderEvent::Error(RenderError {
                        generation: job_generation,
                        message: err.to_string(),
                    })
                }
            };

            if job_generation != shared.generation.load(Ordering::Acquire) {
                continue;
            }

            if let RenderEvent::Frame(frame) = &event {
                tracing::debug!(
                    generation = job_generation,
                    elapsed_ms = frame.render_duration.as_millis() as u64,
                    evaluator = %frame.evaluator,
                    "frame rendered"
                );
            }

            shared.presenter_port.present(event);
            shared
                .last_completed_generation
                .store(job_generation, Ordering::Release);
        }
    }

    fn render_request(
        request: &FrameRequest,
        evaluator: &dyn FrameEvaluator,
        cancel: &dyn CancelToken,
    ) -> Result<RenderedFrame, RenderFrameError> {
        let colour_map = colour_map_factory(request.colour_map, request.params.max_iterations);

        render_frame(request.params, colour_map.as_ref(), evaluator, cancel)
    }
}

impl Drop for InteractiveController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use crate::core::actions::evaluator::{RayonEvaluator, SerialEvaluator};
    use crate::core::data::canvas_size::CanvasSize;
    use crate::core::data::frame_params::FrameParams;
    use crate::core::fractals::mandelbrot::colour_mapping::kinds::ColourMapKind;
    use crate::core::view::viewport::ViewportState;

    #[derive(Default)]
    struct MockPresenterPort {
        events: Mutex<Vec<RenderEvent>>,
    }

    impl MockPresenterPort {
        fn take_events(&self) -> Vec<RenderEvent> {
            let mut guard = self.events.lock().unwrap();
            std::mem::take(&mut *guard)
        }
    }

    impl InteractiveControllerPresenterPort for MockPresenterPort {
        fn present(&self, event: RenderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn wait_for_events(sink: &MockPresenterPort, timeout: Duration) -> Vec<RenderEvent> {
        let start = Instant::now();
        loop {
            let events = sink.take_events();
            if !events.is_empty() {
                return events;
            }
            if start.elapsed() >= timeout {
                return events;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn controller(presenter_port: &Arc<MockPresenterPort>) -> InteractiveController {
        InteractiveController::new(
            Arc::clone(presenter_port) as Arc<dyn InteractiveControllerPresenterPort>,
            Box::new(SerialEvaluator),
        )
    }

    fn size() -> CanvasSize {
        CanvasSize::new(4, 4).unwrap()
    }

    fn create_test_request() -> FrameRequest {
        FrameRequest {
            params: FrameParams {
                view: ViewportState {
                    cx: -0.75,
                    cy: 0.0,
                    scale: 3.5 / 4.0,
                },
                size: size(),
                max_iterations: 10,
            },
            colour_map: ColourMapKind::RainbowBands,
        }
    }

    fn create_error_request() -> FrameRequest {
        let mut request = create_test_request();
        request.params.max_iterations = 0;
        request
    }

    fn extract_generation(events: &[RenderEvent]) -> u64 {
        events
            .first()
            .map(RenderEvent::generation)
            .expect("Should have at least one event with generation")
    }

    #[test]
    fn test_submit_request_emits_frame() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = controller(&presenter_port);

        let generation = controller.submit_request(create_test_request());
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert!(!events.is_empty(), "expected a render event");

        let mut saw_frame = false;
        for event in events {
            match event {
                RenderEvent::Frame(frame) => {
                    assert_eq!(frame.generation, generation);
                    assert!(generation > 0, "generation should be non-zero");
                    assert_eq!(frame.pixel_buffer.size(), size());
                    assert_eq!(frame.pixel_buffer.buffer().len(), 4 * 4 * 3);
                    assert_eq!(frame.evaluator, EvaluatorKind::Serial);
                    saw_frame = true;
                }
                RenderEvent::Error(error) => {
                    panic!("unexpected render error: {}", error.message);
                }
            }
        }

        assert!(saw_frame, "expected a frame event");
        controller.shutdown();
    }

    #[test]
    fn test_generation_ids_increment() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = controller(&presenter_port);

        controller.submit_request(create_test_request());
        let events_a = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert!(!events_a.is_empty(), "expected events from request A");
        let gen_a = extract_generation(&events_a);

        controller.submit_request(create_test_request());
        let events_b = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));
        assert!(!events_b.is_empty(), "expected events from request B");
        let gen_b = extract_generation(&events_b);

        assert!(gen_b > gen_a, "Generation B ({gen_b}) should be greater than A ({gen_a})");

        controller.shutdown();
    }

    #[test]
    fn test_last_completed_generation_starts_at_zero() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = controller(&presenter_port);

        assert_eq!(controller.last_completed_generation(), 0);

        controller.shutdown();
    }

    #[test]
    fn test_last_completed_generation_updates_after_error_completion() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = controller(&presenter_port);

        let submitted_generation = controller.submit_request(create_error_request());
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));

        let error = events
            .iter()
            .find_map(|event| match event {
                RenderEvent::Error(error) => Some(error),
                RenderEvent::Frame(_) => None,
            })
            .expect("expected an error event");

        assert_eq!(error.generation, submitted_generation);
        assert!(error.message.contains("iterations"));
        assert_eq!(controller.last_completed_generation(), submitted_generation);

        controller.shutdown();
    }

    #[test]
    fn test_last_completed_generation_is_monotonic_across_mixed_completions() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = controller(&presenter_port);
        let mut previous = 0;

        for request in [create_test_request(), create_error_request(), create_test_request()] {
            let generation = controller.submit_request(request);
            let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));

            assert_eq!(extract_generation(&events), generation);

            let completed = controller.last_completed_generation();
            assert!(completed >= previous);
            previous = completed;
        }

        controller.shutdown();
    }

    #[test]
    fn test_rapid_requests_do_not_emit_cancellation_errors() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = controller(&presenter_port);

        let mut last_gen = 0;
        for _ in 0..5 {
            last_gen = controller.submit_request(create_test_request());
        }

        let mut events = Vec::new();
        let start = Instant::now();
        while !events.iter().any(|event: &RenderEvent| event.generation() == last_gen)
            && start.elapsed() < Duration::from_secs(2)
        {
            events.extend(presenter_port.take_events());
            thread::sleep(Duration::from_millis(10));
        }

        // Nothing older may arrive once the latest frame is out.
        thread::sleep(Duration::from_millis(100));
        events.extend(presenter_port.take_events());

        for event in &events {
            if let RenderEvent::Error(err) = event {
                panic!("cancellation should not emit errors: {}", err.message);
            }
        }

        let generations: Vec<u64> = events.iter().map(RenderEvent::generation).collect();

        assert_eq!(generations.last(), Some(&last_gen), "emitted {generations:?}");
        assert!(
            generations.windows(2).all(|pair| pair[0] < pair[1]),
            "generations out of order: {generations:?}"
        );
        assert_eq!(controller.last_completed_generation(), last_gen);

        controller.shutdown();
    }

    #[test]
    fn test_rayon_backend_reports_its_kind() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let mut controller = InteractiveController::new(
            Arc::clone(&presenter_port) as Arc<dyn InteractiveControllerPresenterPort>,
            Box::new(RayonEvaluator::new(Some(2)).unwrap()),
        );

        assert_eq!(controller.evaluator_kind(), EvaluatorKind::Rayon { threads: 2 });

        controller.submit_request(create_test_request());
        let events = wait_for_events(presenter_port.as_ref(), Duration::from_secs(2));

        assert!(matches!(
            events.first(),
            Some(RenderEvent::Frame(frame)) if frame.evaluator == EvaluatorKind::Rayon { threads: 2 }
        ));

        controller.shutdown();
    }

    #[test]
    fn test_drop_joins_worker() {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let controller = controller(&presenter_port);

        drop(controller);

        assert_eq!(Arc::strong_count(&presenter_port), 1);
    }
}
