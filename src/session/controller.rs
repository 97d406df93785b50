//! Sequence controller state machine.

use super::clock::FrameClock;
use super::interval::Interval;
use crate::error::{FringeError, Result};
use crate::fringe::{FringeImage, Sequence};
use std::time::Instant;

/// Display surface the controller presents frames on.
pub trait Presenter {
    /// Queue `image` for the next refresh, filling the whole surface.
    fn present(&mut self, image: &FringeImage) -> Result<()>;

    /// Release the surface. Called once, when the run stops.
    fn release(&mut self);
}

/// Why a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Every frame was shown for its full interval.
    Completed,
    /// Cancelled by the user before the sequence was exhausted.
    Cancelled,
    /// The display surface could not present a frame.
    PresentationFailed(String),
}

/// Lifecycle of a controller run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Running,
    Stopped(StopReason),
}

impl ControllerState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ControllerState::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ControllerState::Running)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, ControllerState::Stopped(_))
    }
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerState::Idle => write!(f, "Idle"),
            ControllerState::Running => write!(f, "Running"),
            ControllerState::Stopped(StopReason::Completed) => write!(f, "Completed"),
            ControllerState::Stopped(StopReason::Cancelled) => write!(f, "Cancelled"),
            ControllerState::Stopped(StopReason::PresentationFailed(msg)) => {
                write!(f, "Presentation failed: {}", msg)
            }
        }
    }
}

/// Mutable part of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    /// Index of the frame currently on screen.
    pub current_index: usize,
    /// Time each frame stays on screen.
    pub interval: Interval,
}

/// Drives one timed pass over a [`Sequence`].
///
/// The controller never sleeps. Its host calls [`SequenceController::poll`]
/// whenever [`SequenceController::next_deadline`] is reached and routes
/// cancel requests to [`SequenceController::cancel`], all from one thread.
pub struct SequenceController {
    sequence: Sequence,
    state: ControllerState,
    display: Option<DisplayState>,
    clock: Option<FrameClock>,
}

impl SequenceController {
    pub fn new(sequence: Sequence) -> Self {
        Self {
            sequence,
            state: ControllerState::Idle,
            display: None,
            clock: None,
        }
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Present/interval state; `None` outside a run.
    pub fn display_state(&self) -> Option<&DisplayState> {
        self.display.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.display.map(|d| d.current_index)
    }

    /// When the next tick is due; `None` once the timer is disarmed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.clock.as_ref().and_then(FrameClock::deadline)
    }

    /// Show the first frame and arm the timer.
    pub fn start<P: Presenter>(
        &mut self,
        interval: Interval,
        now: Instant,
        presenter: &mut P,
    ) -> Result<()> {
        if !self.state.is_idle() {
            return Err(FringeError::InvalidTransition(
                "start requires an idle controller",
            ));
        }

        log::info!(
            "Starting sequence of {} images at {:.3}s per image",
            self.sequence.len(),
            interval.as_secs_f64()
        );

        self.state = ControllerState::Running;
        self.display = Some(DisplayState {
            current_index: 0,
            interval,
        });
        self.show(0, presenter)?;

        let mut clock = FrameClock::new(interval);
        clock.arm(now);
        self.clock = Some(clock);
        Ok(())
    }

    /// Advance one frame, or stop once the sequence is exhausted.
    ///
    /// Ignored unless running.
    pub fn tick<P: Presenter>(&mut self, now: Instant, presenter: &mut P) -> Result<()> {
        if !self.state.is_running() {
            return Ok(());
        }
        let Some(display) = self.display.as_mut() else {
            return Ok(());
        };

        display.current_index += 1;
        let index = display.current_index;
        if index >= self.sequence.len() {
            self.stop(StopReason::Completed, presenter);
            return Ok(());
        }

        self.show(index, presenter)?;
        if let Some(clock) = self.clock.as_mut() {
            clock.advance(now);
        }
        Ok(())
    }

    /// Tick if the timer is due. Returns whether a tick was processed.
    pub fn poll<P: Presenter>(&mut self, now: Instant, presenter: &mut P) -> Result<bool> {
        let due = self.state.is_running()
            && self.clock.as_ref().is_some_and(|clock| clock.is_due(now));
        if due {
            self.tick(now, presenter)?;
        }
        Ok(due)
    }

    /// Stop immediately. No frame is presented after this returns.
    pub fn cancel<P: Presenter>(&mut self, presenter: &mut P) {
        if self.state.is_stopped() {
            return;
        }
        self.stop(StopReason::Cancelled, presenter);
    }

    fn show<P: Presenter>(&mut self, index: usize, presenter: &mut P) -> Result<()> {
        let Some(frame) = self.sequence.get(index) else {
            return Ok(());
        };

        log::info!(
            "Displaying image {} of {} ({}, shift {:.4} rad)",
            index + 1,
            self.sequence.len(),
            frame.orientation,
            frame.phase_shift
        );

        if let Err(e) = presenter.present(&frame.image) {
            log::error!("{}", e);
            self.stop(StopReason::PresentationFailed(e.to_string()), presenter);
            return Err(e);
        }
        Ok(())
    }

    fn stop<P: Presenter>(&mut self, reason: StopReason, presenter: &mut P) {
        if let Some(mut clock) = self.clock.take() {
            clock.disarm();
        }
        let last = self.display.take().map(|d| d.current_index);
        self.state = ControllerState::Stopped(reason);
        presenter.release();

        match last {
            Some(index) => log::info!("Sequence stopped at index {}: {}", index, self.state),
            None => log::info!("Sequence stopped before start: {}", self.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fringe::{build_sequence, Shape};
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingPresenter {
        presented: Vec<FringeImage>,
        releases: usize,
        fail_on: Option<usize>,
    }

    impl Presenter for RecordingPresenter {
        fn present(&mut self, image: &FringeImage) -> Result<()> {
            if self.fail_on == Some(self.presented.len()) {
                return Err(FringeError::PresentationFailure("surface lost".to_string()));
            }
            self.presented.push(image.clone());
            Ok(())
        }

        fn release(&mut self) {
            self.releases += 1;
        }
    }

    fn controller() -> SequenceController {
        SequenceController::new(build_sequence(Shape::new(6, 10).unwrap()).unwrap())
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn assert_presented_in_order(ctrl: &SequenceController, presenter: &RecordingPresenter) {
        let expected: Vec<&FringeImage> = ctrl
            .sequence()
            .iter()
            .take(presenter.presented.len())
            .map(|frame| &frame.image)
            .collect();
        let actual: Vec<&FringeImage> = presenter.presented.iter().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_start_presents_first_frame() {
        let mut ctrl = controller();
        let mut presenter = RecordingPresenter::default();
        let t0 = Instant::now();

        ctrl.start(Interval::try_from_secs(1.0).unwrap(), t0, &mut presenter)
            .unwrap();

        assert!(ctrl.state().is_running());
        assert_eq!(ctrl.current_index(), Some(0));
        assert_eq!(presenter.presented.len(), 1);
        assert_eq!(ctrl.next_deadline(), Some(t0 + secs(1.0)));
    }

    #[test]
    fn test_full_run_visits_every_index_once() {
        let mut ctrl = controller();
        let mut presenter = RecordingPresenter::default();
        let t0 = Instant::now();
        ctrl.start(Interval::try_from_secs(1.0).unwrap(), t0, &mut presenter)
            .unwrap();

        for n in 1..8 {
            // Not due yet half way through the interval.
            assert!(!ctrl.poll(t0 + secs(n as f64 - 0.5), &mut presenter).unwrap());
            assert!(ctrl.poll(t0 + secs(n as f64), &mut presenter).unwrap());
            assert_eq!(ctrl.current_index(), Some(n));
        }
        assert_eq!(presenter.presented.len(), 8);
        assert_eq!(presenter.releases, 0);

        assert!(ctrl.poll(t0 + secs(8.0), &mut presenter).unwrap());
        assert_eq!(*ctrl.state(), ControllerState::Stopped(StopReason::Completed));
        assert_eq!(presenter.presented.len(), 8);
        assert_eq!(presenter.releases, 1);
        assert_eq!(ctrl.next_deadline(), None);
        assert_eq!(ctrl.display_state(), None);
        assert_presented_in_order(&ctrl, &presenter);

        // Stale ticks after completion are ignored.
        assert!(!ctrl.poll(t0 + secs(9.0), &mut presenter).unwrap());
        ctrl.tick(t0 + secs(9.0), &mut presenter).unwrap();
        assert_eq!(presenter.presented.len(), 8);
        assert_eq!(presenter.releases, 1);
    }

    #[test]
    fn test_cancel_stops_at_any_index() {
        for cancel_at in 0..7 {
            let mut ctrl = controller();
            let mut presenter = RecordingPresenter::default();
            let t0 = Instant::now();
            ctrl.start(Interval::try_from_secs(1.0).unwrap(), t0, &mut presenter)
                .unwrap();

            for n in 1..=cancel_at {
                ctrl.poll(t0 + secs(n as f64), &mut presenter).unwrap();
            }
            assert_eq!(ctrl.current_index(), Some(cancel_at));

            ctrl.cancel(&mut presenter);
            assert_eq!(*ctrl.state(), ControllerState::Stopped(StopReason::Cancelled));
            assert_eq!(ctrl.next_deadline(), None);

            // A tick that was already due must not be presented.
            ctrl.tick(t0 + secs(cancel_at as f64 + 1.0), &mut presenter)
                .unwrap();
            for n in cancel_at + 1..12 {
                assert!(!ctrl.poll(t0 + secs(n as f64), &mut presenter).unwrap());
            }

            assert_eq!(presenter.presented.len(), cancel_at + 1);
            assert_eq!(presenter.releases, 1);
            assert_presented_in_order(&ctrl, &presenter);

            ctrl.cancel(&mut presenter);
            assert_eq!(presenter.releases, 1);
        }
    }

    #[test]
    fn test_fallback_interval_matches_default() {
        let t0 = Instant::now();
        let mut fallback = controller();
        let mut fallback_presenter = RecordingPresenter::default();
        fallback
            .start(Interval::from_secs_lossy(-1.0), t0, &mut fallback_presenter)
            .unwrap();

        let mut explicit = controller();
        let mut explicit_presenter = RecordingPresenter::default();
        explicit
            .start(Interval::from_secs_lossy(2.0), t0, &mut explicit_presenter)
            .unwrap();

        assert_eq!(fallback.display_state(), explicit.display_state());
        for n in 1..=8 {
            let now = t0 + secs(2.0 * n as f64);
            assert_eq!(fallback.next_deadline(), explicit.next_deadline());
            assert_eq!(
                fallback.poll(now - secs(0.1), &mut fallback_presenter).unwrap(),
                explicit.poll(now - secs(0.1), &mut explicit_presenter).unwrap()
            );
            assert_eq!(
                fallback.poll(now, &mut fallback_presenter).unwrap(),
                explicit.poll(now, &mut explicit_presenter).unwrap()
            );
        }
        assert_eq!(fallback_presenter.presented, explicit_presenter.presented);
        assert_eq!(fallback.state(), explicit.state());
    }

    #[test]
    fn test_late_host_presents_one_frame_per_poll() {
        let mut ctrl = controller();
        let mut presenter = RecordingPresenter::default();
        let t0 = Instant::now();
        ctrl.start(Interval::try_from_secs(1.0).unwrap(), t0, &mut presenter)
            .unwrap();

        let late = t0 + secs(3.5);
        assert!(ctrl.poll(late, &mut presenter).unwrap());
        assert!(!ctrl.poll(late, &mut presenter).unwrap());
        assert_eq!(ctrl.current_index(), Some(1));
        assert_eq!(ctrl.next_deadline(), Some(late + secs(1.0)));
    }

    #[test]
    fn test_presentation_failure_stops_run() {
        let mut ctrl = controller();
        let mut presenter = RecordingPresenter {
            fail_on: Some(3),
            ..Default::default()
        };
        let t0 = Instant::now();
        ctrl.start(Interval::try_from_secs(1.0).unwrap(), t0, &mut presenter)
            .unwrap();
        ctrl.poll(t0 + secs(1.0), &mut presenter).unwrap();
        ctrl.poll(t0 + secs(2.0), &mut presenter).unwrap();

        let result = ctrl.poll(t0 + secs(3.0), &mut presenter);
        assert!(matches!(result, Err(FringeError::PresentationFailure(_))));
        assert!(matches!(
            ctrl.state(),
            ControllerState::Stopped(StopReason::PresentationFailed(_))
        ));
        assert_eq!(presenter.releases, 1);
        assert_eq!(ctrl.next_deadline(), None);
        assert!(!ctrl.poll(t0 + secs(4.0), &mut presenter).unwrap());
        assert_eq!(presenter.presented.len(), 3);
    }

    #[test]
    fn test_failure_on_first_frame_releases_surface() {
        let mut ctrl = controller();
        let mut presenter = RecordingPresenter {
            fail_on: Some(0),
            ..Default::default()
        };
        let result = ctrl.start(Interval::DEFAULT, Instant::now(), &mut presenter);

        assert!(matches!(result, Err(FringeError::PresentationFailure(_))));
        assert!(ctrl.state().is_stopped());
        assert_eq!(ctrl.next_deadline(), None);
        assert_eq!(presenter.releases, 1);
    }

    #[test]
    fn test_oversized_interval_falls_back_to_default() {
        let mut ctrl = controller();
        let mut presenter = RecordingPresenter::default();
        let t0 = Instant::now();

        ctrl.start(Interval::parse_lossy("1e19"), t0, &mut presenter)
            .unwrap();

        assert_eq!(ctrl.display_state().map(|d| d.interval), Some(Interval::DEFAULT));
        assert_eq!(ctrl.next_deadline(), Some(t0 + secs(2.0)));
        assert!(ctrl.poll(t0 + secs(2.0), &mut presenter).unwrap());
        assert_eq!(presenter.presented.len(), 2);
    }

    #[test]
    fn test_stopped_is_terminal() {
        let mut ctrl = controller();
        let mut presenter = RecordingPresenter::default();
        ctrl.cancel(&mut presenter);
        assert_eq!(*ctrl.state(), ControllerState::Stopped(StopReason::Cancelled));

        let result = ctrl.start(Interval::DEFAULT, Instant::now(), &mut presenter);
        assert!(matches!(result, Err(FringeError::InvalidTransition(_))));
        assert!(presenter.presented.is_empty());
        assert_eq!(presenter.releases, 1);
    }
}
