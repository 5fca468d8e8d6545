use std::fmt;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::category::Category;
use crate::constants::{
    BASE_SPIN_SECONDS, MAX_EXTRA_SPINS, MIN_CATEGORIES, MIN_EXTRA_SPINS, SECONDS_PER_EXTRA_SPIN,
};
use crate::easing::{spin_easing, CubicBezier};
use crate::geometry::target_angle;

/// Everything decided when a spin starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinPlan {
    pub winner_index: usize,
    pub winner: Category,
    pub extra_spins: u32,
    pub start_rotation: f64,
    pub final_rotation: f64,
    pub duration_ms: f64,
    pub started_at_ms: f64,
}

impl SpinPlan {
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms / 1000.0
    }

    /// Linear progress through the animation, in `[0, 1]`.
    pub fn progress(&self, now_ms: f64) -> f64 {
        ((now_ms - self.started_at_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn rotation_at(&self, now_ms: f64, easing: &CubicBezier) -> f64 {
        let eased = easing.ease(self.progress(now_ms));
        self.start_rotation + (self.final_rotation - self.start_rotation) * eased
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameState {
    Idle { rotation: f64 },
    Spinning { rotation: f64, progress: f64 },
    Finished { rotation: f64, winner: Category },
}

impl FrameState {
    pub fn rotation(&self) -> f64 {
        match self {
            FrameState::Idle { rotation }
            | FrameState::Spinning { rotation, .. }
            | FrameState::Finished { rotation, .. } => *rotation,
        }
    }
}

pub fn spin_duration_secs(extra_spins: u32) -> f64 {
    BASE_SPIN_SECONDS + SECONDS_PER_EXTRA_SPIN * extra_spins as f64
}

/// Absolute rotation that rests segment `target` under the pointer after
/// `extra_spins` full turns, always strictly ahead of `current`.
pub fn final_rotation(current: f64, target: f64, extra_spins: u32) -> f64 {
    let aligned = current - current.rem_euclid(360.0);
    let mut total = aligned + 360.0 * extra_spins as f64 + target;
    while total <= current {
        total += 360.0;
    }
    total
}

type StartListener = Box<dyn FnMut()>;
type EndListener = Box<dyn FnMut(&Category)>;

/// Owns the wheel's categories and rotation and runs one spin at a time.
///
/// The engine does not keep time itself: callers pass a millisecond clock
/// to [`WheelEngine::spin`] and then to [`WheelEngine::tick`] once per frame.
pub struct WheelEngine<R = StdRng> {
    categories: Vec<Category>,
    rotation: f64,
    spin: Option<SpinPlan>,
    rng: R,
    easing: CubicBezier,
    on_start: Option<StartListener>,
    on_end: Option<EndListener>,
}

impl WheelEngine<StdRng> {
    pub fn new(categories: Vec<Category>) -> Self {
        Self::with_rng(categories, StdRng::from_entropy())
    }
}

impl<R: Rng> WheelEngine<R> {
    pub fn with_rng(categories: Vec<Category>, rng: R) -> Self {
        Self {
            categories,
            rotation: 0.0,
            spin: None,
            rng,
            easing: spin_easing(),
            on_start: None,
            on_end: None,
        }
    }

    pub fn on_spin_start(mut self, listener: impl FnMut() + 'static) -> Self {
        self.on_start = Some(Box::new(listener));
        self
    }

    pub fn on_spin_end(mut self, listener: impl FnMut(&Category) + 'static) -> Self {
        self.on_end = Some(Box::new(listener));
        self
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The segments to draw. Mid-spin this is the set the winner was drawn
    /// from, whatever `latest` holds; otherwise `latest` is shown as is.
    pub fn display_categories(&self, latest: &[Category]) -> Vec<Category> {
        if self.is_spinning() {
            self.categories.clone()
        } else {
            latest.to_vec()
        }
    }

    /// Replaces the category set. Ignored mid-spin so the winner cannot
    /// change under the pointer.
    pub fn set_categories(&mut self, categories: Vec<Category>) -> bool {
        if self.is_spinning() {
            debug!("Category update deferred: wheel is spinning");
            return false;
        }
        self.categories = categories;
        true
    }

    /// Accumulated rotation in degrees as of the last completed spin.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    pub fn current_spin(&self) -> Option<&SpinPlan> {
        self.spin.as_ref()
    }

    pub fn can_spin(&self) -> bool {
        !self.is_spinning() && self.categories.len() >= MIN_CATEGORIES
    }

    /// Starts a spin at `now_ms`. Returns `None` without side effects when
    /// already spinning or when there are fewer than two categories.
    pub fn spin(&mut self, now_ms: f64) -> Option<SpinPlan> {
        if !self.can_spin() {
            debug!(
                "Spin ignored (spinning: {}, categories: {})",
                self.is_spinning(),
                self.categories.len()
            );
            return None;
        }

        let count = self.categories.len();
        let winner_index = self.rng.gen_range(0..count);
        let extra_spins = self.rng.gen_range(MIN_EXTRA_SPINS..=MAX_EXTRA_SPINS);
        let target = target_angle(winner_index, count);

        let plan = SpinPlan {
            winner_index,
            winner: self.categories[winner_index].clone(),
            extra_spins,
            start_rotation: self.rotation,
            final_rotation: final_rotation(self.rotation, target, extra_spins),
            duration_ms: spin_duration_secs(extra_spins) * 1000.0,
            started_at_ms: now_ms,
        };
        debug!(
            "Spin started: winner {} of {}, {} extra turns, {:.1}s",
            winner_index,
            count,
            extra_spins,
            plan.duration_secs()
        );

        self.spin = Some(plan.clone());
        if let Some(listener) = self.on_start.as_mut() {
            listener();
        }
        Some(plan)
    }

    /// Advances the animation to `now_ms`, finishing the spin and notifying
    /// the end listener once the full duration has elapsed.
    pub fn tick(&mut self, now_ms: f64) -> FrameState {
        let Some(plan) = self.spin.as_ref() else {
            return FrameState::Idle { rotation: self.rotation };
        };

        let progress = plan.progress(now_ms);
        if progress < 1.0 {
            return FrameState::Spinning {
                rotation: plan.rotation_at(now_ms, &self.easing),
                progress,
            };
        }

        let Some(plan) = self.spin.take() else {
            return FrameState::Idle { rotation: self.rotation };
        };
        self.rotation = plan.final_rotation;
        info!("Wheel landed on {:?}", plan.winner.name);
        if let Some(listener) = self.on_end.as_mut() {
            listener(&plan.winner);
        }
        FrameState::Finished {
            rotation: self.rotation,
            winner: plan.winner,
        }
    }

    /// Abandons an in-flight spin without notifying anyone. The rotation
    /// stays where the last completed spin left it.
    pub fn teardown(&mut self) {
        if self.spin.take().is_some() {
            debug!("Spin cancelled before completion");
        }
    }
}

impl<R> Drop for WheelEngine<R> {
    fn drop(&mut self) {
        if self.spin.take().is_some() {
            debug!("Wheel dropped mid-spin");
        }
    }
}

impl<R> fmt::Debug for WheelEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WheelEngine")
            .field("categories", &self.categories.len())
            .field("rotation", &self.rotation)
            .field("spin", &self.spin)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::default_categories;
    use crate::geometry::segment_center;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn categories(count: usize) -> Vec<Category> {
        (0..count)
            .map(|i| Category::new(format!("Option {}", i + 1), "#FF6B6B"))
            .collect()
    }

    fn seeded(count: usize, seed: u64) -> WheelEngine<StdRng> {
        WheelEngine::with_rng(categories(count), StdRng::seed_from_u64(seed))
    }

    fn run_spin<R: Rng>(engine: &mut WheelEngine<R>, now: f64) -> (SpinPlan, FrameState) {
        let plan = engine.spin(now).expect("spin should start");
        let frame = engine.tick(now + plan.duration_ms);
        (plan, frame)
    }

    #[test]
    fn test_final_rotation_examples() {
        assert_eq!(final_rotation(0.0, 330.0, 5), 2130.0);
        assert_eq!(final_rotation(0.0, 135.0, 7), 2655.0);
        // Residual rotation from earlier spins is discounted.
        assert_eq!(final_rotation(2130.0, 135.0, 5), 1800.0 + 1800.0 + 135.0);
    }

    #[test]
    fn test_every_count_finishes_idle_with_valid_winner() {
        for count in 2..=20 {
            let mut engine = seeded(count, count as u64);
            for round in 0..20 {
                let (plan, frame) = run_spin(&mut engine, round as f64 * 10_000.0);
                assert!(plan.winner_index < count);
                assert!(!engine.is_spinning());
                match frame {
                    FrameState::Finished { winner, .. } => {
                        assert_eq!(winner, engine.categories()[plan.winner_index]);
                    }
                    other => panic!("expected a finished frame, got {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_winner_distribution_is_uniform() {
        let count = 6;
        let spins = 60_000;
        let mut engine = seeded(count, 42);
        let mut hits = vec![0u32; count];
        for i in 0..spins {
            let (plan, _) = run_spin(&mut engine, i as f64 * 10_000.0);
            hits[plan.winner_index] += 1;
        }

        let expected = spins as f64 / count as f64;
        let chi_square: f64 = hits
            .iter()
            .map(|&observed| (observed as f64 - expected).powi(2) / expected)
            .sum();
        // 99.99th percentile of chi-square with 5 degrees of freedom.
        assert!(chi_square < 25.745, "chi-square {} for {:?}", chi_square, hits);
    }

    #[test]
    fn test_rotation_strictly_increases() {
        let mut engine = seeded(7, 3);
        let mut previous = engine.rotation();
        for i in 0..200 {
            run_spin(&mut engine, i as f64 * 10_000.0);
            assert!(engine.rotation() > previous);
            previous = engine.rotation();
        }
    }

    #[test]
    fn test_pointer_lands_on_winner() {
        for count in 2..=20 {
            let mut engine = seeded(count, 100 + count as u64);
            for i in 0..10 {
                let (plan, _) = run_spin(&mut engine, i as f64 * 10_000.0);
                // The segment center plus the wheel's rotation sits at the top.
                let landed = (segment_center(plan.winner_index, count) + engine.rotation())
                    .rem_euclid(360.0);
                assert!(landed < 1e-6 || (360.0 - landed) < 1e-6, "landed at {}", landed);
            }
        }
    }

    #[test]
    fn test_extra_spins_and_duration() {
        let mut engine = seeded(4, 9);
        let mut seen = [false; 3];
        for i in 0..300 {
            let (plan, _) = run_spin(&mut engine, i as f64 * 10_000.0);
            assert!((MIN_EXTRA_SPINS..=MAX_EXTRA_SPINS).contains(&plan.extra_spins));
            seen[(plan.extra_spins - MIN_EXTRA_SPINS) as usize] = true;
            let expected = match plan.extra_spins {
                5 => 6.5,
                6 => 7.0,
                _ => 7.5,
            };
            assert_eq!(plan.duration_secs(), expected);
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_spin_preconditions_are_noops() {
        let mut engine = seeded(1, 1);
        assert!(engine.spin(0.0).is_none());
        assert!(!engine.is_spinning());

        let mut engine = seeded(3, 1);
        let first = engine.spin(0.0).unwrap();
        assert!(engine.spin(10.0).is_none());
        assert_eq!(engine.current_spin(), Some(&first));
    }

    #[test]
    fn test_frames_follow_easing_curve() {
        let mut engine = seeded(5, 21);
        let plan = engine.spin(1_000.0).unwrap();

        let halfway = 1_000.0 + plan.duration_ms / 2.0;
        match engine.tick(halfway) {
            FrameState::Spinning { rotation, progress } => {
                assert!((progress - 0.5).abs() < 1e-9);
                let expected = plan.rotation_at(halfway, &spin_easing());
                assert!((rotation - expected).abs() < 1e-9);
                assert!(rotation > plan.start_rotation && rotation < plan.final_rotation);
            }
            other => panic!("expected a spinning frame, got {:?}", other),
        }
        // The committed rotation only moves once the spin completes.
        assert_eq!(engine.rotation(), plan.start_rotation);
    }

    #[test]
    fn test_notifications_fire_once() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let start_events = events.clone();
        let end_events = events.clone();
        let mut engine = WheelEngine::with_rng(default_categories(), StdRng::seed_from_u64(5))
            .on_spin_start(move || start_events.borrow_mut().push("start".to_string()))
            .on_spin_end(move |winner| end_events.borrow_mut().push(winner.name.clone()));

        let plan = engine.spin(0.0).unwrap();
        engine.tick(plan.duration_ms / 3.0);
        engine.tick(plan.duration_ms);
        engine.tick(plan.duration_ms * 2.0);

        assert_eq!(*events.borrow(), vec!["start".to_string(), plan.winner.name.clone()]);
    }

    #[test]
    fn test_teardown_suppresses_completion() {
        let ended = Rc::new(RefCell::new(0));
        let counter = ended.clone();
        let mut engine = WheelEngine::with_rng(categories(4), StdRng::seed_from_u64(8))
            .on_spin_end(move |_| *counter.borrow_mut() += 1);

        let plan = engine.spin(0.0).unwrap();
        engine.teardown();
        assert!(!engine.is_spinning());
        assert_eq!(engine.tick(plan.duration_ms), FrameState::Idle { rotation: 0.0 });
        assert_eq!(*ended.borrow(), 0);

        // Dropping mid-spin is equally quiet.
        engine.spin(0.0).unwrap();
        drop(engine);
        assert_eq!(*ended.borrow(), 0);
    }

    #[test]
    fn test_set_categories_blocked_while_spinning() {
        let mut engine = seeded(3, 2);
        engine.spin(0.0).unwrap();
        assert!(!engine.set_categories(categories(5)));
        assert_eq!(engine.categories().len(), 3);
        engine.tick(1_000_000.0);
        assert!(engine.set_categories(categories(5)));
        assert_eq!(engine.categories().len(), 5);
    }

    #[test]
    fn test_displayed_segments_stay_put_while_spinning() {
        let mut engine = seeded(3, 11);
        let original = engine.categories().to_vec();
        let edited = categories(5);

        let plan = engine.spin(0.0).unwrap();
        engine.set_categories(edited.clone());
        let shown = engine.display_categories(&edited);
        assert_eq!(shown, original);
        assert_eq!(shown[plan.winner_index], plan.winner);

        engine.tick(plan.duration_ms / 2.0);
        assert_eq!(engine.display_categories(&edited), original);

        engine.tick(plan.duration_ms);
        assert_eq!(engine.display_categories(&edited), edited);
    }

    #[test]
    fn test_default_wheel_end_to_end() {
        let defaults = default_categories();
        let mut engine = WheelEngine::new(defaults.clone());

        let plan = engine.spin(0.0).unwrap();
        assert!(engine.is_spinning());

        let mut now = 0.0;
        let winner = loop {
            now += 16.0;
            if let FrameState::Finished { winner, .. } = engine.tick(now) {
                break winner;
            }
            assert!(now <= plan.duration_ms, "spin overran its duration");
        };

        assert!(!engine.is_spinning());
        assert!(defaults.contains(&winner));
        assert_eq!(winner, plan.winner);
    }
}
