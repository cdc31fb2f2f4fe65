use crate::error::GalleryError;
use crate::slide::Slide;

/// Presentation hint describing the most recent transition. Drives which side
/// the new slide enters from; carries no invariant relative to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Snapshot of the controller state, handed to change listeners and polled by
/// the viewer each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    pub active_index: usize,
    pub direction: Direction,
    pub slide_count: usize,
}

type ChangeListener = Box<dyn FnMut(CarouselState)>;

/// Cyclic carousel over a fixed, ordered slide deck.
///
/// Owns the active index, the direction hint and the auto-advance timer. The
/// timer is an accumulator fed by the host loop through [`tick`]: every full
/// interval elapsed while armed performs one [`next`]. Nothing can fire
/// outside `tick`, so `stop` (and dropping the controller) guarantees no
/// further mutation.
///
/// [`tick`]: CarouselController::tick
/// [`next`]: CarouselController::next
pub struct CarouselController {
    slides: Vec<Slide>,
    active_index: usize,
    direction: Direction,
    interval: f32,
    armed: bool,
    elapsed: f32,
    listeners: Vec<ChangeListener>,
}

impl CarouselController {
    /// `interval_secs` is the auto-advance period; zero disables autoplay.
    /// An empty deck is legal: every navigation call becomes a no-op.
    pub fn new(slides: Vec<Slide>, interval_secs: f32) -> Self {
        Self {
            slides,
            active_index: 0,
            direction: Direction::Forward,
            interval: interval_secs.max(0.0),
            armed: false,
            elapsed: 0.0,
            listeners: Vec::new(),
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            active_index: self.active_index,
            direction: self.direction,
            slide_count: self.slides.len(),
        }
    }

    /// The slide at the active index, or `None` on an empty deck.
    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.active_index)
    }

    /// Registers a listener invoked once per effective state change (the
    /// index or the direction actually changed). No-op calls never notify.
    pub fn subscribe(&mut self, listener: impl FnMut(CarouselState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Advance to the following slide, wrapping at the end of the deck.
    pub fn next(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        let index = (self.active_index + 1) % self.slides.len();
        self.apply(index, Direction::Forward);
    }

    /// Step back to the preceding slide, wrapping at the start of the deck.
    pub fn previous(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        // Positive offset before the modulo keeps the arithmetic unsigned.
        let index = (self.active_index + self.slides.len() - 1) % self.slides.len();
        self.apply(index, Direction::Backward);
    }

    /// Jump straight to `index`. Direction follows the sign of the jump;
    /// re-selecting the current slide leaves the state untouched.
    pub fn go_to(&mut self, index: usize) -> Result<(), GalleryError> {
        if index >= self.slides.len() {
            return Err(GalleryError::OutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        if index > self.active_index {
            self.apply(index, Direction::Forward);
        } else if index < self.active_index {
            self.apply(index, Direction::Backward);
        }
        Ok(())
    }

    /// Arm the auto-advance timer. Idempotent; a zero interval disables
    /// autoplay entirely.
    pub fn start(&mut self) {
        if self.armed || self.interval <= 0.0 {
            return;
        }
        self.armed = true;
        self.elapsed = 0.0;
    }

    /// Disarm the auto-advance timer. Idempotent. Once this returns, no
    /// amount of elapsed time moves the index.
    pub fn stop(&mut self) {
        self.armed = false;
        self.elapsed = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.armed
    }

    /// Feed elapsed seconds from the host loop. Performs one `next()` per
    /// full interval elapsed while armed; the remainder carries over.
    pub fn tick(&mut self, dt: f32) {
        if !self.armed || self.interval <= 0.0 {
            return;
        }
        self.elapsed += dt;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.next();
        }
    }

    fn apply(&mut self, index: usize, direction: Direction) {
        if index == self.active_index && direction == self.direction {
            return;
        }
        self.active_index = index;
        self.direction = direction;
        let state = self.state();
        for listener in &mut self.listeners {
            listener(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    fn deck(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| {
                Slide::new(
                    format!("slide-{i}"),
                    format!("Slide {i}"),
                    PathBuf::from(format!("{i}.png")),
                    Vec::new(),
                )
            })
            .collect()
    }

    fn controller(n: usize) -> CarouselController {
        CarouselController::new(deck(n), 0.0)
    }

    #[test]
    fn next_cycles_back_to_start() {
        for n in 1..6 {
            for start in 0..n {
                let mut c = controller(n);
                for _ in 0..start {
                    c.next();
                }
                let origin = c.active_index();
                for _ in 0..n {
                    c.next();
                }
                assert_eq!(c.active_index(), origin, "deck of {n}, start {start}");
            }
        }
    }

    #[test]
    fn previous_then_next_is_identity() {
        for n in 1..6 {
            let mut c = controller(n);
            c.next();
            let before = c.active_index();
            c.previous();
            c.next();
            assert_eq!(c.active_index(), before, "deck of {n}");
            assert_eq!(c.direction(), Direction::Forward);
        }
    }

    #[test]
    fn previous_wraps_from_zero_to_last() {
        let mut c = controller(4);
        c.previous();
        assert_eq!(c.active_index(), 3);
        assert_eq!(c.direction(), Direction::Backward);
    }

    #[test]
    fn single_slide_navigation_updates_direction_only() {
        let mut c = controller(1);
        c.previous();
        assert_eq!(c.active_index(), 0);
        assert_eq!(c.direction(), Direction::Backward);
        c.next();
        assert_eq!(c.active_index(), 0);
        assert_eq!(c.direction(), Direction::Forward);
    }

    #[test]
    fn go_to_sets_index_and_direction_by_sign() {
        let mut c = controller(5);
        c.go_to(3).unwrap();
        assert_eq!(c.active_index(), 3);
        assert_eq!(c.direction(), Direction::Forward);
        c.go_to(1).unwrap();
        assert_eq!(c.active_index(), 1);
        assert_eq!(c.direction(), Direction::Backward);
    }

    #[test]
    fn go_to_current_index_leaves_direction_alone() {
        let mut c = controller(3);
        c.go_to(2).unwrap();
        c.go_to(0).unwrap();
        assert_eq!(c.direction(), Direction::Backward);
        c.go_to(0).unwrap();
        assert_eq!(c.active_index(), 0);
        assert_eq!(c.direction(), Direction::Backward);
    }

    #[test]
    fn go_to_out_of_range_fails_and_preserves_state() {
        let mut c = controller(3);
        c.next();
        let before = c.state();
        let err = c.go_to(3).unwrap_err();
        assert!(matches!(err, GalleryError::OutOfRange { index: 3, len: 3 }));
        assert_eq!(c.state(), before);
    }

    #[test]
    fn empty_deck_is_inert() {
        let mut c = controller(0);
        c.next();
        c.previous();
        assert_eq!(c.slide_count(), 0);
        assert!(c.current_slide().is_none());
        assert!(matches!(
            c.go_to(0),
            Err(GalleryError::OutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn empty_deck_autoplay_never_fires() {
        let mut c = CarouselController::new(deck(0), 1.0);
        let fired = Rc::new(RefCell::new(0usize));
        let counter = Rc::clone(&fired);
        c.subscribe(move |_| *counter.borrow_mut() += 1);
        c.start();
        c.tick(10.0);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn current_slide_follows_the_index() {
        let mut c = controller(3);
        c.next();
        assert_eq!(c.current_slide().map(|s| s.id.as_str()), Some("slide-1"));
    }

    #[test]
    fn autoplay_advances_one_step_per_interval() {
        let mut c = CarouselController::new(deck(4), 5.0);
        c.start();
        for _ in 0..3 {
            c.tick(5.0);
        }
        assert_eq!(c.active_index(), 3);
        assert_eq!(c.direction(), Direction::Forward);
    }

    #[test]
    fn autoplay_carries_remainder_across_ticks() {
        let mut c = CarouselController::new(deck(10), 1.0);
        c.start();
        for _ in 0..10 {
            c.tick(0.25);
        }
        // 2.5 seconds elapsed in total
        assert_eq!(c.active_index(), 2);
    }

    #[test]
    fn large_tick_advances_once_per_full_interval() {
        let mut c = CarouselController::new(deck(3), 1.0);
        c.start();
        c.tick(4.0);
        // four intervals on a deck of three wraps to index 1
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn tick_without_start_does_nothing() {
        let mut c = CarouselController::new(deck(3), 1.0);
        c.tick(100.0);
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn stop_suppresses_pending_time() {
        let mut c = CarouselController::new(deck(3), 1.0);
        c.start();
        c.tick(0.9);
        c.stop();
        c.tick(100.0);
        assert_eq!(c.active_index(), 0);
        assert!(!c.is_running());
    }

    #[test]
    fn restart_does_not_credit_time_accrued_before_stop() {
        let mut c = CarouselController::new(deck(3), 1.0);
        c.start();
        c.tick(0.9);
        c.stop();
        c.start();
        c.tick(0.5);
        assert_eq!(c.active_index(), 0);
        c.tick(0.5);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn start_is_idempotent() {
        let mut c = CarouselController::new(deck(3), 1.0);
        c.start();
        c.tick(0.6);
        c.start();
        c.tick(0.6);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn zero_interval_disables_autoplay() {
        let mut c = CarouselController::new(deck(3), 0.0);
        c.start();
        assert!(!c.is_running());
        c.tick(100.0);
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn listeners_fire_once_per_effective_change() {
        let mut c = controller(3);
        let seen: Rc<RefCell<Vec<CarouselState>>> = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        c.subscribe(move |s| log.borrow_mut().push(s));

        c.next();
        c.go_to(1).unwrap(); // re-selection: no notification
        c.go_to(2).unwrap();
        c.previous();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].active_index, 1);
        assert_eq!(seen[1].active_index, 2);
        assert_eq!(seen[2].active_index, 1);
        assert_eq!(seen[2].direction, Direction::Backward);
    }

    #[test]
    fn repeated_next_on_single_slide_notifies_only_on_direction_flip() {
        let mut c = controller(1);
        let fired = Rc::new(RefCell::new(0usize));
        let counter = Rc::clone(&fired);
        c.subscribe(move |_| *counter.borrow_mut() += 1);

        c.next(); // direction already Forward, index unchanged
        assert_eq!(*fired.borrow(), 0);
        c.previous(); // direction flips
        assert_eq!(*fired.borrow(), 1);
        c.previous();
        assert_eq!(*fired.borrow(), 1);
    }

    // The walkthrough from the product notes: [A, B, C], starting at 0.
    #[test]
    fn three_slide_walkthrough() {
        let mut c = controller(3);
        c.next();
        assert_eq!((c.active_index(), c.direction()), (1, Direction::Forward));
        c.next();
        assert_eq!(c.active_index(), 2);
        c.next();
        assert_eq!(c.active_index(), 0); // wraps
        c.previous();
        assert_eq!((c.active_index(), c.direction()), (2, Direction::Backward));
        c.go_to(0).unwrap();
        assert_eq!((c.active_index(), c.direction()), (0, Direction::Backward));
        c.go_to(0).unwrap();
        assert_eq!((c.active_index(), c.direction()), (0, Direction::Backward));
    }
}
