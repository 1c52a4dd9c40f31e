//! Photo [`Carousel`] gesture state machine.
//!
//! The [`Carousel`] owns no timers: a renderer feeds it pointer samples and
//! reports the end of every transition via [`Carousel::finish_transition()`].

use std::time::Duration;

use rust_decimal::Decimal;

use crate::Percent;

/// Thresholds of a [`Carousel`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Horizontal distance, relative to the viewport width, a drag must
    /// exceed to be accepted as a swipe.
    pub distance_threshold: Percent,

    /// Velocity (px/ms) a drag must exceed to be accepted as a swipe
    /// regardless of its distance.
    pub velocity_threshold: f64,

    /// Duration of the sliding and returning animations.
    pub transition: Duration,
}

impl Default for Config {
    fn default() -> Self {
        #[expect(
            clippy::allow_attributes,
            reason = "`#[expect]` is not fulfilled for `unsafe` blocks"
        )]
        #[allow(unsafe_code, reason = "20 is within `0..=100`")]
        let distance_threshold =
            unsafe { Percent::new_unchecked(Decimal::from(20)) };

        Self {
            distance_threshold,
            velocity_threshold: 0.5,
            transition: Duration::from_millis(300),
        }
    }
}

/// Pointer position sampled at some moment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Horizontal position, px.
    pub x: f64,

    /// Vertical position, px.
    pub y: f64,

    /// Moment of sampling, relative to an arbitrary origin.
    pub at: Duration,
}

/// Direction of a navigation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    /// To the next photo (dragging left).
    Forward,

    /// To the previous photo (dragging right).
    Backward,
}

/// Ongoing drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drag {
    /// [`Sample`] the drag started at.
    pub start: Sample,

    /// Latest [`Sample`] of the drag.
    pub last: Sample,

    /// Instantaneous horizontal velocity, px/ms.
    pub velocity: f64,
}

impl Drag {
    /// Horizontal distance travelled, px.
    #[must_use]
    pub fn dx(&self) -> f64 {
        self.last.x - self.start.x
    }

    /// Vertical distance travelled, px.
    #[must_use]
    pub fn dy(&self) -> f64 {
        self.last.y - self.start.y
    }

    fn advance(&mut self, sample: Sample) {
        if let Some(dt) = sample.at.checked_sub(self.last.at) {
            let dt = dt.as_secs_f64() * 1000.0;
            if dt > 0.0 {
                self.velocity = (sample.x - self.last.x) / dt;
            }
        }
        self.last = sample;
    }
}

/// State of a [`Carousel`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum State {
    /// Nothing happens.
    Idle,

    /// User drags the current photo.
    Dragging(Drag),

    /// Current photo slides off-screen while the adjacent one slides in.
    Snapping {
        /// [`Direction`] of the slide.
        direction: Direction,
    },

    /// Current photo animates back to the center.
    Returning,
}

/// Classification of a finished drag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Gesture {
    /// Navigation in the [`Direction`].
    Swipe(Direction),

    /// Horizontal drag too short and too slow to navigate.
    Return,

    /// Mostly vertical movement, left to the page scroll.
    Scroll,
}

/// Classifies a drag of `dx`/`dy` px ending with the horizontal `velocity`
/// (px/ms) over a viewport of `width` px.
#[must_use]
pub fn classify(
    dx: f64,
    dy: f64,
    velocity: f64,
    width: f64,
    config: &Config,
) -> Gesture {
    if dx.abs() <= dy.abs() {
        return Gesture::Scroll;
    }

    let far = dx.abs() > width * config.distance_threshold.fraction();
    let fast = velocity.abs() > config.velocity_threshold;
    if far || fast {
        Gesture::Swipe(if dx < 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        })
    } else {
        Gesture::Return
    }
}

/// Carousel over an ordered sequence of photos.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Carousel {
    /// Number of photos.
    len: usize,

    /// Index of the currently shown photo.
    index: usize,

    /// Viewport width, px.
    width: f64,

    /// Thresholds.
    config: Config,

    /// Current [`State`].
    state: State,
}

impl Carousel {
    /// Creates a new [`Carousel`] over `len` photos showing the first one.
    #[must_use]
    pub fn new(len: usize, width: f64, config: Config) -> Self {
        Self {
            len,
            index: 0,
            width,
            config,
            state: State::Idle,
        }
    }

    /// Index of the currently shown photo.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Current [`State`].
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Duration of the transition the renderer should animate.
    #[must_use]
    pub const fn transition(&self) -> Duration {
        self.config.transition
    }

    /// Updates the viewport width, e.g. on resize.
    pub fn resize(&mut self, width: f64) {
        self.width = width;
    }

    /// Horizontal offset (px) the current photo should be rendered at.
    #[must_use]
    pub fn offset(&self) -> f64 {
        match self.state {
            State::Dragging(drag) => drag.dx(),
            State::Snapping {
                direction: Direction::Forward,
            } => -self.width,
            State::Snapping {
                direction: Direction::Backward,
            } => self.width,
            State::Idle | State::Returning => 0.0,
        }
    }

    /// Starts sliding to the next photo.
    ///
    /// Returns `false` if the input is ignored.
    pub fn next(&mut self) -> bool {
        self.slide(Direction::Forward)
    }

    /// Starts sliding to the previous photo.
    ///
    /// Returns `false` if the input is ignored.
    pub fn prev(&mut self) -> bool {
        self.slide(Direction::Backward)
    }

    /// Starts a drag at the `sample`.
    ///
    /// Returns `false` if the input is ignored.
    pub fn drag_start(&mut self, sample: Sample) -> bool {
        if !self.navigable() {
            return false;
        }
        self.state = State::Dragging(Drag {
            start: sample,
            last: sample,
            velocity: 0.0,
        });
        true
    }

    /// Moves the ongoing drag to the `sample`.
    pub fn drag_move(&mut self, sample: Sample) {
        if let State::Dragging(drag) = &mut self.state {
            drag.advance(sample);
        }
    }

    /// Ends the ongoing drag at the `sample`, classifying it.
    ///
    /// Returns [`None`] if there was no drag.
    pub fn drag_end(&mut self, sample: Sample) -> Option<Gesture> {
        let State::Dragging(mut drag) = self.state else {
            return None;
        };
        drag.advance(sample);

        let gesture = classify(
            drag.dx(),
            drag.dy(),
            drag.velocity,
            self.width,
            &self.config,
        );
        self.state = match gesture {
            Gesture::Swipe(direction) => State::Snapping { direction },
            Gesture::Return => State::Returning,
            Gesture::Scroll => State::Idle,
        };
        Some(gesture)
    }

    /// Completes the running animation: swaps the shown photo after a slide
    /// and resets the offset.
    pub fn finish_transition(&mut self) {
        match self.state {
            State::Snapping {
                direction: Direction::Forward,
            } => {
                self.index = (self.index + 1) % self.len;
            }
            State::Snapping {
                direction: Direction::Backward,
            } => {
                self.index = (self.index + self.len - 1) % self.len;
            }
            State::Idle | State::Dragging(_) | State::Returning => {}
        }
        if !matches!(self.state, State::Dragging(_)) {
            self.state = State::Idle;
        }
    }

    fn navigable(&self) -> bool {
        self.len >= 2 && self.state == State::Idle
    }

    fn slide(&mut self, direction: Direction) -> bool {
        if !self.navigable() {
            return false;
        }
        self.state = State::Snapping { direction };
        true
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::{
        classify, Carousel, Config, Direction, Gesture, Sample, State,
    };

    const WIDTH: f64 = 400.0;

    fn at(x: f64, y: f64, ms: u64) -> Sample {
        Sample {
            x,
            y,
            at: Duration::from_millis(ms),
        }
    }

    fn carousel(len: usize) -> Carousel {
        Carousel::new(len, WIDTH, Config::default())
    }

    #[test]
    fn quarter_width_swipe_advances() {
        let mut c = carousel(3);

        assert!(c.drag_start(at(300.0, 100.0, 0)));
        c.drag_move(at(250.0, 102.0, 200));
        let gesture = c.drag_end(at(200.0, 104.0, 400));

        assert_eq!(gesture, Some(Gesture::Swipe(Direction::Forward)));
        assert_eq!(
            c.state(),
            &State::Snapping {
                direction: Direction::Forward,
            },
        );
        assert!((c.offset() + WIDTH).abs() < f64::EPSILON);

        c.finish_transition();
        assert_eq!(c.index(), 1);
        assert_eq!(c.state(), &State::Idle);
    }

    #[test]
    fn slow_tenth_width_drag_returns() {
        let mut c = carousel(3);

        assert!(c.drag_start(at(200.0, 100.0, 0)));
        c.drag_move(at(180.0, 100.0, 200));
        let gesture = c.drag_end(at(160.0, 100.0, 400));

        assert_eq!(gesture, Some(Gesture::Return));
        assert_eq!(c.state(), &State::Returning);

        c.finish_transition();
        assert_eq!(c.index(), 0);
        assert_eq!(c.state(), &State::Idle);
    }

    #[test]
    fn fast_flick_is_accepted() {
        let mut c = carousel(3);

        assert!(c.drag_start(at(200.0, 100.0, 0)));
        let gesture = c.drag_end(at(240.0, 100.0, 40));

        assert_eq!(gesture, Some(Gesture::Swipe(Direction::Backward)));
        c.finish_transition();
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn vertical_movement_is_scroll() {
        let mut c = carousel(3);

        assert!(c.drag_start(at(200.0, 100.0, 0)));
        let gesture = c.drag_end(at(80.0, 400.0, 100));

        assert_eq!(gesture, Some(Gesture::Scroll));
        assert_eq!(c.state(), &State::Idle);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn navigation_wraps_around() {
        let mut c = carousel(2);

        assert!(c.prev());
        c.finish_transition();
        assert_eq!(c.index(), 1);

        assert!(c.next());
        c.finish_transition();
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn single_photo_never_moves() {
        for len in [0, 1] {
            let mut c = carousel(len);

            assert!(!c.next());
            assert!(!c.prev());
            assert!(!c.drag_start(at(0.0, 0.0, 0)));
            c.finish_transition();
            assert_eq!(c.index(), 0);
        }
    }

    #[test]
    fn input_during_animation_is_ignored() {
        let mut c = carousel(3);

        assert!(c.next());
        assert!(!c.next());
        assert!(!c.prev());
        assert!(!c.drag_start(at(0.0, 0.0, 0)));
        assert_eq!(c.drag_end(at(0.0, 0.0, 10)), None);

        c.finish_transition();
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn classifies_on_boundaries() {
        let config = Config::default();

        // Exactly 20% is not enough.
        assert_eq!(classify(-80.0, 0.0, 0.1, WIDTH, &config), Gesture::Return);
        assert_eq!(
            classify(-81.0, 0.0, 0.1, WIDTH, &config),
            Gesture::Swipe(Direction::Forward),
        );
        assert_eq!(
            classify(10.0, 0.0, 0.6, WIDTH, &config),
            Gesture::Swipe(Direction::Backward),
        );
        assert_eq!(classify(10.0, 10.0, 5.0, WIDTH, &config), Gesture::Scroll);
    }
}
