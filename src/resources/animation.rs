//! Time-driven property tweens.
//!
//! A tween is scheduled with [`Tweener::animate`] and runs on the host frame
//! loop through [`TweenScheduler::advance`]. The scheduler only holds a weak
//! reference to the animated transform, and it checks that the target is
//! still alive and not cancelled before every write. Dropping the owner of
//! the transform therefore halts the tween.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use instant::{Duration, Instant};
use serde::Deserialize;

use crate::data_structures::instance::Instance;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    QuadOut,
    #[default]
    BounceOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` onto the eased curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::BounceOut => {
                const N1: f32 = 7.5625;
                const D1: f32 = 2.75;
                if t < 1.0 / D1 {
                    N1 * t * t
                } else if t < 2.0 / D1 {
                    let t = t - 1.5 / D1;
                    N1 * t * t + 0.75
                } else if t < 2.5 / D1 {
                    let t = t - 2.25 / D1;
                    N1 * t * t + 0.9375
                } else {
                    let t = t - 2.625 / D1;
                    N1 * t * t + 0.984375
                }
            }
        }
    }
}

/// The scalar component of an [`Instance`] a tween writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenProperty {
    PositionX,
    PositionY,
    PositionZ,
}

impl TweenProperty {
    fn get(self, instance: &Instance) -> f32 {
        match self {
            TweenProperty::PositionX => instance.position.x,
            TweenProperty::PositionY => instance.position.y,
            TweenProperty::PositionZ => instance.position.z,
        }
    }

    fn set(self, instance: &mut Instance, value: f32) {
        match self {
            TweenProperty::PositionX => instance.position.x = value,
            TweenProperty::PositionY => instance.position.y = value,
            TweenProperty::PositionZ => instance.position.z = value,
        }
    }
}

/// Duration and delay are in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenOptions {
    pub duration: f32,
    pub easing: Easing,
    pub delay: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenStatus {
    /// Waiting for its delay to elapse.
    Scheduled,
    Running,
    Finished,
    Cancelled,
}

#[derive(Debug)]
struct TweenShared {
    property: TweenProperty,
    to: f32,
    options: TweenOptions,
    status: Cell<TweenStatus>,
}

/// Caller-side view of a scheduled tween.
#[derive(Clone, Debug)]
pub struct TweenHandle {
    shared: Rc<TweenShared>,
}

impl TweenHandle {
    pub fn property(&self) -> TweenProperty {
        self.shared.property
    }

    pub fn target_value(&self) -> f32 {
        self.shared.to
    }

    pub fn options(&self) -> TweenOptions {
        self.shared.options
    }

    pub fn status(&self) -> TweenStatus {
        self.shared.status.get()
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.status(),
            TweenStatus::Scheduled | TweenStatus::Running
        )
    }

    /// Stops the tween before its next write. Finished tweens stay finished.
    pub fn cancel(&self) {
        if self.is_active() {
            self.shared.status.set(TweenStatus::Cancelled);
        }
    }
}

/// Schedules fire-and-forget tweens on a transform.
pub trait Tweener {
    fn animate(
        &mut self,
        target: Weak<RefCell<Instance>>,
        property: TweenProperty,
        to: f32,
        options: TweenOptions,
    ) -> TweenHandle;
}

struct Tween {
    target: Weak<RefCell<Instance>>,
    handle: TweenHandle,
    elapsed: f32,
    // captured when the delay has elapsed, not at scheduling time
    from: Option<f32>,
}

impl Tween {
    /// Returns `false` once the tween is done and can be dropped.
    fn step(&mut self, dt: f32) -> bool {
        if !self.handle.is_active() {
            return false;
        }
        let Some(target) = self.target.upgrade() else {
            log::trace!("tween target was dropped, cancelling");
            self.handle.shared.status.set(TweenStatus::Cancelled);
            return false;
        };
        let TweenOptions {
            duration,
            easing,
            delay,
        } = self.handle.options();
        self.elapsed += dt;
        if self.elapsed < delay {
            return true;
        }
        let property = self.handle.property();
        let mut instance = target.borrow_mut();
        let from = *self.from.get_or_insert_with(|| property.get(&instance));
        let progress = if duration <= 0.0 {
            1.0
        } else {
            ((self.elapsed - delay) / duration).min(1.0)
        };
        let to = self.handle.target_value();
        let value = if progress >= 1.0 {
            to
        } else {
            from + (to - from) * easing.apply(progress)
        };
        property.set(&mut instance, value);
        if progress >= 1.0 {
            self.handle.shared.status.set(TweenStatus::Finished);
            false
        } else {
            self.handle.shared.status.set(TweenStatus::Running);
            true
        }
    }
}

/// Frame-driven [`Tweener`]. Call [`advance`](Self::advance) (or [`tick`](Self::tick)) once per frame.
#[derive(Default)]
pub struct TweenScheduler {
    tweens: Vec<Tween>,
    last_frame: Option<Instant>,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tweens that are still scheduled or running.
    pub fn active_count(&self) -> usize {
        self.tweens.iter().filter(|t| t.handle.is_active()).count()
    }

    pub fn is_idle(&self) -> bool {
        self.active_count() == 0
    }

    pub fn advance(&mut self, dt: Duration) {
        let dt = dt.as_secs_f32();
        self.tweens.retain_mut(|tween| tween.step(dt));
    }

    /// Advances by the wall-clock time since the previous `tick`. The first call only starts the clock.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map(|last| now.duration_since(last))
            .unwrap_or(Duration::from_millis(0));
        self.last_frame = Some(now);
        self.advance(dt);
    }
}

impl Tweener for TweenScheduler {
    fn animate(
        &mut self,
        target: Weak<RefCell<Instance>>,
        property: TweenProperty,
        to: f32,
        options: TweenOptions,
    ) -> TweenHandle {
        let handle = TweenHandle {
            shared: Rc::new(TweenShared {
                property,
                to,
                options,
                status: Cell::new(TweenStatus::Scheduled),
            }),
        };
        log::trace!(
            "scheduled {:?} tween to {} after {}s",
            property,
            to,
            options.delay
        );
        self.tweens.push(Tween {
            target,
            handle: handle.clone(),
            elapsed: 0.0,
            from: None,
        });
        handle
    }
}
