use std::{cell::RefCell, rc::Rc, time::Duration};

use approx::assert_abs_diff_eq;
use scene_markers::{
    Vector3,
    data_structures::instance::Instance,
    resources::animation::{
        Easing, TweenOptions, TweenProperty, TweenScheduler, TweenStatus, Tweener,
    },
};

use crate::common::test_utils::EPS;

mod common;

fn target_at(y: f32) -> Rc<RefCell<Instance>> {
    Rc::new(RefCell::new(Instance::from(Vector3::new(0.0, y, 0.0))))
}

fn options(duration: f32, easing: Easing, delay: f32) -> TweenOptions {
    TweenOptions {
        duration,
        easing,
        delay,
    }
}

#[test]
fn bounce_out_should_start_at_zero_and_land_on_one() {
    assert_abs_diff_eq!(Easing::BounceOut.apply(0.0), 0.0, epsilon = EPS);
    assert_abs_diff_eq!(Easing::BounceOut.apply(1.0), 1.0, epsilon = EPS);

    for step in 0..=100 {
        let value = Easing::BounceOut.apply(step as f32 / 100.0);
        assert!(
            (0.0..=1.0 + EPS).contains(&value),
            "bounce left [0, 1] at step {}: {}",
            step,
            value
        );
    }
    // first touchdown
    assert_abs_diff_eq!(Easing::BounceOut.apply(1.0 / 2.75), 1.0, epsilon = EPS);
}

#[test]
fn simple_easings_should_follow_their_curves() {
    assert_eq!(Easing::Linear.apply(0.25), 0.25);
    assert_abs_diff_eq!(Easing::QuadOut.apply(0.5), 0.75, epsilon = EPS);
    // progress is clamped
    assert_eq!(Easing::Linear.apply(1.5), 1.0);
    assert_eq!(Easing::QuadOut.apply(-1.0), 0.0);
}

#[test]
fn should_wait_for_delay_before_writing() {
    let target = target_at(3.0);
    let mut scheduler = TweenScheduler::new();
    let handle = scheduler.animate(
        Rc::downgrade(&target),
        TweenProperty::PositionY,
        1.0,
        options(2.0, Easing::Linear, 1.0),
    );

    scheduler.advance(Duration::from_millis(900));
    assert_eq!(handle.status(), TweenStatus::Scheduled);
    assert_eq!(target.borrow().position.y, 3.0);

    scheduler.advance(Duration::from_millis(1100));
    assert_eq!(handle.status(), TweenStatus::Running);
    assert_abs_diff_eq!(target.borrow().position.y, 2.0, epsilon = 1e-4);

    scheduler.advance(Duration::from_secs(5));
    assert_eq!(handle.status(), TweenStatus::Finished);
    assert_eq!(target.borrow().position.y, 1.0);
}

#[test]
fn should_start_from_value_at_end_of_delay() {
    let target = target_at(0.0);
    let mut scheduler = TweenScheduler::new();
    scheduler.animate(
        Rc::downgrade(&target),
        TweenProperty::PositionX,
        10.0,
        options(1.0, Easing::Linear, 0.5),
    );

    // moved by someone else while the tween waits
    target.borrow_mut().position.x = 4.0;
    scheduler.advance(Duration::from_millis(1000));

    assert_abs_diff_eq!(target.borrow().position.x, 7.0, epsilon = 1e-4);
}

#[test]
fn should_finish_zero_duration_tweens_at_once() {
    let target = target_at(0.0);
    let mut scheduler = TweenScheduler::new();
    let handle = scheduler.animate(
        Rc::downgrade(&target),
        TweenProperty::PositionZ,
        -2.5,
        options(0.0, Easing::BounceOut, 0.0),
    );

    scheduler.advance(Duration::from_millis(0));

    assert_eq!(handle.status(), TweenStatus::Finished);
    assert_eq!(target.borrow().position.z, -2.5);
    assert!(scheduler.is_idle());
}

#[test]
fn should_cancel_when_target_is_dropped() {
    let target = target_at(2.0);
    let mut scheduler = TweenScheduler::new();
    let handle = scheduler.animate(
        Rc::downgrade(&target),
        TweenProperty::PositionY,
        0.0,
        options(1.0, Easing::BounceOut, 0.0),
    );
    scheduler.advance(Duration::from_millis(300));
    assert_eq!(handle.status(), TweenStatus::Running);

    drop(target);
    scheduler.advance(Duration::from_millis(300));

    assert_eq!(handle.status(), TweenStatus::Cancelled);
    assert_eq!(scheduler.active_count(), 0);
}

#[test]
fn cancelling_a_finished_tween_should_keep_it_finished() {
    let target = target_at(1.0);
    let mut scheduler = TweenScheduler::new();
    let handle = scheduler.animate(
        Rc::downgrade(&target),
        TweenProperty::PositionY,
        0.0,
        options(0.5, Easing::Linear, 0.0),
    );
    scheduler.advance(Duration::from_secs(1));

    handle.cancel();

    assert_eq!(handle.status(), TweenStatus::Finished);
    assert!(!handle.is_active());
}

#[test]
fn should_run_tweens_independently() {
    let first = target_at(1.0);
    let second = target_at(1.0);
    let mut scheduler = TweenScheduler::new();
    let a = scheduler.animate(
        Rc::downgrade(&first),
        TweenProperty::PositionY,
        0.0,
        options(1.0, Easing::Linear, 0.0),
    );
    let b = scheduler.animate(
        Rc::downgrade(&second),
        TweenProperty::PositionY,
        0.0,
        options(1.0, Easing::Linear, 0.0),
    );
    assert_eq!(scheduler.active_count(), 2);

    a.cancel();
    scheduler.advance(Duration::from_millis(500));

    assert_eq!(first.borrow().position.y, 1.0);
    assert_abs_diff_eq!(second.borrow().position.y, 0.5, epsilon = 1e-4);
    assert_eq!(b.status(), TweenStatus::Running);
    assert_eq!(scheduler.active_count(), 1);
}

#[test]
fn first_tick_should_only_start_the_clock() {
    let target = target_at(5.0);
    let mut scheduler = TweenScheduler::new();
    let handle = scheduler.animate(
        Rc::downgrade(&target),
        TweenProperty::PositionY,
        0.0,
        options(60.0, Easing::BounceOut, 0.0),
    );

    scheduler.tick();

    assert_eq!(handle.status(), TweenStatus::Running);
    assert_eq!(target.borrow().position.y, 5.0);
}
