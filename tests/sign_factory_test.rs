use std::time::Duration;

use approx::assert_abs_diff_eq;
use scene_markers::{
    Vector3,
    annotations::{placement::SignPlacement, sign::SignFactory},
    config::AnnotationConfig,
    interactive::{
        InteractiveContext, SIGN_CONTAINER_CLASS, SIGN_DECORATION_CLASS, SIGN_TEXT_CLASS,
    },
    resources::animation::{Easing, TweenProperty, TweenScheduler, TweenStatus},
};

use crate::common::test_utils::{
    EPS, MockCompositor, assert_vec_close, interactive, with_compositor,
};

mod common;

fn about_sign() -> SignPlacement {
    SignPlacement::new([0.0, 0.2, -0.091], "How Sidequest works", "/about")
}

#[test]
fn should_not_build_signs_without_interactive_context() {
    let config = AnnotationConfig::default();
    let headless = InteractiveContext::Headless;
    let mut tweens = TweenScheduler::new();

    let sign = SignFactory::new(&headless, &config).build(&about_sign(), 0, &mut tweens);

    assert!(sign.is_none());
    assert!(tweens.is_idle());
}

#[test]
fn should_start_above_target_and_schedule_drop() {
    let env = interactive();
    let config = AnnotationConfig::default();
    let mut tweens = TweenScheduler::new();

    let sign = SignFactory::new(&env.context, &config)
        .build(&about_sign(), 0, &mut tweens)
        .expect("sign is built");

    assert_vec_close(sign.position(), Vector3::new(0.0, 2.2, -0.091));
    assert_vec_close(sign.transform().scale, Vector3::new(0.01, 0.01, 0.01));

    let entrance = sign.entrance();
    assert_eq!(entrance.property(), TweenProperty::PositionY);
    assert_abs_diff_eq!(entrance.target_value(), 0.2, epsilon = EPS);
    assert_eq!(entrance.options().duration, 1.0);
    assert_eq!(entrance.options().delay, 0.5);
    assert_eq!(entrance.options().easing, Easing::BounceOut);
    assert_eq!(entrance.status(), TweenStatus::Scheduled);
    assert_eq!(tweens.active_count(), 1);
    assert!(!sign.is_settled());
}

#[test]
fn should_stagger_entrance_by_sequence_index() {
    let env = interactive();
    let config = AnnotationConfig::default();
    let mut tweens = TweenScheduler::new();
    let factory = SignFactory::new(&env.context, &config);

    let signs: Vec<_> = (0..4)
        .map(|i| factory.build(&about_sign(), i, &mut tweens).unwrap())
        .collect();

    for (i, sign) in signs.iter().enumerate() {
        assert_eq!(sign.entrance().options().delay, 0.5f32 + 0.1f32 * i as f32);
        assert_eq!(sign.placement().sequence_index, i);
    }
    assert!(
        signs
            .windows(2)
            .all(|w| w[0].entrance().options().delay < w[1].entrance().options().delay)
    );
}

#[test]
fn should_describe_panel_with_fixed_classes() {
    let env = interactive();
    let config = AnnotationConfig::default();
    let mut tweens = TweenScheduler::new();
    let _sign = SignFactory::new(&env.context, &config)
        .build(&about_sign(), 0, &mut tweens)
        .unwrap();

    let panels = env.compositor.panels();
    assert_eq!(panels.len(), 1);
    assert_eq!(panels[0].text, "How Sidequest works");
    assert_eq!(panels[0].container_class, SIGN_CONTAINER_CLASS);
    assert_eq!(panels[0].text_class, "map-sign standard-text");
    assert_eq!(panels[0].text_class, SIGN_TEXT_CLASS);
    assert_eq!(panels[0].decoration_class, SIGN_DECORATION_CLASS);
    // the initial transform is pushed right away
    assert_eq!(env.compositor.fragment_updates(), 1);
}

#[test]
fn should_navigate_on_click() {
    let env = interactive();
    let config = AnnotationConfig::default();
    let mut tweens = TweenScheduler::new();
    let _sign = SignFactory::new(&env.context, &config)
        .build(&about_sign(), 0, &mut tweens)
        .unwrap();

    assert!(env.navigator.visited().is_empty());
    env.compositor.panels()[0].click();
    assert_eq!(env.navigator.visited(), vec!["/about".to_string()]);
}

#[test]
fn should_skip_sign_when_compositor_refuses() {
    let env = with_compositor(MockCompositor::refusing());
    let config = AnnotationConfig::default();
    let mut tweens = TweenScheduler::new();

    let sign = SignFactory::new(&env.context, &config).build(&about_sign(), 0, &mut tweens);

    assert!(sign.is_none());
    assert!(tweens.is_idle());
}

#[test]
fn should_bounce_into_place_after_delay() {
    let env = interactive();
    let config = AnnotationConfig::default();
    let mut tweens = TweenScheduler::new();
    let sign = SignFactory::new(&env.context, &config)
        .build(&about_sign(), 0, &mut tweens)
        .unwrap();

    tweens.advance(Duration::from_millis(400));
    assert_eq!(sign.entrance().status(), TweenStatus::Scheduled);
    assert_abs_diff_eq!(sign.position().y, 2.2, epsilon = EPS);

    tweens.advance(Duration::from_millis(200));
    assert_eq!(sign.entrance().status(), TweenStatus::Running);
    let y = sign.position().y;
    assert!(y < 2.2 && y >= 0.2, "mid-flight y was {}", y);

    tweens.advance(Duration::from_secs(1));
    assert_eq!(sign.entrance().status(), TweenStatus::Finished);
    assert_eq!(sign.position().y, about_sign().position.y);
    assert!(sign.is_settled());
    assert!(tweens.is_idle());

    // only y moves
    assert_abs_diff_eq!(sign.position().x, 0.0, epsilon = EPS);
    assert_abs_diff_eq!(sign.position().z, -0.091, epsilon = EPS);
}

#[test]
fn should_halt_cancelled_entrance() {
    let env = interactive();
    let config = AnnotationConfig::default();
    let mut tweens = TweenScheduler::new();
    let sign = SignFactory::new(&env.context, &config)
        .build(&about_sign(), 0, &mut tweens)
        .unwrap();

    tweens.advance(Duration::from_millis(700));
    sign.entrance().cancel();
    let frozen = sign.position().y;

    tweens.advance(Duration::from_secs(2));
    assert_eq!(sign.entrance().status(), TweenStatus::Cancelled);
    assert_eq!(sign.position().y, frozen);
    assert!(tweens.is_idle());
}

#[test]
fn should_cancel_entrance_when_sign_is_dropped() {
    let env = interactive();
    let config = AnnotationConfig::default();
    let mut tweens = TweenScheduler::new();
    let sign = SignFactory::new(&env.context, &config)
        .build(&about_sign(), 0, &mut tweens)
        .unwrap();
    let entrance = sign.entrance().clone();

    drop(sign);
    assert_eq!(entrance.status(), TweenStatus::Cancelled);

    tweens.advance(Duration::from_secs(2));
    assert_eq!(entrance.status(), TweenStatus::Cancelled);
    assert!(tweens.is_idle());
}

#[test]
fn should_honour_configured_entrance() {
    let env = interactive();
    let config = AnnotationConfig {
        sign_drop_height: 1.0,
        entrance_base_delay: 0.0,
        entrance_stagger: 0.25,
        entrance_easing: Easing::Linear,
        ..Default::default()
    };
    let mut tweens = TweenScheduler::new();
    let sign = SignFactory::new(&env.context, &config)
        .build(&about_sign(), 2, &mut tweens)
        .unwrap();

    assert_abs_diff_eq!(sign.position().y, 1.2, epsilon = EPS);
    assert_eq!(sign.entrance().options().delay, 0.5);

    tweens.advance(Duration::from_millis(1000));
    assert_abs_diff_eq!(sign.position().y, 0.7, epsilon = 1e-4);
}
