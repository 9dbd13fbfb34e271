use std::time::{Duration, Instant};

use chart_plan::api::{RESIZE_DEBOUNCE, ResizeController, ResizeState};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn burst_of_notifications_fires_once_after_last_plus_debounce() {
    let t0 = Instant::now();
    let mut controller = ResizeController::default();
    assert_eq!(controller.debounce(), RESIZE_DEBOUNCE);

    controller.notify(t0);
    controller.notify(t0 + ms(50));
    controller.notify(t0 + ms(100));

    let mut fired_at = Vec::new();
    for step in 0..=400 {
        let now = t0 + ms(step);
        if controller.take_due(now) {
            fired_at.push(step);
        }
    }

    assert_eq!(fired_at, vec![300]);
    assert_eq!(controller.notifications(), 3);
    assert_eq!(controller.fired(), 1);
    assert_eq!(controller.state(), ResizeState::Idle);
}

#[test]
fn notification_restarts_the_timer() {
    let t0 = Instant::now();
    let mut controller = ResizeController::default();

    controller.notify(t0);
    assert_eq!(controller.deadline(), Some(t0 + ms(200)));

    controller.notify(t0 + ms(150));
    assert_eq!(
        controller.state(),
        ResizeState::PendingRender {
            deadline: t0 + ms(350)
        }
    );
    assert!(!controller.take_due(t0 + ms(200)));
    assert_eq!(controller.time_until_due(t0 + ms(300)), Some(ms(50)));
}

#[test]
fn idle_controller_never_fires() {
    let t0 = Instant::now();
    let mut controller = ResizeController::new(ms(10));

    assert!(!controller.is_pending());
    assert_eq!(controller.deadline(), None);
    assert_eq!(controller.time_until_due(t0), None);
    assert!(!controller.take_due(t0 + ms(1_000)));
}

#[test]
fn separate_bursts_fire_separately() {
    let t0 = Instant::now();
    let mut controller = ResizeController::default();

    controller.notify(t0);
    assert!(controller.take_due(t0 + ms(200)));
    controller.notify(t0 + ms(1_000));
    assert!(!controller.take_due(t0 + ms(1_100)));
    assert!(controller.take_due(t0 + ms(1_250)));
    assert_eq!(controller.fired(), 2);
}

#[test]
fn cancel_drops_a_pending_render() {
    let t0 = Instant::now();
    let mut controller = ResizeController::default();

    controller.notify(t0);
    controller.cancel();
    assert!(!controller.take_due(t0 + ms(500)));
    assert_eq!(controller.fired(), 0);
}

#[test]
fn overdue_poll_reports_zero_wait() {
    let t0 = Instant::now();
    let mut controller = ResizeController::default();
    controller.notify(t0);
    assert_eq!(controller.time_until_due(t0 + ms(900)), Some(Duration::ZERO));
}
