//! Integration tests for the looping carousel player
//!
//! These tests verify that:
//! - The offset wraps by one item when it leaves the central window
//! - Autoplay advances one page per interval and pauses for interaction
//! - Paged looping always comes to rest on a page boundary
//! - Playback without looping clamps at the ends

use kinetic_animation::motion::adjusted_content_offset;
use kinetic_animation::{run_until, SchedulerHandle, TimerScheduler};
use kinetic_core::{Axis, Point, Size};
use kinetic_pad::{DragMove, DragStart, LoopState, PadConfig, Player, PlayerConfig};

const VIEWPORT: Size = Size::new(750.0, 400.0);
const ITEM: Size = Size::new(4500.0, 400.0);

fn looping_player(config: PlayerConfig) -> (Player, SchedulerHandle) {
    let scheduler = TimerScheduler::shared();
    let mut player = Player::new(config, scheduler.clone());
    player.set_size(VIEWPORT);
    player.set_item_size(ITEM);
    (player, scheduler)
}

fn settle(player: &mut Player, scheduler: &SchedulerHandle, until: f64) {
    run_until(scheduler, until, |id| {
        player.handle_timer(id);
    });
}

fn offset_x(player: &Player) -> f32 {
    player.pad().content_offset().x
}

#[test]
fn test_loop_layout() {
    let (player, _scheduler) = looping_player(PlayerConfig::default());

    assert_eq!(player.loop_state().loop_count, 2);
    assert_eq!(player.pad().content_size(), Size::new(9000.0, 400.0));
    assert_eq!(player.page_count(), 6);

    // The origin lies outside the wrap window and is moved into it
    assert_eq!(offset_x(&player), -4500.0);
    assert_eq!(player.active_index(), 0);
}

/// Dragging past the window shifts the offset forward by one item
#[test]
fn test_loop_wrap_while_dragging() {
    let (mut player, _scheduler) = looping_player(PlayerConfig {
        autoplay_enabled: false,
        ..Default::default()
    });
    let before = player.loop_state().loop_offset;

    player.on_drag_start(DragStart {
        velocity: Point::new(-1.0, 0.0),
    });
    player.on_drag_move(DragMove {
        translation: Point::new(-1000.0, 0.0),
        interval: 16.0,
    });
    assert_eq!(offset_x(&player), -5500.0);
    assert_eq!(player.loop_state().loop_offset, before);

    // -6400 is below the window [-6375, -1875]
    player.on_drag_move(DragMove {
        translation: Point::new(-1900.0, 0.0),
        interval: 16.0,
    });
    assert!(player.pad().is_dragging());
    assert_eq!(offset_x(&player), -1900.0);
    assert_eq!(player.loop_state().loop_offset, before + 1);
    assert_eq!(player.item_key(0), before + 1);

    // The drag continues seamlessly from the shifted position
    player.on_drag_move(DragMove {
        translation: Point::new(-1950.0, 0.0),
        interval: 16.0,
    });
    assert_eq!(offset_x(&player), -1950.0);
}

#[test]
fn test_loop_settles_inside_window() {
    let (mut player, scheduler) = looping_player(PlayerConfig {
        autoplay_enabled: false,
        ..Default::default()
    });

    for _ in 0..4 {
        player.on_drag_start(DragStart {
            velocity: Point::new(1.0, 0.0),
        });
        player.on_drag_move(DragMove {
            translation: Point::new(700.0, 0.0),
            interval: 16.0,
        });
        player.on_drag_end();
        let until = scheduler.borrow().now() + 2000.0;
        settle(&mut player, &scheduler, until);

        let x = offset_x(&player);
        assert!(player.pad().is_idle());
        assert!((-6375.0..=-1875.0).contains(&x), "offset {} outside window", x);
        assert_eq!(x % 750.0, 0.0);
    }
}

/// An item spanning whole pages wraps on every advance and rests in the window
#[test]
fn test_paged_loop_with_page_sized_item() {
    let scheduler = TimerScheduler::shared();
    let mut player = Player::new(
        PlayerConfig {
            autoplay_enabled: false,
            ..Default::default()
        },
        scheduler.clone(),
    );
    player.set_size(VIEWPORT);
    player.set_item_size(Size::new(750.0, 400.0));
    assert_eq!(player.loop_state().loop_count, 3);

    // Window is [-1125, -375]
    assert_eq!(offset_x(&player), -750.0);
    let start = player.loop_state().loop_offset;

    for step in 1..=4 {
        player.forward();
        let until = scheduler.borrow().now() + 2000.0;
        settle(&mut player, &scheduler, until);

        assert!(player.pad().is_idle());
        assert_eq!(offset_x(&player), -750.0);
        assert_eq!(player.loop_state().loop_offset, start + step);
    }
    assert!(!scheduler.borrow().has_pending());
}

/// Items narrower than a page cannot wrap without leaving a page boundary,
/// so the pad settles as a bounded pager instead of wrapping forever
#[test]
fn test_paged_loop_with_narrow_item_settles() {
    for item in [125.0, 500.0] {
        let scheduler = TimerScheduler::shared();
        let mut player = Player::new(
            PlayerConfig {
                autoplay_enabled: false,
                ..Default::default()
            },
            scheduler.clone(),
        );
        player.set_size(VIEWPORT);
        player.set_item_size(Size::new(item, 400.0));
        assert!(player.loop_state().loop_count >= 3);

        let is_rest = |player: &Player| {
            let pad = player.pad();
            let offset = pad.content_offset();
            adjusted_content_offset(offset, pad.size(), pad.content_size(), true) == offset
        };

        settle(&mut player, &scheduler, 60_000.0);
        assert!(player.pad().is_idle(), "item {} never settled", item);
        assert!(!scheduler.borrow().has_pending());
        assert!(is_rest(&player));

        for dx in [-200.0f32, 180.0, -600.0] {
            player.on_drag_start(DragStart {
                velocity: Point::new(dx.signum(), 0.0),
            });
            player.on_drag_move(DragMove {
                translation: Point::new(dx, 0.0),
                interval: 16.0,
            });
            player.on_drag_end();
            let until = scheduler.borrow().now() + 5000.0;
            settle(&mut player, &scheduler, until);

            assert!(player.pad().is_idle(), "item {} still moving after drag", item);
            assert!(!scheduler.borrow().has_pending());
            assert!(is_rest(&player));
        }

        player.forward();
        let until = scheduler.borrow().now() + 5000.0;
        settle(&mut player, &scheduler, until);
        assert!(player.pad().is_idle());
        assert!(is_rest(&player));
    }
}

#[test]
fn test_autoplay_advances_after_interval() {
    let (mut player, scheduler) = looping_player(PlayerConfig::default());
    let start = offset_x(&player);

    settle(&mut player, &scheduler, 4999.0);
    assert_eq!(offset_x(&player), start);
    assert!(player.pad().is_idle());

    settle(&mut player, &scheduler, 5000.0);
    assert!(player.pad().is_decelerating());
    assert!(player.autoplay_timer().is_none());

    settle(&mut player, &scheduler, 6000.0);
    assert!(player.pad().is_idle());
    assert_eq!(offset_x(&player), start - 750.0);
    assert_eq!(player.active_index(), 1);

    // Re-armed once the advance finished
    let timer = player.autoplay_timer().expect("autoplay re-armed");
    let due = scheduler.borrow().due(timer).expect("pending");
    assert!(due > 10_000.0 && due < 10_500.0);
}

#[test]
fn test_autoplay_rearms_after_drag_end() {
    let (mut player, scheduler) = looping_player(PlayerConfig::default());
    let start = offset_x(&player);

    settle(&mut player, &scheduler, 4000.0);
    player.on_drag_start(DragStart::default());
    assert!(player.autoplay_timer().is_none());
    player.on_drag_end();

    let timer = player.autoplay_timer().expect("autoplay re-armed");
    assert_eq!(scheduler.borrow().due(timer), Some(9000.0));

    settle(&mut player, &scheduler, 8999.0);
    assert_eq!(offset_x(&player), start);

    settle(&mut player, &scheduler, 9000.0);
    assert!(player.pad().is_decelerating());
}

#[test]
fn test_hover_pauses_autoplay() {
    let (mut player, scheduler) = looping_player(PlayerConfig::default());
    let start = offset_x(&player);

    player.on_mouse_enter();
    assert!(player.autoplay_timer().is_none());
    settle(&mut player, &scheduler, 20_000.0);
    assert_eq!(offset_x(&player), start);

    player.on_mouse_leave();
    let timer = player.autoplay_timer().expect("autoplay resumed");
    assert_eq!(scheduler.borrow().due(timer), Some(25_000.0));
}

#[test]
fn test_invalid_interval_disables_autoplay() {
    let scheduler = TimerScheduler::shared();
    let player = Player::new(
        PlayerConfig {
            autoplay_interval: -100.0,
            ..Default::default()
        },
        scheduler.clone(),
    );

    assert!(!player.config().autoplay_enabled);
    assert!(player.autoplay_timer().is_none());
    assert!(!scheduler.borrow().has_pending());
}

#[test]
fn test_playback_clamps_without_loop() {
    let scheduler = TimerScheduler::shared();
    let mut player = Player::new(
        PlayerConfig {
            loop_enabled: false,
            autoplay_enabled: false,
            ..Default::default()
        },
        scheduler.clone(),
    );
    player.set_size(VIEWPORT);
    player.set_content_size(Size::new(2250.0, 400.0));
    assert_eq!(player.loop_state(), LoopState::default());
    assert_eq!(player.page_count(), 3);

    let mut stops = Vec::new();
    for _ in 0..4 {
        player.forward();
        let until = scheduler.borrow().now() + 1000.0;
        settle(&mut player, &scheduler, until);
        stops.push(offset_x(&player));
    }
    assert_eq!(stops, vec![-750.0, -1500.0, -1500.0, -1500.0]);

    player.rewind();
    let until = scheduler.borrow().now() + 1000.0;
    settle(&mut player, &scheduler, until);
    assert_eq!(offset_x(&player), -750.0);
}

#[test]
fn test_go_ignored_while_moving() {
    let (mut player, scheduler) = looping_player(PlayerConfig {
        autoplay_enabled: false,
        ..Default::default()
    });
    let start = offset_x(&player);

    player.forward();
    assert!(player.pad().is_decelerating());
    player.forward();

    settle(&mut player, &scheduler, 2000.0);
    assert_eq!(offset_x(&player), start - 750.0);
}

#[test]
fn test_slide_to() {
    let (mut player, scheduler) = looping_player(PlayerConfig {
        autoplay_enabled: false,
        ..Default::default()
    });

    player.slide_to(2, true);
    settle(&mut player, &scheduler, 2000.0);
    assert_eq!(player.active_index(), 2);

    player.slide_to(5, false);
    assert_eq!(player.active_index(), 5);
    assert!(player.pad().is_idle());
}

#[test]
fn test_disabling_loop_resets_state() {
    let (mut player, _scheduler) = looping_player(PlayerConfig {
        autoplay_enabled: false,
        ..Default::default()
    });
    assert_eq!(player.loop_state().loop_count, 2);

    player.set_config(PlayerConfig {
        loop_enabled: false,
        autoplay_enabled: false,
        ..Default::default()
    });
    assert_eq!(player.loop_state(), LoopState::default());
    assert_eq!(player.pad().content_size(), ITEM);
}

#[test]
fn test_enabling_autoplay_arms_timer() {
    let (mut player, scheduler) = looping_player(PlayerConfig {
        autoplay_enabled: false,
        ..Default::default()
    });
    assert!(player.autoplay_timer().is_none());

    player.set_config(PlayerConfig {
        autoplay_interval: 2000.0,
        ..Default::default()
    });
    let timer = player.autoplay_timer().expect("autoplay armed");
    assert_eq!(scheduler.borrow().due(timer), Some(2000.0));
}

#[test]
fn test_vertical_player_ignores_cross_axis() {
    let scheduler = TimerScheduler::shared();
    let mut player = Player::new(
        PlayerConfig {
            autoplay_enabled: false,
            ..PlayerConfig::vertical()
        },
        scheduler,
    );
    player.set_size(Size::new(400.0, 750.0));
    player.set_item_size(Size::new(400.0, 4500.0));
    assert_eq!(player.pad().content_size(), Size::new(400.0, 9000.0));
    let start = player.pad().content_offset();
    assert_eq!(start, Point::new(0.0, -4500.0));

    player.on_drag_start(DragStart {
        velocity: Point::new(-2.0, 0.0),
    });
    player.on_drag_move(DragMove {
        translation: Point::new(-300.0, 0.0),
        interval: 16.0,
    });
    assert_eq!(player.pad().content_offset(), start);
}

#[test]
fn test_dispose_cancels_timers() {
    let (mut player, scheduler) = looping_player(PlayerConfig::default());
    player.forward();
    assert!(scheduler.borrow().has_pending());

    player.dispose();
    assert!(!scheduler.borrow().has_pending());
}

#[test]
fn test_dispose_from_timer_callback() {
    let (mut player, scheduler) = looping_player(PlayerConfig::default());
    player.forward();

    let mut fired = 0;
    run_until(&scheduler, 200.0, |id| {
        player.handle_timer(id);
        fired += 1;
        if fired == 2 {
            player.dispose();
        }
    });
    assert_eq!(fired, 2);
    assert!(!scheduler.borrow().has_pending());
    assert!(player.autoplay_timer().is_none());
}

#[test]
fn test_config_from_json() {
    let config: PlayerConfig = serde_json::from_str(
        r#"{
            "direction": "y",
            "autoplay_enabled": false,
            "pad": { "paging_enabled": true, "always_bounce_y": false }
        }"#,
    )
    .expect("valid json");

    assert_eq!(config.direction, Axis::Y);
    assert!(!config.autoplay_enabled);
    assert!(config.loop_enabled);
    assert_eq!(
        config.pad,
        PadConfig {
            paging_enabled: true,
            always_bounce_y: false,
            ..PadConfig::default()
        }
    );
}
