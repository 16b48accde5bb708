//! Carousel Simulation
//!
//! Runs a looping, autoplaying carousel on a simulated clock and prints the
//! offset and active page as it advances, wraps and reacts to a flick.
//!
//! Run with: cargo run -p kinetic_pad --example carousel_sim
//! Set RUST_LOG=kinetic_pad=debug to see state transitions.

use kinetic_animation::{run_until, TimerScheduler};
use kinetic_core::{EventKind, Point, Result, Size};
use kinetic_pad::{DragMove, DragStart, Player, PlayerConfig};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
autoplay_interval = 1500.0

[pad]
paging_enabled = true
directional_lock_enabled = true
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PlayerConfig::from_toml_str(CONFIG)?;
    config.validate()?;

    let scheduler = TimerScheduler::shared();
    let mut player = Player::new(config, scheduler.clone());
    player.on(EventKind::DecelerationEnd, |event| {
        if let Some(snapshot) = event.snapshot() {
            tracing::info!("settled at x={:.0}", snapshot.content_offset.x);
        }
    });

    player.set_size(Size::new(750.0, 400.0));
    player.set_item_size(Size::new(4500.0, 400.0));
    tracing::info!(
        "{} replicas, {} pages per replica",
        player.loop_state().loop_count,
        player.page_count()
    );

    // Let autoplay run through a full replica and wrap
    for step in 1..=8 {
        let until = step as f64 * 1500.0 + 400.0;
        run_until(&scheduler, until, |id| {
            player.handle_timer(id);
        });
        tracing::info!(
            "t={:>6.0}ms page={} loop_offset={}",
            until,
            player.active_index(),
            player.loop_state().loop_offset
        );
    }

    // A quick flick back toward the start
    player.on_drag_start(DragStart {
        velocity: Point::new(2.0, 0.0),
    });
    for i in 1..=5 {
        player.on_drag_move(DragMove {
            translation: Point::new(i as f32 * 60.0, 0.0),
            interval: 16.0,
        });
    }
    player.on_drag_end();

    let now = scheduler.borrow().now();
    run_until(&scheduler, now + 1000.0, |id| {
        player.handle_timer(id);
    });
    tracing::info!("after flick: page={}", player.active_index());

    player.dispose();
    Ok(())
}
