use crate::core::controller::DataRefreshController;
use crate::core::{DashboardSnapshot, SpaceDataSource};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// How often the mission clock on the dashboard advances.
pub const MISSION_CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Renders one opening frame, then a new frame whenever the controller commits a
/// slot and on every tick of the mission clock, until `shutdown` resolves. The
/// clock is dropped on return. Returns the number of frames rendered.
pub async fn run_display<S, F, R>(
    controller: &DataRefreshController<S>,
    clock_period: Duration,
    shutdown: F,
    mut render: R,
) -> usize
where
    S: SpaceDataSource + 'static,
    F: Future<Output = ()>,
    R: FnMut(&DashboardSnapshot, DateTime<Utc>),
{
    let mut updates = controller.subscribe();
    updates.borrow_and_update();

    let mut clock = interval_at(Instant::now() + clock_period, clock_period);
    clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    render(&controller.snapshot(), Utc::now());
    let mut frames = 1;

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = clock.tick() => {}
            _ = &mut shutdown => break,
        }

        render(&controller.snapshot(), Utc::now());
        frames += 1;
    }

    tracing::debug!("Display stopped after {} frames", frames);
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller::RefreshSettings;
    use crate::core::{fallback, NearBodyRecord, OrbitalPosition, Result};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use tokio::time::sleep;

    // Fetches that never answer, so only the clock drives frames.
    struct SilentSource;

    #[async_trait]
    impl SpaceDataSource for SilentSource {
        async fn fetch_orbital_position(&self) -> Result<OrbitalPosition> {
            std::future::pending().await
        }

        async fn fetch_near_bodies(&self, _date: NaiveDate) -> Result<Vec<NearBodyRecord>> {
            std::future::pending().await
        }
    }

    struct InstantSource;

    #[async_trait]
    impl SpaceDataSource for InstantSource {
        async fn fetch_orbital_position(&self) -> Result<OrbitalPosition> {
            Ok(fallback::orbital_position(0))
        }

        async fn fetch_near_bodies(&self, _date: NaiveDate) -> Result<Vec<NearBodyRecord>> {
            Ok(fallback::near_bodies())
        }
    }

    fn slow_refresh() -> RefreshSettings {
        RefreshSettings {
            interval: Duration::from_secs(60),
            near_body_limit: 3,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mission_clock_renders_every_second() {
        let controller = DataRefreshController::new(SilentSource, slow_refresh());
        controller.start().unwrap();

        let started = Instant::now();
        let mut rendered_at = Vec::new();
        let frames = run_display(
            &controller,
            MISSION_CLOCK_PERIOD,
            sleep(Duration::from_millis(3_500)),
            |_, _| rendered_at.push(started.elapsed()),
        )
        .await;

        assert_eq!(frames, 4);
        assert_eq!(
            rendered_at,
            vec![
                Duration::ZERO,
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(3),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_frames_show_latest_snapshot() {
        let controller = DataRefreshController::new(SilentSource, slow_refresh());
        controller.start().unwrap();

        let mut snapshots = Vec::new();
        run_display(
            &controller,
            MISSION_CLOCK_PERIOD,
            sleep(Duration::from_millis(1_500)),
            |snapshot, _| snapshots.push(snapshot.clone()),
        )
        .await;

        assert_eq!(snapshots.len(), 2);
        assert!(snapshots.iter().all(|snapshot| !snapshot.loading));
        assert!(snapshots
            .iter()
            .all(|snapshot| snapshot.environment == Some(fallback::environmental_reading())));
        assert!(snapshots.iter().all(|snapshot| snapshot.orbital_position.is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_commits_render_between_clock_ticks() {
        let controller = DataRefreshController::new(InstantSource, slow_refresh());
        controller.start().unwrap();

        let mut last = None;
        let frames = run_display(
            &controller,
            MISSION_CLOCK_PERIOD,
            sleep(Duration::from_millis(500)),
            |snapshot, _| last = Some(snapshot.clone()),
        )
        .await;

        assert!(frames >= 2, "expected a frame per commit, got {}", frames);
        let last = last.unwrap();
        assert_eq!(last.orbital_position, Some(fallback::orbital_position(0)));
        assert_eq!(last.near_bodies, fallback::near_bodies());
    }
}
