//! Background state polling.
//!
//! Nothing in the bridge API triggers a hardware probe, so reachability and
//! externally made changes would go stale. The poller refreshes every light
//! once immediately and then on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use crate::ports::Light;
use crate::services::light_service::LightService;

/// Refresh all lights now and then every `interval`, forever.
///
/// Meant to be spawned as a task and aborted on shutdown. Missed ticks
/// (a sweep slower than `interval`) are skipped rather than bunched up.
pub async fn poll_loop<L>(service: Arc<LightService<L>>, interval: Duration)
where
    L: Light + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let failures = service.refresh_all().await;
        if failures > 0 {
            tracing::info!(
                failures,
                total = service.registry().len(),
                "state poll finished with unreachable lights"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::LightRegistry;
    use crate::test_support::{Behaviour, StubLight};
    use std::sync::atomic::Ordering;

    #[tokio::test(start_paused = true)]
    async fn should_refresh_immediately_then_on_interval() {
        let service = Arc::new(LightService::new(LightRegistry::new(vec![
            StubLight::named("Desk"),
        ])));
        let handle = tokio::spawn(poll_loop(Arc::clone(&service), Duration::from_secs(30)));

        tokio::time::sleep(Duration::from_secs(1)).await;
        let light = service.registry().iter().next().unwrap().1;
        assert_eq!(light.refreshes.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(light.refreshes.load(Ordering::SeqCst), 2);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_polling_after_failures() {
        let service = Arc::new(LightService::new(LightRegistry::new(vec![
            StubLight::named("Desk"),
        ])));
        service
            .registry()
            .iter()
            .next()
            .unwrap()
            .1
            .set_behaviour(Behaviour::Unreachable);
        let handle = tokio::spawn(poll_loop(Arc::clone(&service), Duration::from_secs(5)));

        tokio::time::sleep(Duration::from_secs(11)).await;
        let light = service.registry().iter().next().unwrap().1;
        assert_eq!(light.refreshes.load(Ordering::SeqCst), 3);
        assert!(!light.current_state().reachable());

        handle.abort();
    }
}
