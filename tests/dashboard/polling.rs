use std::sync::atomic::Ordering;
use std::time::Duration;

use torrust_tracker_dashboard::bootstrap::jobs::polling;
use torrust_tracker_dashboard_primitives::stats::TrackerStats;
use torrust_tracker_dashboard_primitives::torrent::fixture::TorrentBuilder;

use super::Environment;

#[tokio::test]
async fn an_empty_torrent_list_should_leave_the_torrent_collection_empty() {
    let env = Environment::start().await;

    env.dashboard.synchronizer().tick().join().await.unwrap();

    assert!(env.dashboard.torrents().is_empty());
    assert_eq!(env.dashboard.stats(), Some(TrackerStats::zeroed()));

    env.stop();
}

#[tokio::test]
async fn the_stats_should_keep_their_last_value_when_their_fetch_fails() {
    let env = Environment::start().await;
    env.mock().set_stats(TrackerStats::new(1, 2, 3, 4));

    env.dashboard.synchronizer().tick().join().await.unwrap();

    env.mock().fail_stats.store(true, Ordering::SeqCst);
    env.mock().add_torrent(TorrentBuilder::default().build());

    let result = env.dashboard.synchronizer().tick().join().await;

    assert_eq!(result.unwrap_err().detail(), Some("stats unavailable"));
    assert_eq!(env.dashboard.stats(), Some(TrackerStats::new(1, 2, 3, 4)));
    assert_eq!(env.dashboard.torrents(), vec![TorrentBuilder::default().build()]);

    env.stop();
}

#[tokio::test]
async fn the_polling_job_should_keep_the_dashboard_in_sync_with_the_tracker() {
    let env = Environment::start().await;
    env.mock().add_torrent(TorrentBuilder::default().build());

    let mut torrents = env.dashboard.synchronizer().subscribe_torrents();

    let job = polling::start_job(&env.config.polling, &env.dashboard);

    tokio::time::timeout(Duration::from_secs(5), torrents.wait_for(|torrents| !torrents.is_empty()))
        .await
        .expect("the first refresh should happen when the job starts")
        .unwrap();

    job.stop().await;

    assert!(env.dashboard.synchronizer().is_halted());

    env.stop();
}
