use torrust_tracker_dashboard::console::app;
use torrust_tracker_dashboard::console::logger::Logger;
use torrust_tracker_dashboard_primitives::peer::fixture::PeerBuilder;
use torrust_tracker_dashboard_primitives::stats::TrackerStats;
use torrust_tracker_dashboard_primitives::torrent::fixture::TorrentBuilder;

use super::Environment;

#[tokio::test]
async fn the_stats_command_should_print_the_stat_cards_and_the_recent_activity() {
    let env = Environment::start().await;
    env.mock().set_stats(TrackerStats::new(1, 2, 3, 4));
    env.mock().add_torrent(TorrentBuilder::default().build());

    let logger = Logger::new();

    app::stats(&env.dashboard, &logger).await.unwrap();

    let output = logger.log();

    assert!(output.contains("[Statistics]"));
    assert!(output.contains("Total Users"));
    assert!(output.contains("Recent Activity"));
    assert!(output.contains("ubuntu.iso (1/5/2024) 1 seeders, 0 leechers"));

    env.stop();
}

#[tokio::test]
async fn the_peers_command_should_print_the_peers_of_the_torrent() {
    let env = Environment::start().await;

    let torrent = TorrentBuilder::default().build();
    env.mock().add_torrent(torrent.clone());
    env.mock().add_peer(&torrent.info_hash, PeerBuilder::seeder().build());

    let logger = Logger::new();

    app::peers(&env.dashboard, &torrent.info_hash, &logger).await.unwrap();

    assert!(logger.log().contains("Peers for \"ubuntu.iso\" (1)"));

    env.stop();
}

#[tokio::test]
async fn one_shot_commands_should_fail_when_the_tracker_is_down() {
    let env = Environment::start().await;
    let dashboard = env.dashboard.clone();

    env.stop();

    let logger = Logger::new();

    assert!(app::stats(&dashboard, &logger).await.is_err());
}
