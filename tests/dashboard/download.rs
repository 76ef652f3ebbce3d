use std::fs;

use torrust_tracker_dashboard::core::download;
use torrust_tracker_dashboard_primitives::torrent::fixture::TorrentBuilder;

use super::Environment;
use crate::common::tracker::Tracker;

#[tokio::test]
async fn it_should_save_the_torrent_file_in_the_downloads_directory() {
    let env = Environment::start().await;

    let torrent = TorrentBuilder::default().build();
    env.mock().add_torrent(torrent.clone());

    let path = env
        .dashboard
        .download(&torrent, &env.config.downloads.output_dir)
        .await
        .unwrap();

    assert_eq!(path, env.config.downloads.output_dir.join("ubuntu.torrent"));
    assert_eq!(fs::read(&path).unwrap(), Tracker::torrent_file(torrent.info_hash.as_str()));

    fs::remove_dir_all(&env.config.downloads.output_dir).unwrap();

    env.stop();
}

#[tokio::test]
async fn it_should_fail_downloading_a_torrent_the_tracker_does_not_know() {
    let env = Environment::start().await;

    let torrent = TorrentBuilder::default().build();

    let result = env.dashboard.download(&torrent, &env.config.downloads.output_dir).await;

    let Err(download::Error::Transport { source }) = result else {
        panic!("the download should fail");
    };

    assert_eq!(source.detail(), Some("Torrent not found"));
    assert!(!env.config.downloads.output_dir.exists());

    env.stop();
}
