use std::time::Duration;

use torrust_tracker_dashboard::core::selection::Peers;
use torrust_tracker_dashboard::core::view::{Panel, PeersPanel, Tab};
use torrust_tracker_dashboard_primitives::peer::fixture::PeerBuilder;
use torrust_tracker_dashboard_primitives::torrent::fixture::TorrentBuilder;

use super::Environment;

#[tokio::test]
async fn selecting_a_torrent_should_load_its_peers() {
    let env = Environment::start().await;

    let torrent = TorrentBuilder::default().build();
    env.mock().add_torrent(torrent.clone());
    env.mock().add_peer(&torrent.info_hash, PeerBuilder::seeder().build());
    env.mock()
        .add_peer(&torrent.info_hash, PeerBuilder::leecher().with_id(2).build());

    env.dashboard.synchronizer().tick().join().await.unwrap();

    env.dashboard
        .select_by_info_hash(&torrent.info_hash)
        .unwrap()
        .unwrap()
        .await
        .unwrap();

    let Peers::Loaded(peers) = env.dashboard.selector().current().peers else {
        panic!("the peers should be loaded");
    };

    assert_eq!(peers.len(), 2);

    env.dashboard.switch_tab(Tab::Peers);

    let Panel::Peers(PeersPanel::List { title, rows }) = env.dashboard.view(Duration::ZERO).panel else {
        panic!("the peer list should be shown");
    };

    assert_eq!(title, "Peers for \"ubuntu.iso\" (2)");
    assert_eq!(rows.len(), 2);

    env.stop();
}

#[tokio::test]
async fn a_torrent_without_peers_should_be_shown_as_empty_not_loading() {
    let env = Environment::start().await;

    let torrent = TorrentBuilder::default().build();
    env.mock().add_torrent(torrent.clone());

    env.dashboard.select(Some(torrent)).unwrap().await.unwrap();
    env.dashboard.switch_tab(Tab::Peers);

    assert_eq!(
        env.dashboard.view(Duration::ZERO).panel,
        Panel::Peers(PeersPanel::Empty {
            torrent: "ubuntu.iso".to_string()
        })
    );

    env.stop();
}
