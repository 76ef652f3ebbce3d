use std::sync::atomic::Ordering;

use torrust_tracker_dashboard::core::upload::{self, Progress, UploadFile, UploadStatus};
use torrust_tracker_dashboard::core::view::{Panel, UploadPanel};
use torrust_tracker_dashboard_clock::ticker;
use torrust_tracker_dashboard_test_helpers::random;

use super::Environment;
use crate::common::logging::{tracing_stderr_init, INIT};

#[tokio::test]
async fn it_should_upload_a_file_and_list_the_new_torrent() {
    INIT.call_once(|| {
        tracing_stderr_init(tracing::level_filters::LevelFilter::ERROR);
    });

    let env = Environment::start().await;
    env.mock().hold_uploads.store(true, Ordering::SeqCst);

    let (manual, _trigger) = ticker::manual();
    let job = env.dashboard.start_polling(manual);

    let mut status = env.dashboard.uploader().subscribe();
    let mut torrents = env.dashboard.synchronizer().subscribe_torrents();

    let dashboard = env.dashboard.clone();
    let upload = tokio::spawn(async move {
        dashboard
            .upload(UploadFile::from_bytes("file.bin", &random::bytes(1_048_576)))
            .await
    });

    // The tracker holds the response until the whole file has been read.
    status
        .wait_for(|status| *status == UploadStatus::InProgress(Progress::Percent(100)))
        .await
        .unwrap();

    env.mock().release_upload();

    let uploaded = upload.await.unwrap().unwrap();

    assert_eq!(uploaded.name, "file.bin");
    assert_eq!(uploaded.file_size, 1_048_576);
    assert_eq!(uploaded.num_pieces, 4);
    assert_eq!(env.dashboard.uploader().status(), UploadStatus::Succeeded(uploaded.clone()));

    // No tick is pulled: the upload itself asks for the refresh.
    torrents
        .wait_for(|torrents| torrents.iter().any(|torrent| torrent.file_size == 1_048_576))
        .await
        .unwrap();

    job.stop().await;
    env.stop();
}

#[tokio::test]
async fn the_upload_progress_should_never_decrease() {
    let env = Environment::start().await;

    let mut status = env.dashboard.uploader().subscribe();

    let observer = tokio::spawn(async move {
        let mut percents = vec![];

        while status.changed().await.is_ok() {
            let current = status.borrow_and_update().clone();

            match current {
                UploadStatus::InProgress(Progress::Percent(percent)) => percents.push(percent),
                UploadStatus::InProgress(Progress::Indeterminate) | UploadStatus::Idle => {}
                UploadStatus::Succeeded(_) | UploadStatus::Failed { .. } => break,
            }
        }

        percents
    });

    env.dashboard
        .upload(UploadFile::from_bytes("file.bin", &random::bytes(1_048_576)))
        .await
        .unwrap();

    let percents = observer.await.unwrap();

    assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(percents.iter().all(|percent| *percent <= 100));

    env.stop();
}

#[tokio::test]
async fn a_rejected_upload_should_show_the_reason_given_by_the_tracker() {
    let env = Environment::start().await;
    *env.mock().reject_uploads_with.lock().unwrap() = Some("Torrent already exists".to_string());

    let result = env.dashboard.upload(UploadFile::from_bytes("file.bin", b"content")).await;

    let Err(upload::Error::Failed { message, source }) = result else {
        panic!("the upload should fail");
    };

    assert_eq!(message, "Torrent already exists");
    assert_eq!(source.status().map(|status| status.as_u16()), Some(400));

    let view = env.dashboard.view(std::time::Duration::ZERO);

    let Panel::Upload { upload, .. } = view.panel else {
        panic!("the upload tab should be active");
    };

    assert_eq!(
        upload,
        UploadPanel::Failed {
            message: "Torrent already exists".to_string()
        }
    );
    assert!(!env.dashboard.uploader().is_uploading());

    env.stop();
}

#[tokio::test]
async fn the_upload_view_should_describe_the_created_torrent() {
    let env = Environment::start().await;

    let uploaded = env
        .dashboard
        .upload(UploadFile::from_bytes("file.bin", &random::bytes(1_048_576)))
        .await
        .unwrap();

    let view = env.dashboard.view(std::time::Duration::ZERO);

    let Panel::Upload { upload, .. } = view.panel else {
        panic!("the upload tab should be active");
    };

    assert_eq!(
        upload,
        UploadPanel::Succeeded {
            message: "Successfully created torrent for \"file.bin\"".to_string(),
            info_hash: uploaded.info_hash.to_string(),
            file_size: "1024.0 KB".to_string(),
            pieces: "4".to_string(),
        }
    );

    env.stop();
}
