use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Router,
};
use fwupload_lib::{
    select::SelectedFiles,
    upload::{HttpUploadClient, UploadClient, UploadPayload, UploadProgress},
    widget::{UploadOutcome, UploadWidget},
    Error, Settings,
};
use fwupload_proto::{dto::SaveFileResponse, ApiRoute, FILE_EXISTS};
use tokio::{net::TcpListener, sync::mpsc};

use support::RecordingView;

mod support;

type Stored = Arc<Mutex<HashMap<String, Vec<u8>>>>;

async fn save_file(
    State(stored): State<Stored>,
    mut multipart: Multipart,
) -> Result<String, StatusCode> {
    let mut saved = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("file") {
            return Err(StatusCode::BAD_REQUEST);
        }
        let file_name = field.file_name().unwrap_or_default().to_owned();
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        let mut stored = stored.lock().unwrap();
        if stored.contains_key(&file_name) {
            return Ok(FILE_EXISTS.to_owned());
        }
        stored.insert(file_name.clone(), bytes.to_vec());
        saved.push(file_name);
    }
    Ok(format!("successfully uploaded {}", saved.join(", ")))
}

async fn start_server(stored: Stored) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route(&ApiRoute::SaveFile.route(0), post(save_file))
        .route("/home/upload/0/broken", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .with_state(stored);
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

fn settings(addr: SocketAddr) -> Settings {
    Settings {
        host: addr.ip().to_string(),
        port: addr.port(),
        ..Settings::default()
    }
}

#[tokio::test]
async fn test_post_files_streams_multipart() {
    let stored = Stored::default();
    let addr = start_server(stored.clone()).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("router.zip");
    std::fs::write(&path, vec![7u8; 200 * 1024]).unwrap();

    let mut files = SelectedFiles::default();
    files.add_file(&path, None).unwrap();
    files.add_bytes("camera.tar", b"camera".to_vec());

    let client = HttpUploadClient::new(&settings(addr));
    let (progress_tx, mut progress_rx) = mpsc::channel::<UploadProgress>(1024);
    let response = client
        .post_files(UploadPayload::from_selection(&files), progress_tx)
        .await
        .unwrap();
    assert_eq!(
        SaveFileResponse::Saved("successfully uploaded router.zip, camera.tar".to_owned()),
        response
    );

    let mut percents = Vec::new();
    while let Ok(progress) = progress_rx.try_recv() {
        percents.push(progress.percent);
    }
    assert!(percents.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(Some(&100), percents.last());

    let stored = stored.lock().unwrap();
    assert_eq!(Some(&vec![7u8; 200 * 1024]), stored.get("router.zip"));
    assert_eq!(Some(&b"camera".to_vec()), stored.get("camera.tar"));
}

#[tokio::test]
async fn test_conflict_is_renamed_over_http() {
    let stored = Stored::default();
    stored
        .lock()
        .unwrap()
        .insert("router.zip".to_owned(), b"old".to_vec());
    let addr = start_server(stored.clone()).await;

    let settings = settings(addr);
    let view = RecordingView::answering(vec![true], vec![Some("router-1.zip")]);
    let widget = UploadWidget::new(HttpUploadClient::new(&settings), view, settings);

    let mut files = SelectedFiles::default();
    files.add_bytes("router.zip", b"new".to_vec());

    let outcome = widget.submit(&files).await;
    assert_eq!(
        UploadOutcome::Saved("successfully uploaded router-1.zip".to_owned()),
        outcome
    );
    let stored = stored.lock().unwrap();
    assert_eq!(Some(&b"old".to_vec()), stored.get("router.zip"));
    assert_eq!(Some(&b"new".to_vec()), stored.get("router-1.zip"));
}

#[tokio::test]
async fn test_error_status() {
    let addr = start_server(Stored::default()).await;
    let client = HttpUploadClient::with_endpoint(format!("http://{}/home/upload/0/broken", addr));

    let mut files = SelectedFiles::default();
    files.add_bytes("a.zip", b"a".to_vec());
    let (progress_tx, _progress_rx) = mpsc::channel(16);
    let result = client
        .post_files(UploadPayload::from_selection(&files), progress_tx)
        .await;
    assert!(matches!(
        result,
        Err(Error::Upload(fwupload_lib::upload::UploadError::Unknown(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR
        )))
    ));
}
