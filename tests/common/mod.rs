//! Shared helpers: spawn a gateway on an ephemeral port over a temp dir.

use std::path::PathBuf;
use std::time::Duration;

use roster_gateway::app_state::AppState;
use roster_gateway::persistence::JsonFileStore;
use roster_gateway::server;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub struct TestServer {
    pub base_url: String,
    pub ws_url: String,
    pub data_file: PathBuf,
    _dir: TempDir,
}

pub async fn spawn() -> TestServer {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("tempdir");
    };
    let data_file = dir.path().join("data").join("users.json");
    let state = AppState::new(JsonFileStore::new(data_file.clone()), 256);
    let app = server::build_app(state, Duration::from_secs(5));

    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("local addr");
    };
    tokio::spawn(server::serve(listener, app));

    TestServer {
        base_url: format!("http://{addr}"),
        ws_url: format!("ws://{addr}/ws"),
        data_file,
        _dir: dir,
    }
}
