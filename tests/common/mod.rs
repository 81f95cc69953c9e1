//! テスト用モックバックエンド（warp）

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use prepmate::config_manager::ApiConfig;
use prepmate::navigation::{Navigator, Route};
use prepmate::session::SessionStore;
use prepmate::ApiClient;
use serde_json::Value;
use warp::Filter;

/// モックが受け取ったリクエスト
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// `?` を除いた生のクエリ文字列
    pub query: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn query_params(&self) -> HashMap<String, String> {
        self.query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| {
                (
                    urlencoding::decode(k).unwrap().into_owned(),
                    urlencoding::decode(v).unwrap().into_owned(),
                )
            })
            .collect()
    }
}

pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    /// ハンドラーが返す (ステータス, JSON) で応答するサーバーを起動
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, Value) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();
        let handler = Arc::new(handler);

        let route = warp::any()
            .and(warp::method())
            .and(warp::path::full())
            .and(
                warp::query::raw()
                    .or(warp::any().map(String::new))
                    .unify(),
            )
            .and(warp::header::optional::<String>("authorization"))
            .and(warp::header::optional::<String>("content-type"))
            .and(warp::body::bytes())
            .map(
                move |method: warp::http::Method,
                      path: warp::path::FullPath,
                      query: String,
                      authorization: Option<String>,
                      content_type: Option<String>,
                      body: warp::hyper::body::Bytes| {
                    let request = RecordedRequest {
                        method: method.to_string(),
                        path: path.as_str().to_string(),
                        query,
                        authorization,
                        content_type,
                        body: body.to_vec(),
                    };
                    let (status, json) = handler(&request);
                    recorded.lock().push(request);
                    warp::reply::with_status(
                        warp::reply::json(&json),
                        warp::http::StatusCode::from_u16(status).unwrap(),
                    )
                },
            );

        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn hit_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            ..ApiConfig::default()
        }
    }
}

#[derive(Default)]
pub struct RecordingNavigator(Mutex<Vec<Route>>);

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.0.lock().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.0.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.0.lock().push(route);
    }
}

/// モックに接続したクライアント一式
pub struct Harness {
    pub backend: MockBackend,
    pub store: SessionStore,
    pub navigator: Arc<RecordingNavigator>,
    pub client: ApiClient,
}

pub async fn harness<F>(handler: F) -> Harness
where
    F: Fn(&RecordedRequest) -> (u16, Value) + Send + Sync + 'static,
{
    let backend = MockBackend::start(handler).await;
    let store = SessionStore::in_memory();
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClient::new(&backend.config(), store.clone(), navigator.clone()).unwrap();
    Harness {
        backend,
        store,
        navigator,
        client,
    }
}
