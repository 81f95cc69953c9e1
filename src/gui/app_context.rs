//! アプリケーションコンテキスト
//!
//! 起動時に組み立てたサービス群（セッションストア・APIクライアント・読み上げ・音声認識）と、
//! 現在の画面を表す `Signal<Route>` を1つのコンテキストとして提供します。
//! 画面遷移は `ChannelNavigator` 経由でイベントループに届き、ルートSignalへ反映されます。

use std::sync::{Arc, Mutex, OnceLock};

use anyhow::Context;
use dioxus::prelude::*;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::config_manager::AppConfig;
use crate::interview::{FlowContext, InterviewBackend};
use crate::navigation::{ChannelNavigator, Navigator, Route};
use crate::session::SessionStore;
use crate::voice::{
    PlaybackBackendType, SilentSynthesizer, SpeechRecognizer, SpeechSynthesizer,
    UnsupportedRecognizer, VoicePlayback, VoicevoxSynthesizer,
};

static SERVICES: OnceLock<AppServices> = OnceLock::new();
static ROUTE_RECEIVER: Mutex<Option<mpsc::UnboundedReceiver<Route>>> = Mutex::new(None);

/// 画面から利用するサービス群
#[derive(Clone)]
pub struct AppServices {
    pub config: AppConfig,
    pub store: SessionStore,
    pub navigator: Arc<ChannelNavigator>,
    pub api: Arc<ApiClient>,
    pub playback: VoicePlayback,
    pub recognizer: Arc<dyn SpeechRecognizer>,
}

impl AppServices {
    /// 設定からサービス群を組み立てる
    pub fn build(config: AppConfig) -> anyhow::Result<(Self, mpsc::UnboundedReceiver<Route>)> {
        let store = match SessionStore::with_default_dir() {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(
                    "⚠️ [APP_CONTEXT] Session storage unavailable, using in-memory store: {}",
                    e
                );
                SessionStore::in_memory()
            }
        };

        let (navigator, receiver) = ChannelNavigator::new();
        let navigator = Arc::new(navigator);

        let api = ApiClient::new(&config.api, store.clone(), navigator.clone())
            .context("Failed to create API client")?;

        let playback = VoicePlayback::new(build_synthesizer(&config));

        Ok((
            Self {
                config,
                store,
                navigator,
                api: Arc::new(api),
                playback,
                recognizer: Arc::new(UnsupportedRecognizer),
            },
            receiver,
        ))
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    pub fn backend(&self) -> Arc<dyn InterviewBackend> {
        self.api.clone()
    }

    /// 面接フロー用の依存
    pub fn flow_context(&self) -> FlowContext {
        FlowContext {
            backend: self.backend(),
            navigator: self.navigator.clone(),
            store: self.store.clone(),
            playback: self.playback.clone(),
            follow_up_warn_threshold: self.config.interview.follow_up_warn_threshold,
        }
    }
}

fn build_synthesizer(config: &AppConfig) -> Arc<dyn SpeechSynthesizer> {
    match config.voice.playback {
        PlaybackBackendType::None => Arc::new(SilentSynthesizer),
        PlaybackBackendType::Voicevox => {
            match VoicevoxSynthesizer::new(config.voice.voicevox.clone()) {
                Ok(synthesizer) => {
                    tracing::info!(
                        "🔊 [APP_CONTEXT] VOICEVOX playback enabled: {}",
                        config.voice.voicevox.base_url()
                    );
                    Arc::new(synthesizer)
                }
                Err(e) => {
                    tracing::warn!("⚠️ [APP_CONTEXT] VOICEVOX unavailable, playback disabled: {}", e);
                    Arc::new(SilentSynthesizer)
                }
            }
        }
    }
}

/// 起動前にサービス群を登録する（2回目以降は無視）
pub fn install_services(config: AppConfig) -> anyhow::Result<()> {
    if SERVICES.get().is_some() {
        tracing::debug!("🔄 [APP_CONTEXT] Services already installed");
        return Ok(());
    }

    let (services, receiver) = AppServices::build(config)?;
    if SERVICES.set(services).is_ok() {
        if let Ok(mut slot) = ROUTE_RECEIVER.lock() {
            *slot = Some(receiver);
        }
        tracing::info!("🚀 [APP_CONTEXT] Services installed");
    }
    Ok(())
}

/// 画面から参照するコンテキスト
#[derive(Clone)]
pub struct AppContext {
    pub route: Signal<Route>,
    pub services: AppServices,
}

impl AppContext {
    pub fn navigate(&self, route: Route) {
        self.services.navigator.navigate(route);
    }
}

/// 現在のコンテキストを取得
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>()
}

/// コンテキストプロバイダー
#[component]
pub fn AppContextProvider(children: Element) -> Element {
    let services = use_hook(|| SERVICES.get().cloned());
    let mut route = use_signal(|| Route::Home);

    // 遷移イベントループ
    use_hook(move || {
        let receiver = ROUTE_RECEIVER.lock().ok().and_then(|mut slot| slot.take());
        if let Some(mut receiver) = receiver {
            spawn(async move {
                tracing::debug!("🧭 [APP_CONTEXT] Navigation loop started");
                while let Some(next) = receiver.recv().await {
                    tracing::info!("🧭 [APP_CONTEXT] Route changed: {}", next);
                    route.set(next);
                }
                tracing::debug!("🧭 [APP_CONTEXT] Navigation loop finished");
            });
        }
    });

    match services {
        Some(services) => {
            use_context_provider(|| AppContext { route, services });
            children
        }
        None => rsx! {
            div {
                class: "fatal-error",
                "⚠️ Application services are not initialized"
            }
        },
    }
}
