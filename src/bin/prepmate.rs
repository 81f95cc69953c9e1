use anyhow::Result;
use clap::Parser;
use dioxus::prelude::*;
use prepmate::{
    config_manager::{AppConfig, ConfigManager, LoadedConfig},
    gui::{components::MainWindow, install_services, utils},
};

/// AI模擬面接クライアント
#[derive(Debug, Parser)]
#[command(name = "prepmate", version, about = "AI mock interview practice client")]
struct Args {
    /// バックエンドのベースURL（設定ファイル・環境変数より優先）
    #[arg(long)]
    api_url: Option<String>,

    /// ログレベル (trace/debug/info/warn/error)
    #[arg(long)]
    log_level: Option<String>,

    /// ファイルへのログ出力を無効化
    #[arg(long)]
    no_file_log: bool,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.trim().to_string();
        }
        if let Some(level) = &self.log_level {
            config.log.log_level = level.clone();
        }
        if self.no_file_log {
            config.log.enable_file_logging = false;
        }
    }
}

fn app() -> Element {
    rsx! {
        MainWindow {}
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 設定読み込み（ログ初期化前なのでエラーは後で出力する）
    let config_manager = ConfigManager::locate()?;
    let LoadedConfig {
        mut config,
        load_error,
    } = config_manager.load_layered(|key| std::env::var(key).ok());
    args.apply(&mut config);

    // tokio-consoleの初期化（プロファイリング用）
    #[cfg(feature = "debug-tokio")]
    console_subscriber::init();

    #[cfg(not(feature = "debug-tokio"))]
    let _log_guard = utils::init_logging(&config.log)?;

    if let Some(e) = load_error {
        tracing::warn!("設定読み込みエラー、デフォルト設定を使用: {:#}", e);
    }

    tracing::info!("🎬 Starting PrepMate - AI mock interview client");
    tracing::info!(
        "🌐 Backend: {} (config: {})",
        config.api.base_url,
        config_manager.path().display()
    );
    tracing::info!(
        "🪟 ウィンドウ設定: {}x{}, 最大化: {}",
        config.window.width,
        config.window.height,
        config.window.maximized
    );

    let window = config.window.clone();
    install_services(config)?;

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::tao::window::WindowBuilder::new()
                    .with_title("PrepMate - AI Mock Interview")
                    .with_inner_size(dioxus::desktop::tao::dpi::LogicalSize::new(
                        window.width as f64,
                        window.height as f64,
                    ))
                    .with_maximized(window.maximized)
                    .with_resizable(true),
            ),
        )
        .launch(app);

    tracing::info!("👋 PrepMate shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from([
            "prepmate",
            "--api-url",
            "https://api.example.com ",
            "--log-level",
            "debug",
            "--no-file-log",
        ]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.log.log_level, "debug");
        assert!(!config.log.enable_file_logging);
    }

    #[test]
    fn test_no_args_keeps_config() {
        let args = Args::parse_from(["prepmate"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert!(config.log.enable_file_logging);
    }
}
