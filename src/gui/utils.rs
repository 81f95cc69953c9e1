// GUI用ユーティリティ関数

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_manager::{project_dirs, LogConfig};

const LOG_FILE_PREFIX: &str = "prepmate.log";

/// ログ出力先ディレクトリを決定
pub fn resolve_log_dir(config: &LogConfig) -> anyhow::Result<PathBuf> {
    match &config.log_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(project_dirs()?.data_dir().join("logs")),
    }
}

/// 強化されたログ初期化
///
/// `RUST_LOG` が設定されていればそれを優先し、なければ設定ファイルのレベルを使用します。
/// ファイル出力時は日次ローテーションし、返されたガードは終了まで保持する必要があります。
pub fn init_logging(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("Invalid log level: {}", config.log_level))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let (file_layer, guard) = if config.enable_file_logging {
        let log_dir = resolve_log_dir(config)?;
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some((layer, log_dir)), Some(guard))
    } else {
        (None, None)
    };

    let (file_layer, log_dir) = match file_layer {
        Some((layer, dir)) => (Some(layer), Some(dir)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    if let Some(dir) = log_dir {
        info!("📝 File logging enabled: {}", dir.display());
        match cleanup_old_logs(&dir, config.max_log_files) {
            Ok(0) => {}
            Ok(removed) => debug!("🧹 Removed {} old log files", removed),
            Err(e) => warn!("⚠️ Failed to clean up old log files: {}", e),
        }
    }

    Ok(guard)
}

/// 古いログファイルを削除し、最新 `max_files` 件のみ残す
pub fn cleanup_old_logs(log_dir: &Path, max_files: u32) -> anyhow::Result<usize> {
    let pattern = log_dir.join(format!("{}*", LOG_FILE_PREFIX));
    let pattern = pattern.to_string_lossy();

    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .context("Invalid log file pattern")?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();

    // 日付サフィックス付きのファイル名なので名前順 = 古い順
    files.sort();

    let excess = files.len().saturating_sub(max_files as usize);
    let mut removed = 0;
    for path in files.into_iter().take(excess) {
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove log file: {}", path.display()))?;
        removed += 1;
    }
    Ok(removed)
}

/// 時刻フォーマット
pub fn format_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
