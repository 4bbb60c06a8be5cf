// GUI用ユーティリティ関数

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::gui::config_manager::LogConfig;

/// フィードパスの簡易バリデーション
///
/// 存在チェックは行わない（ファイルはプロデューサ側が後から作ることが
/// ある）。空文字列とディレクトリだけ弾く。
pub fn validate_feed_path(path: &str) -> bool {
    !path.trim().is_empty() && !Path::new(path).is_dir()
}

/// 時刻フォーマット
pub fn format_timestamp() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}

/// 稼働時間の表示用フォーマット
pub fn format_uptime(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m{}s", seconds / 60, seconds % 60)
    } else {
        format!("{}h{}m", seconds / 3600, (seconds % 3600) / 60)
    }
}

/// 強化されたログ初期化
///
/// 戻り値のWorkerGuardはファイル出力が有効なときのみSomeになる。
/// 呼び出し側（バイナリ）がプロセス終了まで保持すること。
pub fn init_logging(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .or_else(|_| EnvFilter::try_new("info"))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if config.enable_file_logging {
        let log_dir = match &config.log_dir {
            Some(dir) => dir.clone(),
            None => directories::ProjectDirs::from("dev", "sentiview", "sentiview")
                .map(|dirs| dirs.data_dir().join("logs"))
                .unwrap_or_else(|| std::path::PathBuf::from("logs")),
        };
        std::fs::create_dir_all(&log_dir)?;

        let appender = tracing_appender::rolling::daily(&log_dir, "sentiview.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);

        registry.with(file_layer).try_init()?;
        Ok(Some(guard))
    } else {
        registry.try_init()?;
        Ok(None)
    }
}
