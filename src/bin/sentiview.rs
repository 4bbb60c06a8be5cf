use clap::Parser;
use dioxus::prelude::*;
use parking_lot::Mutex;
use sentiview::gui::{components::MainWindow, config_manager, hooks, utils};

/// ウィンドウ設定の保存用
static LAST_WINDOW_CONFIG: Mutex<Option<config_manager::WindowConfig>> = Mutex::new(None);

/// コマンドライン引数
///
/// フィードパスとポーリング間隔は設定ファイルより優先される。
#[derive(Parser, Debug)]
#[command(
    name = "sentiview",
    version,
    about = "Live average sentiment by category, tailed from an NDJSON feed"
)]
struct Cli {
    /// 監視するNDJSONフィードファイル
    #[arg(long)]
    feed: Option<std::path::PathBuf>,

    /// ポーリング間隔（ミリ秒）
    #[arg(long)]
    interval_ms: Option<u64>,
}

/// sentiview GUIアプリケーション
fn app() -> Element {
    let window = dioxus::desktop::use_window();

    // ウィンドウ状態を定期的に更新（軽量な監視）
    use_effect({
        let window = window.clone();
        move || {
            let window = window.clone();
            spawn(async move {
                let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(1));
                loop {
                    interval.tick().await;

                    // ウィンドウの現在状態を取得
                    let current_size = window.inner_size();
                    let current_position = window.outer_position().unwrap_or_default();
                    let is_maximized = window.is_maximized();

                    let window_config = config_manager::WindowConfig {
                        width: current_size.width,
                        height: current_size.height,
                        x: current_position.x,
                        y: current_position.y,
                        maximized: is_maximized,
                    };

                    // 最新の状態をグローバルに保存
                    *LAST_WINDOW_CONFIG.lock() = Some(window_config);
                }
            });
        }
    });

    rsx! {
        div {
            class: "app",
            style: "
                height: 100vh;
                margin: 0;
                padding: 0;
                overflow: auto;
                background: #f0f2f5;
                font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            ",

            MainWindow {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 設定読み込み（ログ設定が含まれるためロガー初期化より先）
    let config_manager = config_manager::ConfigManager::new()?;
    let mut config = config_manager
        .load_config()
        .unwrap_or_else(|_| config_manager::AppConfig::default());

    // CLIオーバーライド
    if let Some(feed) = cli.feed {
        config.feed_file = feed.to_string_lossy().into_owned();
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.poll_interval_ms = interval_ms;
    }

    // 強化されたログ初期化（ガードはプロセス終了まで保持する）
    let _log_guard = utils::init_logging(&config.log)?;

    tracing::info!("🎬 Starting sentiview - Live Sentiment Chart");
    tracing::info!(
        "⚙️ 設定ファイル: {}",
        config_manager.get_config_file_path().display()
    );

    if !utils::validate_feed_path(&config.feed_file) {
        anyhow::bail!("invalid feed path: {:?}", config.feed_file);
    }

    tracing::info!(
        "👀 Watching file {} for new messages (interval {}ms)",
        config.feed_file,
        config.poll_interval_ms
    );

    // GUI側のフックが拾えるように監視設定を登録
    hooks::set_launch_config(config.watcher_config());

    tracing::info!(
        "🪟 ウィンドウ設定: {}x{} at ({}, {}), 最大化: {}",
        config.window.width,
        config.window.height,
        config.window.x,
        config.window.y,
        config.window.maximized
    );

    // Ctrl+Cシグナルハンドラー
    ctrlc::set_handler(move || {
        tracing::info!("🛑 Consumer interrupted by user");
        save_window_config_on_exit();
        std::process::exit(0);
    })?;

    // LaunchBuilderを使用してウィンドウ設定を適用
    let mut launch_builder = dioxus::LaunchBuilder::desktop();

    launch_builder = launch_builder.with_cfg(
        dioxus::desktop::Config::new().with_window(
            dioxus::desktop::tao::window::WindowBuilder::new()
                .with_title("sentiview - Real-Time Average Sentiment by Category")
                .with_inner_size(dioxus::desktop::tao::dpi::LogicalSize::new(
                    config.window.width as f64,
                    config.window.height as f64,
                ))
                .with_position(dioxus::desktop::tao::dpi::LogicalPosition::new(
                    config.window.x as f64,
                    config.window.y as f64,
                ))
                .with_maximized(config.window.maximized)
                .with_resizable(true),
        ),
    );

    // Dioxusアプリケーションを起動
    launch_builder.launch(app);

    // 正常終了時の設定保存
    save_window_config_on_exit();

    tracing::info!("👋 sentiview shutting down");
    Ok(())
}

/// 終了時にウィンドウ設定を保存
fn save_window_config_on_exit() {
    let last_config = LAST_WINDOW_CONFIG.lock().clone();
    if let Some(window_config) = last_config {
        if let Ok(config_manager) = config_manager::ConfigManager::new() {
            // 既存の設定を読み込み、ウィンドウ設定のみ更新
            if let Ok(mut config) = config_manager.load_config() {
                config.window = window_config;

                if let Err(e) = config_manager.save_config(&config) {
                    tracing::error!("設定保存エラー: {}", e);
                } else {
                    tracing::info!(
                        "💾 ウィンドウ設定を保存しました: {}x{} at ({}, {})",
                        config.window.width,
                        config.window.height,
                        config.window.x,
                        config.window.y
                    );
                }
            }
        }
    }
}
