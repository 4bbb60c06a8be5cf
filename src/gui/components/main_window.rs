use dioxus::prelude::*;

use crate::gui::{
    components::{CompactStatusPanel, SentimentChart},
    hooks::{launch_config, use_sentiment_feed, FeedHandle},
    styles::theme::get_embedded_css,
};

/// メインウィンドウコンポーネント
///
/// ヘッダー・ステータスパネル・チャート・操作ボタンの縦一列レイアウト。
#[component]
pub fn MainWindow() -> Element {
    let feed_handle = use_sentiment_feed();

    rsx! {
        // CSSスタイルをdocument headに注入
        document::Style {
            {get_embedded_css()}
        }

        div {
            class: "main-window",
            style: "
                min-height: 100vh;
                background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                padding: 20px;
                box-sizing: border-box;
                display: flex;
                flex-direction: column;
            ",

            // ヘッダー
            div {
                class: "app-header",
                style: "
                    text-align: center;
                    margin-bottom: 24px;
                    background: rgba(255, 255, 255, 0.1);
                    border-radius: 16px;
                    padding: 18px;
                    backdrop-filter: blur(10px);
                    border: 1px solid rgba(255, 255, 255, 0.2);
                ",

                h1 {
                    style: "
                        font-size: clamp(1.6rem, 4vw, 2.4rem);
                        color: white;
                        margin: 0 0 8px 0;
                        font-weight: 700;
                        text-shadow: 0 2px 4px rgba(0, 0, 0, 0.3);
                        letter-spacing: -0.02em;
                    ",
                    "📊 sentiview"
                }

                p {
                    style: "
                        color: rgba(255, 255, 255, 0.9);
                        margin: 0;
                        font-size: clamp(0.85rem, 2.5vw, 1rem);
                        font-weight: 400;
                    ",
                    "Live Average Sentiment by Category - NDJSON Feed Consumer"
                }
            }

            // ステータスパネル
            CompactStatusPanel { feed_handle: feed_handle.clone() }

            // チャート
            SentimentChart { snapshot: feed_handle.snapshot }

            // 操作ボタン
            FeedControls { feed_handle }
        }
    }
}

/// 監視の停止・再開コントロール
#[component]
fn FeedControls(feed_handle: FeedHandle) -> Element {
    let watching = feed_handle.is_watching();
    let stop_handle = feed_handle.clone();
    let start_handle = feed_handle.clone();

    rsx! {
        div {
            style: "
                display: flex;
                justify-content: center;
                gap: 12px;
                margin-top: 4px;
            ",

            if watching {
                button {
                    class: "btn btn-danger",
                    onclick: move |_| stop_handle.stop_watching(),
                    "⏹ 監視を停止"
                }
            } else {
                button {
                    class: "btn btn-primary",
                    onclick: move |_| start_handle.start_watching(launch_config()),
                    "▶ 監視を再開"
                }
            }
        }
    }
}
