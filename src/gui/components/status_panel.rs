//! ステータスパネルコンポーネント

use dioxus::prelude::*;

use crate::consumer::ServiceState;
use crate::gui::hooks::{launch_config, FeedHandle};
use crate::gui::utils::format_uptime;

/// 配信用コンパクトステータスパネル
///
/// サービス状態・処理件数・カテゴリ数・監視対象ファイルを1行で示す。
#[component]
pub fn CompactStatusPanel(feed_handle: FeedHandle) -> Element {
    let snapshot = feed_handle.snapshot.read().clone();
    let state = feed_handle.state.read().clone();

    // 接続状態のビジュアル
    let (status_icon, status_color, status_text) = match &state {
        ServiceState::Watching => ("🟢", "#22c55e", "監視中"),
        ServiceState::Idle => ("⚪", "#6b7280", "停止中"),
        ServiceState::Error(_) => ("🔴", "#ef4444", "エラー"),
    };

    let uptime = match *feed_handle.started_at.read() {
        Some(started) => {
            let seconds = (chrono::Utc::now() - started).num_seconds().max(0) as u64;
            format_uptime(seconds)
        }
        None => "—".to_string(),
    };

    let feed_path = launch_config().feed_path.display().to_string();
    let error_detail = match &state {
        ServiceState::Error(message) => Some(message.clone()),
        _ => None,
    };

    rsx! {
        div {
            class: "status-panel",
            style: "
                background: white;
                border-radius: 12px;
                padding: 12px 18px;
                margin-bottom: 20px;
                box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);
                border: 1px solid #e1e8ed;
            ",

            div {
                style: "
                    display: flex;
                    align-items: center;
                    gap: 24px;
                    flex-wrap: wrap;
                ",

                // 状態表示
                div {
                    style: "display: flex; align-items: center; gap: 8px;",
                    span { "{status_icon}" }
                    span {
                        style: "color: {status_color}; font-weight: 600;",
                        "{status_text}"
                    }
                }

                StatItem {
                    label: "メッセージ",
                    value: snapshot.total_messages.to_string(),
                }
                StatItem {
                    label: "カテゴリ",
                    value: snapshot.category_count().to_string(),
                }
                StatItem {
                    label: "稼働時間",
                    value: uptime,
                }

                // 監視対象ファイル
                div {
                    style: "
                        margin-left: auto;
                        color: #7f8c8d;
                        font-size: 0.85rem;
                        font-family: monospace;
                    ",
                    "{feed_path}"
                }
            }

            if let Some(message) = error_detail {
                div {
                    style: "
                        margin-top: 10px;
                        padding: 8px 12px;
                        background: #fef2f2;
                        border: 1px solid #fecaca;
                        border-radius: 8px;
                        color: #b91c1c;
                        font-size: 0.85rem;
                    ",
                    "❌ {message}"
                }
            }
        }
    }
}

/// ステータス項目
#[component]
fn StatItem(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "stat-item",
            style: "display: flex; align-items: baseline; gap: 6px;",
            span {
                class: "stat-value",
                style: "font-size: 1.1rem; font-weight: 700; color: #2c3e50;",
                "{value}"
            }
            span {
                class: "stat-label",
                style: "font-size: 0.8rem; color: #7f8c8d;",
                "{label}"
            }
        }
    }
}
