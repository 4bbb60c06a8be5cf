//! センチメントバーチャートコンポーネント
//!
//! スナップショットを受け取るたびにチャート全体を作り直す。描画される
//! カテゴリ集合は「これまでに観測した異なるカテゴリ」と常に一致する。

use dioxus::prelude::*;

use crate::analytics::{CategorySnapshot, ChartSnapshot};
use crate::gui::styles::theme::viridis_color;

/// プロット領域の高さ（px）
const PLOT_HEIGHT: u32 = 280;

/// バー1本分の描画データ
#[derive(Debug, Clone, PartialEq)]
struct BarLayout {
    index: usize,
    name: String,
    average: f64,
    color: String,
    bottom_pct: f64,
    height_pct: f64,
}

/// スナップショットからバー配置を導出する
///
/// 正負の平均を同じプロットへ収めるため、ゼロ線を挟んだレンジを計算
/// してから各バーの下端と高さを百分率で決める。レンジには数値ラベル用の
/// 余白を少し足す。
fn layout_bars(snapshot: &ChartSnapshot) -> (Vec<BarLayout>, f64) {
    let y_max = snapshot
        .categories
        .iter()
        .map(|c| c.average)
        .fold(0.0_f64, f64::max);
    let y_min = snapshot
        .categories
        .iter()
        .map(|c| c.average)
        .fold(0.0_f64, f64::min);

    let range = (y_max - y_min).max(1e-9);
    let scale = 100.0 / (range * 1.12);
    let zero_pct = (0.0 - y_min) * scale;

    let bars = snapshot
        .categories
        .iter()
        .enumerate()
        .map(|(index, category)| BarLayout {
            index,
            name: category.name.clone(),
            average: category.average,
            color: viridis_color(category.average),
            bottom_pct: (category.average.min(0.0) - y_min) * scale,
            height_pct: category.average.abs() * scale,
        })
        .collect();

    (bars, zero_pct)
}

/// センチメントバーチャート
#[component]
pub fn SentimentChart(snapshot: Signal<ChartSnapshot>) -> Element {
    let hovered = use_signal(|| None::<usize>);

    let current = snapshot.read().clone();
    let (bars, zero_pct) = layout_bars(&current);
    let tooltip: Option<CategorySnapshot> =
        hovered().and_then(|index| current.categories.get(index).cloned());

    rsx! {
        div {
            class: "chart-panel",
            style: "
                position: relative;
                background: white;
                padding: 25px;
                border-radius: 12px;
                margin-bottom: 25px;
                box-shadow: 0 4px 12px rgba(0,0,0,0.1);
                border: 1px solid #e1e8ed;
                flex: 1;
            ",

            h3 {
                style: "
                    color: #2c3e50;
                    margin: 0 0 20px 0;
                    text-align: center;
                    font-size: 1.3rem;
                    font-weight: 600;
                ",
                "Real-Time Average Sentiment by Category"
            }

            if current.categories.is_empty() {
                p {
                    class: "chart-empty",
                    style: "color: #7f8c8d; text-align: center; padding: 60px 20px;",
                    "まだメッセージがありません"
                }
            } else {
                div {
                    style: "display: flex; gap: 14px;",

                    // y軸ラベル
                    div {
                        style: "
                            writing-mode: vertical-rl;
                            transform: rotate(180deg);
                            text-align: center;
                            color: #475569;
                            font-size: 0.9rem;
                            align-self: stretch;
                        ",
                        "Average Sentiment"
                    }

                    div {
                        style: "flex: 1;",

                        // プロット領域
                        div {
                            class: "chart-plot",
                            style: "
                                position: relative;
                                height: {PLOT_HEIGHT}px;
                                display: flex;
                                align-items: stretch;
                                gap: 12px;
                                padding: 0 10px;
                                border-left: 2px solid #cbd5e1;
                                border-bottom: 2px solid #cbd5e1;
                            ",

                            // ゼロ線
                            div {
                                style: "
                                    position: absolute;
                                    left: 0;
                                    right: 0;
                                    bottom: {zero_pct}%;
                                    height: 1px;
                                    background: #94a3b8;
                                    opacity: 0.6;
                                ",
                            }

                            for bar in bars.into_iter() {
                                SentimentBar {
                                    index: bar.index,
                                    name: bar.name,
                                    average: bar.average,
                                    color: bar.color,
                                    bottom_pct: bar.bottom_pct,
                                    height_pct: bar.height_pct,
                                    hovered,
                                }
                            }
                        }

                        // x軸ラベル（回転カテゴリラベルの分だけ余白を取る）
                        div {
                            style: "
                                text-align: center;
                                color: #475569;
                                font-size: 0.9rem;
                                margin-top: 56px;
                            ",
                            "Categories"
                        }
                    }
                }

                // ホバーツールチップ
                if let Some(info) = tooltip {
                    div {
                        style: "
                            position: absolute;
                            top: 18px;
                            right: 18px;
                            background: rgba(15, 23, 42, 0.88);
                            color: white;
                            padding: 8px 12px;
                            border-radius: 8px;
                            font-size: 13px;
                            pointer-events: none;
                        ",
                        div {
                            style: "font-weight: 600;",
                            "{info.name}"
                        }
                        div {
                            "Sentiment: {info.average:.2}"
                        }
                        div {
                            style: "opacity: 0.75;",
                            "{info.count} messages"
                        }
                    }
                }
            }
        }
    }
}

/// バー1本（グラデーション色・アウトライン・数値ラベル・回転ラベル付き）
#[component]
fn SentimentBar(
    index: usize,
    name: String,
    average: f64,
    color: String,
    bottom_pct: f64,
    height_pct: f64,
    hovered: Signal<Option<usize>>,
) -> Element {
    let mut hovered = hovered;
    let label_bottom_pct = bottom_pct + height_pct;
    let tooltip = format!("{name}\nSentiment: {average:.2}");

    rsx! {
        div {
            class: "chart-bar-column",
            style: "
                flex: 1;
                position: relative;
                min-width: 48px;
                height: 100%;
            ",
            title: "{tooltip}",
            onmouseenter: move |_| hovered.set(Some(index)),
            onmouseleave: move |_| hovered.set(None),

            // 数値ラベル（バーの直上）
            span {
                class: "bar-value-label",
                style: "
                    position: absolute;
                    bottom: calc({label_bottom_pct}% + 4px);
                    left: 50%;
                    transform: translateX(-50%);
                    font-size: 12px;
                    color: #334155;
                ",
                "{average:.2}"
            }

            // バー本体（viridis色＋グレーのアウトライン）
            div {
                class: "chart-bar",
                style: "
                    position: absolute;
                    bottom: {bottom_pct}%;
                    height: {height_pct}%;
                    left: 15%;
                    width: 70%;
                    background: {color};
                    border: 2px solid #9ca3af;
                    border-radius: 3px 3px 0 0;
                    box-shadow: 0 0 0 1px rgba(107, 114, 128, 0.35);
                ",
            }

            // 回転カテゴリラベル（プロット領域の下）
            span {
                style: "
                    position: absolute;
                    top: calc(100% + 8px);
                    right: 50%;
                    transform: rotate(-45deg);
                    transform-origin: top right;
                    font-size: 12px;
                    color: #475569;
                    white-space: nowrap;
                ",
                "{name}"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::SentimentTracker;

    fn snapshot_of(entries: &[(&str, f64)]) -> ChartSnapshot {
        let mut tracker = SentimentTracker::new();
        for (category, sentiment) in entries {
            tracker.record(category, *sentiment);
        }
        tracker.snapshot()
    }

    #[test]
    fn test_layout_positive_only() {
        let snapshot = snapshot_of(&[("joy", 0.8), ("calm", 0.4)]);
        let (bars, zero_pct) = layout_bars(&snapshot);

        assert_eq!(bars.len(), 2);
        // 全て正なのでゼロ線はプロット最下端
        assert!(zero_pct.abs() < 1e-9);
        // 正のバーはゼロ線から立ち上がる
        assert!(bars[0].bottom_pct.abs() < 1e-9);
        assert!(bars[0].height_pct > bars[1].height_pct);
    }

    #[test]
    fn test_layout_mixed_signs() {
        let snapshot = snapshot_of(&[("joy", 0.5), ("anger", -0.5)]);
        let (bars, zero_pct) = layout_bars(&snapshot);

        // ゼロ線はプロット中央付近
        assert!(zero_pct > 30.0 && zero_pct < 60.0);
        // 負のバーはゼロ線の下で終わる
        let anger = &bars[1];
        assert!((anger.bottom_pct + anger.height_pct - zero_pct).abs() < 1e-6);
        // 正のバーはゼロ線から始まる
        assert!((bars[0].bottom_pct - zero_pct).abs() < 1e-6);
    }

    #[test]
    fn test_layout_preserves_first_seen_order_and_color() {
        let snapshot = snapshot_of(&[("joy", 1.0), ("anger", 0.0)]);
        let (bars, _) = layout_bars(&snapshot);

        assert_eq!(bars[0].name, "joy");
        assert_eq!(bars[1].name, "anger");
        assert_eq!(bars[0].color, "#fde725");
        assert_eq!(bars[1].color, "#440154");
    }

    #[test]
    fn test_layout_all_zero_averages() {
        let snapshot = snapshot_of(&[("joy", 0.0)]);
        let (bars, zero_pct) = layout_bars(&snapshot);

        // 高さゼロのバーでも発散しない
        assert!(bars[0].height_pct.abs() < 1e-3);
        assert!(zero_pct.abs() < 1e-3);
    }
}
