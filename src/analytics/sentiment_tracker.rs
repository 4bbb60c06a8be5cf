//! カテゴリ別センチメント集計
//!
//! 集計状態の唯一の所有者。監視ループだけがこの構造体を変更し、
//! GUI側へは不変スナップショットのみを渡す。

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// カテゴリごとの累積集計
///
/// 最初のメッセージで生成され、以降は加算のみ。削除されることはない。
/// 平均値は保存せず、参照時に都度導出する。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct CategoryAggregate {
    /// センチメント累積値
    pub total_sentiment: f64,
    /// メッセージ数
    pub message_count: u64,
}

impl CategoryAggregate {
    /// 平均センチメント（メッセージ0件なら0.0）
    pub fn average(&self) -> f64 {
        if self.message_count == 0 {
            0.0
        } else {
            self.total_sentiment / self.message_count as f64
        }
    }
}

/// チャート描画用のカテゴリ1件分のスナップショット
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CategorySnapshot {
    /// カテゴリ名
    pub name: String,
    /// 平均センチメント
    pub average: f64,
    /// メッセージ数
    pub count: u64,
}

/// チャート描画用の不変スナップショット
///
/// カテゴリは初出順。チャートは毎回全体を再構築するため、
/// 描画側が保持する必要のある状態はこれだけである。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChartSnapshot {
    /// 初出順のカテゴリ別スナップショット
    pub categories: Vec<CategorySnapshot>,
    /// 処理済みメッセージ総数
    pub total_messages: u64,
}

impl ChartSnapshot {
    /// カテゴリ数
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

/// センチメント集計トラッカー
///
/// カテゴリ別の累積値・件数と、処理済みタイムスタンプ集合を保持する。
/// タイムスタンプ集合はプロセスの生存期間中、剪定されない。
#[derive(Debug, Clone, Default)]
pub struct SentimentTracker {
    /// カテゴリ名 → 累積集計
    categories: HashMap<String, CategoryAggregate>,
    /// カテゴリの初出順
    category_order: Vec<String>,
    /// 処理済みタイムスタンプ（正規化JSONキー）
    seen_timestamps: HashSet<String>,
    /// 処理済みメッセージ総数
    total_messages: u64,
}

impl SentimentTracker {
    /// 新しいトラッカーを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// タイムスタンプキーを既知として登録する
    ///
    /// 戻り値は「新規だったかどうか」。既知のキーなら`false`を返し、
    /// 呼び出し側はそのメッセージを破棄する。
    pub fn mark_seen(&mut self, key: &str) -> bool {
        self.seen_timestamps.insert(key.to_string())
    }

    /// タイムスタンプキーが既知か
    pub fn is_seen(&self, key: &str) -> bool {
        self.seen_timestamps.contains(key)
    }

    /// メッセージ1件を集計へ反映する
    pub fn record(&mut self, category: &str, sentiment: f64) {
        if !self.categories.contains_key(category) {
            self.category_order.push(category.to_string());
        }
        let aggregate = self.categories.entry(category.to_string()).or_default();
        aggregate.total_sentiment += sentiment;
        aggregate.message_count += 1;
        self.total_messages += 1;
    }

    /// 指定カテゴリの平均センチメント
    pub fn average_for(&self, category: &str) -> Option<f64> {
        self.categories.get(category).map(CategoryAggregate::average)
    }

    /// 指定カテゴリの累積集計
    pub fn aggregate_for(&self, category: &str) -> Option<&CategoryAggregate> {
        self.categories.get(category)
    }

    /// これまでに観測した異なるカテゴリの数
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// 処理済みメッセージ総数
    pub fn total_messages(&self) -> u64 {
        self.total_messages
    }

    /// 処理済みタイムスタンプ数
    pub fn seen_count(&self) -> usize {
        self.seen_timestamps.len()
    }

    /// チャート描画用スナップショットを導出する（初出順）
    pub fn snapshot(&self) -> ChartSnapshot {
        let categories = self
            .category_order
            .iter()
            .map(|name| {
                let aggregate = self.categories[name];
                CategorySnapshot {
                    name: name.clone(),
                    average: aggregate.average(),
                    count: aggregate.message_count,
                }
            })
            .collect();

        ChartSnapshot {
            categories,
            total_messages: self.total_messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_is_arithmetic_mean() {
        let mut tracker = SentimentTracker::new();
        tracker.record("joy", 0.8);
        tracker.record("joy", 0.4);

        let average = tracker.average_for("joy").unwrap();
        assert!((average - 0.6).abs() < f64::EPSILON);
        assert_eq!(tracker.aggregate_for("joy").unwrap().message_count, 2);
    }

    #[test]
    fn test_mark_seen_reports_duplicates() {
        let mut tracker = SentimentTracker::new();
        assert!(tracker.mark_seen("1"));
        assert!(!tracker.mark_seen("1"));
        assert!(tracker.is_seen("1"));
        assert!(!tracker.is_seen("2"));
        assert_eq!(tracker.seen_count(), 1);
    }

    #[test]
    fn test_snapshot_preserves_first_seen_order() {
        let mut tracker = SentimentTracker::new();
        tracker.record("joy", 0.5);
        tracker.record("anger", -0.5);
        tracker.record("joy", 0.7);
        tracker.record("calm", 0.1);

        let snapshot = tracker.snapshot();
        let names: Vec<&str> = snapshot.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["joy", "anger", "calm"]);
        assert_eq!(snapshot.total_messages, 4);
        assert_eq!(snapshot.category_count(), 3);
    }

    #[test]
    fn test_zero_count_aggregate_average_is_zero() {
        let aggregate = CategoryAggregate::default();
        assert_eq!(aggregate.average(), 0.0);
    }

    #[test]
    fn test_snapshot_of_empty_tracker() {
        let tracker = SentimentTracker::new();
        let snapshot = tracker.snapshot();
        assert!(snapshot.categories.is_empty());
        assert_eq!(snapshot.total_messages, 0);
    }
}
