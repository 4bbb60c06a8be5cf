//! メッセージ処理パイプライン実装
//!
//! フィードの1行を解析し、重複排除のうえ集計へ反映する。

use serde_json::Value;
use thiserror::Error;

use crate::analytics::SentimentTracker;

/// メッセージ処理エラー
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// JSONとして解析できない行
    #[error("Invalid JSON message: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// JSONではあるがオブジェクトではない値
    #[error("Expected a JSON object but got: {kind}")]
    NotAnObject { kind: &'static str },
}

/// 処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// 集計へ反映された
    Applied { category: String, sentiment: f64 },
    /// 既知タイムスタンプのため破棄された
    Duplicate,
}

/// メッセージプロセッサ設定
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MessageProcessorConfig {
    /// カテゴリ未指定時のフォールバック
    pub fallback_category: String,
    /// センチメント未指定時のフォールバック
    pub fallback_sentiment: f64,
}

impl Default for MessageProcessorConfig {
    fn default() -> Self {
        Self {
            fallback_category: "unknown".to_string(),
            fallback_sentiment: 0.0,
        }
    }
}

/// デフォルトメッセージプロセッサ実装
#[derive(Debug, Clone, Default)]
pub struct DefaultMessageProcessor {
    /// プロセッサ設定
    config: MessageProcessorConfig,
}

impl DefaultMessageProcessor {
    /// 新しいメッセージプロセッサを作成
    pub fn new() -> Self {
        Self {
            config: MessageProcessorConfig::default(),
        }
    }

    /// 設定付きでメッセージプロセッサを作成
    pub fn with_config(config: MessageProcessorConfig) -> Self {
        Self { config }
    }

    /// 現在の設定を取得
    pub fn get_config(&self) -> &MessageProcessorConfig {
        &self.config
    }

    /// 設定を更新
    pub fn update_config(&mut self, config: MessageProcessorConfig) {
        self.config = config;
    }

    /// 生のJSON行を1件処理して集計へ反映する
    ///
    /// 手順: 解析 → オブジェクト検査 → タイムスタンプ重複排除 →
    /// `category`（既定 `"unknown"`）と `sentiment`（既定 `0.0`）の抽出 →
    /// 集計更新。解析エラーと型不一致は `Err` として返り、呼び出し側で
    /// ログに落とすだけでループは継続する。集計は一切変更されない。
    pub fn process_line(
        &self,
        line: &str,
        tracker: &mut SentimentTracker,
    ) -> Result<ProcessOutcome, ProcessingError> {
        let value: Value = serde_json::from_str(line)?;

        let object = value.as_object().ok_or(ProcessingError::NotAnObject {
            kind: json_kind(&value),
        })?;

        // 欠落したtimestampはnullと同一視したうえで登録する
        let dedup_key = dedup_key(object.get("timestamp"));
        if !tracker.mark_seen(&dedup_key) {
            return Ok(ProcessOutcome::Duplicate);
        }

        let category = match object.get("category") {
            Some(Value::String(name)) => name.clone(),
            _ => self.config.fallback_category.clone(),
        };
        let sentiment = object
            .get("sentiment")
            .and_then(Value::as_f64)
            .unwrap_or(self.config.fallback_sentiment);

        tracker.record(&category, sentiment);

        Ok(ProcessOutcome::Applied {
            category,
            sentiment,
        })
    }
}

/// timestamp値から重複排除キーを導出する
///
/// 正規化JSON表現をキーとする。フィールド欠落と明示的なnullは
/// 同じキー（"null"）になる。
fn dedup_key(timestamp: Option<&Value>) -> String {
    timestamp.unwrap_or(&Value::Null).to_string()
}

/// エラーメッセージ用のJSON値種別名
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
