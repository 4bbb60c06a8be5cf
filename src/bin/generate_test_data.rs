use rand::Rng;
use serde_json::json;
use std::fs::File;
use std::io::Write;

fn main() -> anyhow::Result<()> {
    // 仕様のエッジケースを網羅した決定的なフィクスチャ行
    let fixture_records = vec![
        json!({"timestamp": 1640995200, "category": "joy", "sentiment": 0.8}),
        json!({"timestamp": 1640995201, "category": "joy", "sentiment": 0.4}),
        json!({"timestamp": 1640995202, "category": "anger", "sentiment": -0.6}),
        json!({"timestamp": 1640995203, "sentiment": 0.5}),
        json!({"timestamp": 1640995204, "category": "calm"}),
        json!({"category": "calm", "sentiment": 0.1}),
        json!({"timestamp": "2022-01-01T00:00:05Z", "category": "surprise", "sentiment": 0.9}),
    ];

    // tests/data/ディレクトリを作成
    std::fs::create_dir_all("tests/data")?;

    // ndjsonフィクスチャに書き込み
    let mut file = File::create("tests/data/sentiment_feed.ndjson")?;
    for record in &fixture_records {
        let json_line = serde_json::to_string(record)?;
        writeln!(file, "{}", json_line)?;
    }

    // デモ用のライブフィードも生成（プロデューサの代わり）
    std::fs::create_dir_all("data")?;
    let mut feed = File::create("data/project_live.ndjson")?;

    let categories = ["joy", "anger", "calm", "surprise", "sadness"];
    let mut rng = rand::thread_rng();
    let base_timestamp = 1640995300u64;

    for i in 0..20 {
        let record = json!({
            "timestamp": base_timestamp + i,
            "category": categories[rng.gen_range(0..categories.len())],
            "sentiment": (rng.gen_range(-100i32..=100) as f64) / 100.0,
        });
        writeln!(feed, "{}", serde_json::to_string(&record)?)?;
    }

    println!("✅ テストデータファイルを生成しました: tests/data/sentiment_feed.ndjson, data/project_live.ndjson");
    Ok(())
}
