//! 設定値のマージ
//!
//! デフォルト値とエントリのオーバーライドを結合します。優先順位は明示的:
//!
//! - オブジェクト同士は再帰的にマージ（両方のキーが保持される）
//! - それ以外（スカラー、配列、null）はオーバーレイ側が常に勝つ
//! - 片方にしかないキーはそのまま残る

use serde_json::Value;

/// `base` に `overlay` を重ねた値を返す
pub fn merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}
