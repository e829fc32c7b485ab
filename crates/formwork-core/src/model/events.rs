//! イベントルール定義

use crate::resolve::Keyed;
use serde::{Deserialize, Serialize};

/// ルール定義
///
/// `schedule` と `pattern` はどちらか一方を指定します。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// ルックアップキー
    pub key: String,
    /// リソースのベース名（ステージサフィックスが付与される）
    pub name: String,
    /// 本番ステージでサフィックスを省略する
    #[serde(default)]
    pub skip_stage_suffix: bool,
    /// スケジュール式（例: rate(5 minutes), cron(0 12 * * ? *)）
    #[serde(default)]
    pub schedule: Option<String>,
    /// イベントパターン（検証せずそのまま渡される）
    #[serde(default)]
    pub pattern: Option<serde_json::Value>,
    /// ターゲットの関数（functions コレクションのキー）
    #[serde(default)]
    pub targets: Vec<String>,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for RuleConfig {
    fn key(&self) -> &str {
        &self.key
    }
}
