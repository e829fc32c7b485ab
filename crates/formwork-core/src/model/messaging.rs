//! メッセージングリソース定義

use crate::resolve::Keyed;
use serde::{Deserialize, Serialize};

fn default_max_receive_count() -> u32 {
    3
}

/// キュー定義
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// ルックアップキー
    pub key: String,
    /// リソースのベース名（ステージサフィックスが付与される）
    pub name: String,
    /// 本番ステージでサフィックスを省略する
    #[serde(default)]
    pub skip_stage_suffix: bool,
    /// FIFOキューにする
    #[serde(default)]
    pub fifo: bool,
    /// 可視性タイムアウト (秒)
    #[serde(default)]
    pub visibility_timeout: Option<u32>,
    /// デッドレターキューを作成する
    #[serde(default)]
    pub dead_letter: bool,
    /// DLQへ移動するまでの受信回数
    #[serde(default = "default_max_receive_count")]
    pub max_receive_count: u32,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for QueueConfig {
    fn key(&self) -> &str {
        &self.key
    }
}

/// トピック定義
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicConfig {
    /// ルックアップキー
    pub key: String,
    /// リソースのベース名（ステージサフィックスが付与される）
    pub name: String,
    /// 本番ステージでサフィックスを省略する
    #[serde(default)]
    pub skip_stage_suffix: bool,
    /// FIFOトピックにする
    #[serde(default)]
    pub fifo: bool,
    /// 表示名
    #[serde(default)]
    pub display_name: Option<String>,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for TopicConfig {
    fn key(&self) -> &str {
        &self.key
    }
}
