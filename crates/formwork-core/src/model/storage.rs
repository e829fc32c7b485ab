//! ストレージリソース定義

use crate::resolve::Keyed;
use serde::{Deserialize, Serialize};

/// バケット定義
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BucketConfig {
    /// ルックアップキー
    pub key: String,
    /// リソースのベース名（ステージサフィックスが付与される）
    pub name: String,
    /// 本番ステージでサフィックスを省略する
    #[serde(default)]
    pub skip_stage_suffix: bool,
    /// バージョニングを有効にする
    #[serde(default)]
    pub versioned: bool,
    /// パブリック読み取りを許可する
    #[serde(default)]
    pub public_read: bool,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for BucketConfig {
    fn key(&self) -> &str {
        &self.key
    }
}

/// テーブル定義
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableConfig {
    /// ルックアップキー
    pub key: String,
    /// リソースのベース名（ステージサフィックスが付与される）
    pub name: String,
    /// 本番ステージでサフィックスを省略する
    #[serde(default)]
    pub skip_stage_suffix: bool,
    /// パーティションキーの属性名
    pub hash_key: String,
    /// ソートキーの属性名
    #[serde(default)]
    pub range_key: Option<String>,
    /// ストリームを有効にする
    #[serde(default)]
    pub stream: bool,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for TableConfig {
    fn key(&self) -> &str {
        &self.key
    }
}
