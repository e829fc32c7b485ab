//! シークレットリソース定義

use crate::resolve::Keyed;
use serde::{Deserialize, Serialize};

/// シークレット定義
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    /// ルックアップキー
    pub key: String,
    /// リソースのベース名（ステージサフィックスが付与される）
    pub name: String,
    /// 本番ステージでサフィックスを省略する
    #[serde(default)]
    pub skip_stage_suffix: bool,
    /// 説明
    #[serde(default)]
    pub description: Option<String>,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for SecretConfig {
    fn key(&self) -> &str {
        &self.key
    }
}
