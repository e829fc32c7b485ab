//! APIリソース定義

use crate::resolve::Keyed;
use serde::{Deserialize, Serialize};

/// HTTP API定義
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
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
    /// CORSで許可するオリジン
    #[serde(default)]
    pub cors_allow_origins: Vec<String>,
    /// デフォルト統合先の関数（functions コレクションのキー）
    #[serde(default)]
    pub default_function: Option<String>,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for ApiConfig {
    fn key(&self) -> &str {
        &self.key
    }
}

/// カスタムドメイン定義
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainConfig {
    /// ルックアップキー
    pub key: String,
    /// ドメイン名（例: api.example.com）
    pub domain_name: String,
    /// 使用する証明書（certificates コレクションのキー）
    pub certificate: String,
    /// 紐付けるAPI（apis コレクションのキー）
    pub api: String,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for DomainConfig {
    fn key(&self) -> &str {
        &self.key
    }
}
