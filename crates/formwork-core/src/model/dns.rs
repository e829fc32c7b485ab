//! DNS・証明書リソース定義

use crate::resolve::Keyed;
use serde::{Deserialize, Serialize};

fn default_record_type() -> String {
    "CNAME".to_string()
}

fn default_ttl() -> u32 {
    300
}

/// 証明書定義
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificateConfig {
    /// ルックアップキー
    pub key: String,
    /// 証明書を発行するドメイン名
    pub domain_name: String,
    /// 追加のドメイン名 (SAN)
    #[serde(default)]
    pub subject_alternative_names: Vec<String>,
    /// DNS検証レコードを作成するゾーン
    #[serde(default)]
    pub hosted_zone: Option<String>,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for CertificateConfig {
    fn key(&self) -> &str {
        &self.key
    }
}

/// DNSレコード定義
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordConfig {
    /// ルックアップキー
    pub key: String,
    /// レコードのベース名（ステージサフィックスが付与される）
    pub name: String,
    /// 本番ステージでサフィックスを省略する
    #[serde(default)]
    pub skip_stage_suffix: bool,
    /// レコードを作成するゾーン（例: example.com）
    pub zone: String,
    /// レコードタイプ
    #[serde(default = "default_record_type")]
    pub record_type: String,
    /// レコード値
    pub value: String,
    /// TTL (秒)
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for RecordConfig {
    fn key(&self) -> &str {
        &self.key
    }
}
