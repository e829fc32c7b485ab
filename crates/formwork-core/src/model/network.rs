//! ネットワークリソース定義

use crate::resolve::Keyed;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// VPC定義
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpcConfig {
    /// ルックアップキー
    pub key: String,
    /// リソースのベース名（ステージサフィックスが付与される）
    pub name: String,
    /// 本番ステージでサフィックスを省略する
    #[serde(default)]
    pub skip_stage_suffix: bool,
    /// CIDRブロック（例: 10.0.0.0/16）
    pub cidr: String,
    /// DNS解決を有効にする
    #[serde(default = "default_true")]
    pub enable_dns: bool,
    /// サブネット定義
    #[serde(default)]
    pub subnets: Vec<SubnetConfig>,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for VpcConfig {
    fn key(&self) -> &str {
        &self.key
    }
}

/// サブネット定義
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubnetConfig {
    /// サブネット名（VPC内で一意）
    pub name: String,
    /// CIDRブロック（例: 10.0.1.0/24）
    pub cidr: String,
    /// パブリックサブネットかどうか
    #[serde(default)]
    pub public: bool,
    /// アベイラビリティゾーン
    #[serde(default)]
    pub availability_zone: Option<String>,
}
