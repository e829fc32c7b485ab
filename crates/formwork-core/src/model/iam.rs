//! IAMリソース定義

use crate::resolve::Keyed;
use serde::{Deserialize, Serialize};

/// ロール定義
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleConfig {
    /// ルックアップキー
    pub key: String,
    /// リソースのベース名（ステージサフィックスが付与される）
    pub name: String,
    /// 本番ステージでサフィックスを省略する
    #[serde(default)]
    pub skip_stage_suffix: bool,
    /// AssumeRoleを許可するサービスプリンシパル（例: lambda.amazonaws.com）
    pub service: String,
    /// アタッチするマネージドポリシーのARN
    #[serde(default)]
    pub managed_policies: Vec<String>,
    /// アタッチするポリシー（policies コレクションのキー）
    #[serde(default)]
    pub policies: Vec<String>,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for RoleConfig {
    fn key(&self) -> &str {
        &self.key
    }
}

/// ポリシー定義
///
/// ステートメントは検証せず、そのままポリシードキュメントへ渡されます。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// ルックアップキー
    pub key: String,
    /// リソースのベース名（ステージサフィックスが付与される）
    pub name: String,
    /// 本番ステージでサフィックスを省略する
    #[serde(default)]
    pub skip_stage_suffix: bool,
    /// ポリシーステートメント
    #[serde(default)]
    pub statements: Vec<serde_json::Value>,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for PolicyConfig {
    fn key(&self) -> &str {
        &self.key
    }
}
