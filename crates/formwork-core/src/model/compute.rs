//! 関数リソース定義

use crate::resolve::Keyed;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_runtime() -> String {
    "nodejs20.x".to_string()
}

/// 関数定義
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionConfig {
    /// ルックアップキー
    pub key: String,
    /// リソースのベース名（ステージサフィックスが付与される）
    pub name: String,
    /// 本番ステージでサフィックスを省略する
    #[serde(default)]
    pub skip_stage_suffix: bool,
    /// ハンドラ（例: index.handler）
    pub handler: String,
    /// ランタイム
    #[serde(default = "default_runtime")]
    pub runtime: String,
    /// メモリサイズ (MB)
    #[serde(default)]
    pub memory: Option<u32>,
    /// タイムアウト (秒)
    #[serde(default)]
    pub timeout: Option<u32>,
    /// 実行ロール（roles コレクションのキー）
    #[serde(default)]
    pub role: Option<String>,
    /// 関数の環境変数
    #[serde(default)]
    pub environment: HashMap<String, String>,
    /// その他のプロパティ（検証せずリソースへ渡される）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Keyed for FunctionConfig {
    fn key(&self) -> &str {
        &self.key
    }
}
