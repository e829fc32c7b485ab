//! リソース命名
//!
//! ステージサフィックスとエクスポート名の規則を提供します。
//! コンテキストは合成の実行ごとに1つ作られ、以後変更されません。
//! 暗黙のグローバル状態には依存せず、各マネージャーへ明示的に渡します。

use crate::error::{BlueprintError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// 本番ステージ名
pub const PRODUCTION_STAGE: &str = "prd";

/// リソース名・ステージ名として許可するパターン
///
/// 小文字英数字とハイフンのみ。先頭は英字。
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("valid regex"));

/// 名前の最大長（S3バケット名の制約に合わせる）
const MAX_NAME_LEN: usize = 63;

/// 命名コンテキスト
///
/// デプロイ先ステージとスタック名を保持し、リソース名への
/// ステージサフィックス付与とエクスポート名の組み立てを行います。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingContext {
    stack_name: String,
    stage: String,
}

impl NamingContext {
    /// 新しい命名コンテキストを作成
    ///
    /// スタック名とステージ名の両方を検証します。
    pub fn new(stack_name: impl Into<String>, stage: impl Into<String>) -> Result<Self> {
        let stack_name = stack_name.into();
        let stage = stage.into();
        validate_name(&stack_name)?;
        validate_name(&stage)?;
        Ok(Self { stack_name, stage })
    }

    /// スタック名
    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    /// ステージ名
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// 本番ステージかどうか
    pub fn is_production(&self) -> bool {
        self.stage == PRODUCTION_STAGE
    }

    /// ステージサフィックス付きのリソース名を返す
    ///
    /// 例: `media` + ステージ `dev` → `media-dev`
    pub fn resource_name(&self, base: &str) -> String {
        format!("{}-{}", base, self.stage)
    }

    /// サフィックス省略フラグを考慮したリソース名を返す
    ///
    /// フラグが立っていても、サフィックスが省略されるのは本番ステージのみ。
    /// 非本番ステージでは常にサフィックスが付きます。
    pub fn resource_name_with(&self, base: &str, skip_stage_suffix: bool) -> String {
        if skip_stage_suffix && self.is_production() {
            base.to_string()
        } else {
            self.resource_name(base)
        }
    }

    /// スタック名でスコープされたエクスポート名を返す
    ///
    /// 例: スタック `media-stack` + 論理ID `bucketArn` → `media-stack-bucketArn`
    pub fn export_name(&self, logical_id: &str) -> String {
        format!("{}-{}", self.stack_name, logical_id)
    }
}

/// 名前を検証
///
/// 長さとパターンをチェックし、違反時は理由付きのエラーを返します。
pub fn validate_name(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(BlueprintError::InvalidName {
            value: value.to_string(),
            reason: "1文字以上である必要があります".to_string(),
        });
    }
    if value.len() > MAX_NAME_LEN {
        return Err(BlueprintError::InvalidName {
            value: value.to_string(),
            reason: format!("{}文字以下である必要があります", MAX_NAME_LEN),
        });
    }
    if !NAME_PATTERN.is_match(value) {
        return Err(BlueprintError::InvalidName {
            value: value.to_string(),
            reason: "小文字英数字とハイフンのみ使用できます（先頭は英字）".to_string(),
        });
    }
    Ok(())
}
