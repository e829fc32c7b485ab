//! ブループリント定義
//!
//! ブループリントはスタック1つ分のリソース宣言をまとめたものです。
//! 各コレクションは宣言順を保持し、同一キーの重複があった場合は
//! 先に現れたエントリが優先されます（first match wins）。

use super::api::{ApiConfig, DomainConfig};
use super::compute::FunctionConfig;
use super::dns::{CertificateConfig, RecordConfig};
use super::events::RuleConfig;
use super::iam::{PolicyConfig, RoleConfig};
use super::messaging::{QueueConfig, TopicConfig};
use super::network::VpcConfig;
use super::secret::SecretConfig;
use super::storage::{BucketConfig, TableConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// ブループリント - スタックの設計図
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Blueprint {
    /// スタック名
    #[serde(default)]
    pub name: String,
    /// 説明
    #[serde(default)]
    pub description: Option<String>,
    /// デフォルトのステージ名
    #[serde(default)]
    pub stage: Option<String>,
    /// テンプレート展開で使用できる変数
    #[serde(default)]
    pub variables: HashMap<String, String>,

    /// バケット定義
    #[serde(default)]
    pub buckets: Option<Vec<BucketConfig>>,
    /// テーブル定義
    #[serde(default)]
    pub tables: Option<Vec<TableConfig>>,
    /// 証明書定義
    #[serde(default)]
    pub certificates: Option<Vec<CertificateConfig>>,
    /// 関数定義
    #[serde(default)]
    pub functions: Option<Vec<FunctionConfig>>,
    /// API定義
    #[serde(default)]
    pub apis: Option<Vec<ApiConfig>>,
    /// カスタムドメイン定義
    #[serde(default)]
    pub domains: Option<Vec<DomainConfig>>,
    /// VPC定義
    #[serde(default)]
    pub vpcs: Option<Vec<VpcConfig>>,
    /// ロール定義
    #[serde(default)]
    pub roles: Option<Vec<RoleConfig>>,
    /// ポリシー定義
    #[serde(default)]
    pub policies: Option<Vec<PolicyConfig>>,
    /// イベントルール定義
    #[serde(default)]
    pub rules: Option<Vec<RuleConfig>>,
    /// キュー定義
    #[serde(default)]
    pub queues: Option<Vec<QueueConfig>>,
    /// トピック定義
    #[serde(default)]
    pub topics: Option<Vec<TopicConfig>>,
    /// DNSレコード定義
    #[serde(default)]
    pub records: Option<Vec<RecordConfig>>,
    /// シークレット定義
    #[serde(default)]
    pub secrets: Option<Vec<SecretConfig>>,
}

/// フラグメントのコレクションをベースの後ろに連結
fn append<T>(base: &mut Option<Vec<T>>, other: Option<Vec<T>>) {
    if let Some(mut entries) = other {
        match base {
            Some(existing) => existing.append(&mut entries),
            None => *base = Some(entries),
        }
    }
}

/// オーバーライドのコレクションをベースの前に挿入
///
/// 解決時は最初の一致が優先されるため、前に置くことで
/// オーバーライド側のエントリが同一キーのベース定義を隠します。
fn prepend<T>(base: &mut Option<Vec<T>>, other: Option<Vec<T>>) {
    if let Some(mut entries) = other {
        match base {
            Some(existing) => {
                std::mem::swap(existing, &mut entries);
                existing.append(&mut entries);
            }
            None => *base = Some(entries),
        }
    }
}

impl Blueprint {
    /// フラグメントを取り込む
    ///
    /// コレクションは発見順に後ろへ連結され、スカラー値は
    /// 後から読まれたファイルが優先されます。
    pub fn absorb(&mut self, other: Blueprint) {
        self.absorb_scalars(other.name, other.description, other.stage, other.variables);

        append(&mut self.buckets, other.buckets);
        append(&mut self.tables, other.tables);
        append(&mut self.certificates, other.certificates);
        append(&mut self.functions, other.functions);
        append(&mut self.apis, other.apis);
        append(&mut self.domains, other.domains);
        append(&mut self.vpcs, other.vpcs);
        append(&mut self.roles, other.roles);
        append(&mut self.policies, other.policies);
        append(&mut self.rules, other.rules);
        append(&mut self.queues, other.queues);
        append(&mut self.topics, other.topics);
        append(&mut self.records, other.records);
        append(&mut self.secrets, other.secrets);
    }

    /// ステージ・ローカルオーバーライドを取り込む
    ///
    /// オーバーライドのエントリはコレクションの先頭に置かれ、
    /// 同一キーのベース定義より優先されます。
    pub fn absorb_override(&mut self, other: Blueprint) {
        self.absorb_scalars(other.name, other.description, other.stage, other.variables);

        prepend(&mut self.buckets, other.buckets);
        prepend(&mut self.tables, other.tables);
        prepend(&mut self.certificates, other.certificates);
        prepend(&mut self.functions, other.functions);
        prepend(&mut self.apis, other.apis);
        prepend(&mut self.domains, other.domains);
        prepend(&mut self.vpcs, other.vpcs);
        prepend(&mut self.roles, other.roles);
        prepend(&mut self.policies, other.policies);
        prepend(&mut self.rules, other.rules);
        prepend(&mut self.queues, other.queues);
        prepend(&mut self.topics, other.topics);
        prepend(&mut self.records, other.records);
        prepend(&mut self.secrets, other.secrets);
    }

    fn absorb_scalars(
        &mut self,
        name: String,
        description: Option<String>,
        stage: Option<String>,
        variables: HashMap<String, String>,
    ) {
        if !name.is_empty() {
            self.name = name;
        }
        if description.is_some() {
            self.description = description;
        }
        if stage.is_some() {
            self.stage = stage;
        }
        self.variables.extend(variables);
    }

    /// コレクションごとのエントリ数のサマリー
    ///
    /// 空（未定義または0件）のコレクションは含まれません。
    pub fn summary(&self) -> Vec<(&'static str, usize)> {
        fn count<T>(collection: &Option<Vec<T>>) -> usize {
            collection.as_ref().map(|c| c.len()).unwrap_or(0)
        }

        let all = [
            ("buckets", count(&self.buckets)),
            ("tables", count(&self.tables)),
            ("certificates", count(&self.certificates)),
            ("functions", count(&self.functions)),
            ("apis", count(&self.apis)),
            ("domains", count(&self.domains)),
            ("vpcs", count(&self.vpcs)),
            ("roles", count(&self.roles)),
            ("policies", count(&self.policies)),
            ("rules", count(&self.rules)),
            ("queues", count(&self.queues)),
            ("topics", count(&self.topics)),
            ("records", count(&self.records)),
            ("secrets", count(&self.secrets)),
        ];

        all.into_iter().filter(|(_, n)| *n > 0).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;

    fn bucket(key: &str, name: &str) -> BucketConfig {
        BucketConfig {
            key: key.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_absorb_appends_collections() {
        let mut base = Blueprint {
            name: "media".to_string(),
            buckets: Some(vec![bucket("a", "bucket-a")]),
            ..Default::default()
        };

        let fragment = Blueprint {
            buckets: Some(vec![bucket("b", "bucket-b")]),
            ..Default::default()
        };

        base.absorb(fragment);

        let buckets = base.buckets.as_deref().unwrap();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "a");
        assert_eq!(buckets[1].key, "b");
        // フラグメントはベースの名前を消さない
        assert_eq!(base.name, "media");
    }

    #[test]
    fn test_absorb_override_shadows_base_entries() {
        let mut base = Blueprint {
            name: "media".to_string(),
            buckets: Some(vec![bucket("a", "bucket-base")]),
            ..Default::default()
        };

        let override_file = Blueprint {
            buckets: Some(vec![bucket("a", "bucket-override")]),
            ..Default::default()
        };

        base.absorb_override(override_file);

        // オーバーライドのエントリが先頭に置かれ、解決で優先される
        let found = resolve(base.buckets.as_deref(), "buckets", "a").unwrap();
        assert_eq!(found.name, "bucket-override");
        assert_eq!(base.buckets.as_deref().unwrap().len(), 2);
    }

    #[test]
    fn test_absorb_scalars_later_wins() {
        let mut base = Blueprint {
            name: "media".to_string(),
            stage: Some("dev".to_string()),
            ..Default::default()
        };

        let fragment = Blueprint {
            stage: Some("stg".to_string()),
            ..Default::default()
        };

        base.absorb(fragment);
        assert_eq!(base.stage.as_deref(), Some("stg"));
    }

    #[test]
    fn test_variables_extend() {
        let mut base = Blueprint::default();
        base.variables
            .insert("registry".to_string(), "ghcr.io/base".to_string());

        let mut fragment = Blueprint::default();
        fragment
            .variables
            .insert("registry".to_string(), "ghcr.io/override".to_string());
        fragment
            .variables
            .insert("version".to_string(), "2.0.0".to_string());

        base.absorb(fragment);
        assert_eq!(base.variables["registry"], "ghcr.io/override");
        assert_eq!(base.variables["version"], "2.0.0");
    }

    #[test]
    fn test_summary_skips_empty_collections() {
        let blueprint = Blueprint {
            buckets: Some(vec![bucket("a", "bucket-a")]),
            tables: Some(Vec::new()),
            ..Default::default()
        };

        let summary = blueprint.summary();
        assert_eq!(summary, vec![("buckets", 1)]);
    }
}
