//! 設定モデル
//!
//! ブループリント（スタック定義）と各リソースカテゴリの設定エントリ。
//! エントリは `key` フィールドでルックアップされ、型付きフィールド以外は
//! `extra` マップを通じてそのままリソースプロパティへ渡されます。

pub mod api;
pub mod blueprint;
pub mod compute;
pub mod dns;
pub mod events;
pub mod iam;
pub mod messaging;
pub mod network;
pub mod secret;
pub mod storage;

pub use api::{ApiConfig, DomainConfig};
pub use blueprint::Blueprint;
pub use compute::FunctionConfig;
pub use dns::{CertificateConfig, RecordConfig};
pub use events::RuleConfig;
pub use iam::{PolicyConfig, RoleConfig};
pub use messaging::{QueueConfig, TopicConfig};
pub use network::{SubnetConfig, VpcConfig};
pub use secret::SecretConfig;
pub use storage::{BucketConfig, TableConfig};
