use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlueprintError {
    #[error("JSONパースエラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAMLパースエラー: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO エラー: {path}\n理由: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("無効な設定: {0}")]
    InvalidConfig(String),

    #[error("テンプレート展開エラー: {file}\n理由: {message}")]
    TemplateError { file: PathBuf, message: String },

    #[error("テンプレート展開エラー: {0}")]
    TemplateRenderError(String),

    #[error("ファイル発見エラー: {path}\n理由: {message}")]
    DiscoveryError { path: PathBuf, message: String },

    #[error(
        "プロジェクトルートが見つかりません\n探索開始位置: {0}\nヒント: stack.json ファイルを含むディレクトリで実行してください"
    )]
    ProjectRootNotFound(PathBuf),

    #[error("スタック名が指定されていません（stack.json の name フィールド）")]
    MissingStackName,

    #[error("無効な名前: {value}\n理由: {reason}")]
    InvalidName { value: String, reason: String },
}

pub type Result<T> = std::result::Result<T, BlueprintError>;
