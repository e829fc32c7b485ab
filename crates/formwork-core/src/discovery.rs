//! ファイル自動発見機能
//!
//! 規約ベースのディレクトリ構造から設定ファイルを自動的に発見します。
//!
//! ```text
//! stack.json              ルート定義（または stack.yaml / .formwork/ 内）
//! resources/**/*.json     リソースフラグメント（yaml も可）
//! stack.{stage}.json      ステージオーバーライド
//! stack.local.json        ローカルオーバーライド（最優先）
//! .env / .env.{stage}     変数ファイル
//! ```

use crate::error::{BlueprintError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// ルートファイルの候補名（優先順）
const ROOT_CANDIDATES: &[&str] = &["stack.json", "stack.yaml"];

/// 発見されたファイル群
#[derive(Debug, Clone, Default)]
pub struct DiscoveredFiles {
    /// ルートファイル (stack.json)
    pub root: Option<PathBuf>,
    /// リソースフラグメント (resources/**/*.json|yaml)
    pub resources: Vec<PathBuf>,
    /// ステージオーバーライドファイル (stack.{stage}.json)
    pub stage_override: Option<PathBuf>,
    /// ローカルオーバーライドファイル (stack.local.json)
    pub local_override: Option<PathBuf>,
    /// 環境変数ファイル (.env)
    pub env_file: Option<PathBuf>,
    /// ステージ固有の環境変数ファイル (.env.{stage})
    pub stage_env_file: Option<PathBuf>,
}

/// プロジェクトルートを検出
///
/// 以下の優先順位で検索:
/// 1. 環境変数 FORM_PROJECT_ROOT
/// 2. カレントディレクトリから上に向かって stack.json / stack.yaml /
///    .formwork/stack.json を探す
#[tracing::instrument]
pub fn find_project_root() -> Result<PathBuf> {
    // 1. 環境変数
    if let Ok(root) = std::env::var("FORM_PROJECT_ROOT") {
        let path = PathBuf::from(&root);
        debug!(env_root = %root, "Checking FORM_PROJECT_ROOT");
        if root_file_in(&path).is_some() {
            info!(project_root = %path.display(), "Found project root from environment variable");
            return Ok(path);
        }
    }

    // 2. カレントディレクトリから上に向かって探す
    let start_dir = std::env::current_dir()?;
    let mut current = start_dir.clone();
    debug!(start_dir = %start_dir.display(), "Searching for project root");

    loop {
        if root_file_in(&current).is_some() {
            info!(project_root = %current.display(), "Found project root");
            return Ok(current);
        }

        if !current.pop() {
            break;
        }
    }

    warn!(start_dir = %start_dir.display(), "Project root not found");
    Err(BlueprintError::ProjectRootNotFound(start_dir))
}

/// ディレクトリ直下または .formwork/ 配下のルートファイルを返す
fn root_file_in(dir: &Path) -> Option<PathBuf> {
    for candidate in ROOT_CANDIDATES {
        let direct = dir.join(candidate);
        if direct.exists() {
            return Some(direct);
        }
        let nested = dir.join(".formwork").join(candidate);
        if nested.exists() {
            return Some(nested);
        }
    }
    None
}

/// ディレクトリ直下または .formwork/ 配下で最初に存在するファイルを返す
fn first_existing(dir: &Path, names: &[String]) -> Option<PathBuf> {
    for name in names {
        let direct = dir.join(name);
        if direct.exists() {
            return Some(direct);
        }
        let nested = dir.join(".formwork").join(name);
        if nested.exists() {
            return Some(nested);
        }
    }
    None
}

/// プロジェクトルートからファイルを自動発見
#[tracing::instrument(skip(project_root), fields(project_root = %project_root.display()))]
pub fn discover_files(project_root: &Path) -> Result<DiscoveredFiles> {
    discover_files_with_stage(project_root, None)
}

/// ステージ指定でプロジェクトルートからファイルを自動発見
///
/// stage が指定されている場合、stack.{stage}.json と .env.{stage} も検出します。
#[tracing::instrument(skip(project_root), fields(project_root = %project_root.display()))]
pub fn discover_files_with_stage(
    project_root: &Path,
    stage: Option<&str>,
) -> Result<DiscoveredFiles> {
    debug!("Starting file discovery");
    let mut discovered = DiscoveredFiles::default();

    discovered.root = root_file_in(project_root);
    if let Some(root) = &discovered.root {
        debug!(file = %root.display(), "Found root file");
    }

    // resources/**/*.json|yaml
    let resources_dir = project_root.join("resources");
    if resources_dir.is_dir() {
        discovered.resources = discover_fragment_files(&resources_dir)?;
        info!(
            resource_count = discovered.resources.len(),
            "Discovered resource fragments"
        );
    }

    // stack.{stage}.json（ステージ指定時のみ）
    if let Some(stage_name) = stage {
        let candidates = vec![
            format!("stack.{}.json", stage_name),
            format!("stack.{}.yaml", stage_name),
        ];
        discovered.stage_override = first_existing(project_root, &candidates);
        if let Some(file) = &discovered.stage_override {
            debug!(file = %file.display(), "Found stage override file");
        }
    }

    // stack.local.json（常に検出、最優先）
    let local_candidates = vec!["stack.local.json".to_string(), "stack.local.yaml".to_string()];
    discovered.local_override = first_existing(project_root, &local_candidates);
    if let Some(file) = &discovered.local_override {
        debug!(file = %file.display(), "Found local override file");
    }

    // .env
    let env_candidates = vec![".env".to_string()];
    discovered.env_file = first_existing(project_root, &env_candidates);

    // .env.{stage}
    if let Some(stage_name) = stage {
        let stage_env_candidates = vec![format!(".env.{}", stage_name)];
        discovered.stage_env_file = first_existing(project_root, &stage_env_candidates);
    }

    Ok(discovered)
}

/// ディレクトリ以下のフラグメントファイルを再帰的に発見
///
/// 結果はパスでソートされ、読み込み順が決定的になります。
fn discover_fragment_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern_ext in &["json", "yaml", "yml"] {
        let pattern = format!("{}/**/*.{}", dir.display(), pattern_ext);
        let matches = glob::glob(&pattern).map_err(|e| BlueprintError::DiscoveryError {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        for entry in matches {
            let path = entry.map_err(|e| BlueprintError::DiscoveryError {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?;
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
