//! 統合ローダー
//!
//! ファイル発見、テンプレート展開、パース、マージを統合します。
//!
//! 読み込み順序: stack.json → resources/**/* → stack.{stage}.json →
//! stack.local.json。オーバーライドファイルのエントリはコレクションの
//! 先頭に置かれ、同一キーのベース定義より優先されます。

use crate::discovery::{DiscoveredFiles, discover_files_with_stage, find_project_root};
use crate::error::{BlueprintError, Result};
use crate::model::Blueprint;
use crate::naming::validate_name;
use crate::template::TemplateProcessor;
use std::path::Path;
use tracing::{debug, info, instrument};

/// プロジェクト全体をロードしてBlueprintを生成
///
/// 以下の処理を実行:
/// 1. プロジェクトルートの検出
/// 2. ファイルの自動発見
/// 3. 変数の収集
/// 4. テンプレート展開
/// 5. パースとマージ
#[instrument]
pub fn load_blueprint() -> Result<Blueprint> {
    info!("Starting blueprint load");
    let project_root = find_project_root()?;
    load_blueprint_from_root(&project_root)
}

/// 指定されたルートディレクトリからブループリントをロード
#[instrument(skip(project_root), fields(project_root = %project_root.display()))]
pub fn load_blueprint_from_root(project_root: &Path) -> Result<Blueprint> {
    load_blueprint_from_root_with_stage(project_root, None)
}

/// ステージ指定でブループリントをロード
///
/// stage が指定されている場合、stack.{stage}.json も読み込んでマージします。
#[instrument(skip(project_root), fields(project_root = %project_root.display()))]
pub fn load_blueprint_from_root_with_stage(
    project_root: &Path,
    stage: Option<&str>,
) -> Result<Blueprint> {
    // 1. ファイル発見
    debug!("Step 1: Discovering files");
    let discovered = discover_files_with_stage(project_root, stage)?;

    let root_file = discovered
        .root
        .clone()
        .ok_or_else(|| BlueprintError::ProjectRootNotFound(project_root.to_path_buf()))?;

    // 2. 変数収集とテンプレート準備
    debug!("Step 2: Preparing template processor");
    let mut processor = prepare_template_processor(&discovered, project_root)?;

    // 3. ルートファイルの展開とパース
    debug!("Step 3: Parsing root file");
    let mut blueprint = render_and_parse(&root_file, &mut processor)?;

    // 4. リソースフラグメントを発見順にマージ
    debug!("Step 4: Merging resource fragments");
    for fragment_file in &discovered.resources {
        debug!(file = %fragment_file.display(), "Merging fragment");
        let fragment = render_and_parse(fragment_file, &mut processor)?;
        blueprint.absorb(fragment);
    }

    // 5. ステージオーバーライド
    if let Some(stage_file) = &discovered.stage_override {
        debug!(file = %stage_file.display(), "Merging stage override");
        let override_blueprint = render_and_parse(stage_file, &mut processor)?;
        blueprint.absorb_override(override_blueprint);
    }

    // 6. ローカルオーバーライド（最優先）
    if let Some(local_file) = &discovered.local_override {
        debug!(file = %local_file.display(), "Merging local override");
        let override_blueprint = render_and_parse(local_file, &mut processor)?;
        blueprint.absorb_override(override_blueprint);
    }

    // 7. スタック名の検証
    if blueprint.name.is_empty() {
        return Err(BlueprintError::MissingStackName);
    }
    validate_name(&blueprint.name)?;

    info!(
        stack = %blueprint.name,
        collections = blueprint.summary().len(),
        "Blueprint loaded successfully"
    );

    Ok(blueprint)
}

/// テンプレートプロセッサを準備
///
/// 変数の優先順位（後に追加されたものが勝つ）:
/// 1. ビルトイン変数 (PROJECT_ROOT)
/// 2. ルートファイルの variables マップ
/// 3. .env ファイル
/// 4. .env.{stage} ファイル
/// 5. 環境変数 (FORM_*, CI_*, APP_* プレフィックスのみ、最優先)
fn prepare_template_processor(
    discovered: &DiscoveredFiles,
    project_root: &Path,
) -> Result<TemplateProcessor> {
    let mut processor = TemplateProcessor::new();

    // 1. ビルトイン変数
    processor.add_variable(
        "PROJECT_ROOT",
        serde_json::Value::String(project_root.to_string_lossy().to_string()),
    );

    // 2. ルートファイルの variables マップ
    //
    // テンプレート変数 {{ ... }} はJSON/YAMLの文字列値の内側にあるため、
    // 展開前のファイルもそのままパースできます。
    if let Some(root_file) = &discovered.root {
        let content = std::fs::read_to_string(root_file).map_err(|e| BlueprintError::IoError {
            path: root_file.clone(),
            message: e.to_string(),
        })?;
        let raw = parse_value(&content, root_file)?;
        if let Some(variables) = raw.get("variables").and_then(|v| v.as_object()) {
            for (key, value) in variables {
                processor.add_variable(key.clone(), value.clone());
            }
        }
    }

    // 3. .env ファイル
    if let Some(env_file) = &discovered.env_file {
        processor.add_env_file_variables(env_file)?;
    }

    // 4. ステージ固有の .env.{stage} ファイル（.env を上書き）
    if let Some(stage_env_file) = &discovered.stage_env_file {
        processor.add_env_file_variables(stage_env_file)?;
    }

    // 5. 環境変数（最優先）
    processor.add_env_variables();

    Ok(processor)
}

/// ファイルをテンプレート展開してブループリントとしてパース
fn render_and_parse(path: &Path, processor: &mut TemplateProcessor) -> Result<Blueprint> {
    let rendered = processor.render_file(path)?;
    parse_blueprint(&rendered, path)
}

/// 拡張子に応じてブループリントをパース
fn parse_blueprint(content: &str, path: &Path) -> Result<Blueprint> {
    if is_yaml(path) {
        Ok(serde_yaml::from_str(content)?)
    } else {
        Ok(serde_json::from_str(content)?)
    }
}

/// 拡張子に応じて生の値としてパース
fn parse_value(content: &str, path: &Path) -> Result<serde_json::Value> {
    if is_yaml(path) {
        Ok(serde_yaml::from_str(content)?)
    } else {
        Ok(serde_json::from_str(content)?)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// デバッグ情報を表示しながらロード
///
/// `form validate` から使用され、各ステップの結果を表示します。
pub fn load_blueprint_with_debug(project_root: &Path, stage: Option<&str>) -> Result<Blueprint> {
    println!("🔍 プロジェクト検出");
    println!("  ルート: {}", project_root.display());
    if let Some(s) = stage {
        println!("  ステージ: {}", s);
    }

    let discovered = discover_files_with_stage(project_root, stage)?;

    if let Some(root) = &discovered.root {
        println!("  ルートファイル: ✓ {}", root.display());
    } else {
        println!("  ルートファイル: ✗ 未検出");
    }

    if !discovered.resources.is_empty() {
        println!("\n📂 ファイル発見 (resources/)");
        for fragment in &discovered.resources {
            println!("  ✓ {}", fragment.display());
        }
    }

    if let Some(stage_file) = &discovered.stage_override {
        println!("\n📂 ステージオーバーライド");
        println!("  ✓ {}", stage_file.display());
    }

    if let Some(local_file) = &discovered.local_override {
        println!("\n📂 ローカルオーバーライド");
        println!("  ✓ {}", local_file.display());
    }

    if discovered.env_file.is_some() || discovered.stage_env_file.is_some() {
        println!("\n🔐 環境変数ファイル");
        if let Some(env_file) = &discovered.env_file {
            println!("  ✓ {} (base)", env_file.display());
        }
        if let Some(stage_env_file) = &discovered.stage_env_file {
            println!("  ✓ {} (stage-specific)", stage_env_file.display());
        }
    }

    println!("\n📝 テンプレート展開とパース");
    let blueprint = load_blueprint_from_root_with_stage(project_root, stage)?;
    println!("  ✓ 完了");

    println!("\n✅ ロード完了\n");

    Ok(blueprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use std::fs;

    fn create_test_project(base: &Path) {
        fs::write(
            base.join("stack.json"),
            r#"{
  "name": "media-stack",
  "stage": "dev",
  "variables": {
    "zone": "example.com"
  },
  "buckets": [
    {"key": "assets", "name": "media-assets", "versioned": true}
  ]
}"#,
        )
        .unwrap();

        fs::create_dir_all(base.join("resources")).unwrap();
        fs::write(
            base.join("resources/functions.json"),
            r#"{
  "functions": [
    {"key": "resize", "name": "media-resize", "handler": "index.handler"}
  ],
  "records": [
    {"key": "cdn", "name": "cdn", "zone": "{{ zone }}", "value": "d111.cloudfront.net"}
  ]
}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_load_blueprint_basic() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        create_test_project(root);

        let blueprint = load_blueprint_from_root(root).unwrap();

        assert_eq!(blueprint.name, "media-stack");
        assert_eq!(blueprint.stage.as_deref(), Some("dev"));

        // フラグメントがマージされている
        assert_eq!(blueprint.buckets.as_deref().unwrap().len(), 1);
        assert_eq!(blueprint.functions.as_deref().unwrap().len(), 1);

        // テンプレート展開の確認
        let record = &blueprint.records.as_deref().unwrap()[0];
        assert_eq!(record.zone, "example.com");
    }

    #[test]
    fn test_load_blueprint_with_stage_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        create_test_project(root);

        fs::write(
            root.join("stack.prd.json"),
            r#"{
  "buckets": [
    {"key": "assets", "name": "media-assets", "versioned": true, "skip_stage_suffix": true}
  ]
}"#,
        )
        .unwrap();

        // ステージ指定なしではオーバーライドは読まれない
        let blueprint = load_blueprint_from_root(root).unwrap();
        let bucket = resolve(blueprint.buckets.as_deref(), "buckets", "assets").unwrap();
        assert!(!bucket.skip_stage_suffix);

        // ステージ指定ありではオーバーライドのエントリが優先される
        let blueprint = load_blueprint_from_root_with_stage(root, Some("prd")).unwrap();
        let bucket = resolve(blueprint.buckets.as_deref(), "buckets", "assets").unwrap();
        assert!(bucket.skip_stage_suffix);
    }

    #[test]
    fn test_load_blueprint_with_local_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        create_test_project(root);

        fs::write(
            root.join("stack.dev.json"),
            r#"{"buckets": [{"key": "assets", "name": "stage-name"}]}"#,
        )
        .unwrap();
        fs::write(
            root.join("stack.local.json"),
            r#"{"buckets": [{"key": "assets", "name": "local-name"}]}"#,
        )
        .unwrap();

        // ローカルオーバーライドはステージオーバーライドより優先される
        let blueprint = load_blueprint_from_root_with_stage(root, Some("dev")).unwrap();
        let bucket = resolve(blueprint.buckets.as_deref(), "buckets", "assets").unwrap();
        assert_eq!(bucket.name, "local-name");
    }

    #[test]
    fn test_load_blueprint_with_env_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();

        fs::write(root.join(".env"), "ZONE=from-env.example.com\n").unwrap();
        fs::write(
            root.join("stack.json"),
            r#"{
  "name": "media-stack",
  "records": [
    {"key": "cdn", "name": "cdn", "zone": "{{ ZONE }}", "value": "d111.cloudfront.net"}
  ]
}"#,
        )
        .unwrap();

        let blueprint = load_blueprint_from_root(root).unwrap();
        let record = &blueprint.records.as_deref().unwrap()[0];
        assert_eq!(record.zone, "from-env.example.com");
    }

    #[test]
    fn test_load_blueprint_missing_name() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("stack.json"), r#"{"buckets": []}"#).unwrap();

        let result = load_blueprint_from_root(root);
        assert!(matches!(result, Err(BlueprintError::MissingStackName)));
    }

    #[test]
    fn test_load_blueprint_yaml_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();

        fs::write(
            root.join("stack.yaml"),
            r#"
name: media-stack
buckets:
  - key: assets
    name: media-assets
"#,
        )
        .unwrap();

        let blueprint = load_blueprint_from_root(root).unwrap();
        assert_eq!(blueprint.name, "media-stack");
        assert_eq!(blueprint.buckets.as_deref().unwrap().len(), 1);
    }
}
