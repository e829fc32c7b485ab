use colored::Colorize;
use formwork_aws::Environment;
use formwork_core::NamingContext;
use std::path::PathBuf;

/// デフォルトのステージ名（ブループリントにも指定がない場合）
const DEFAULT_STAGE: &str = "dev";

pub async fn handle(stage: Option<String>, out: Option<PathBuf>) -> anyhow::Result<()> {
    println!("{}", "テンプレートを合成中...".blue());

    // プロジェクトルートを検出
    let project_root = match formwork_core::find_project_root() {
        Ok(root) => root,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ プロジェクトルートが見つかりません".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    // ブループリントをロード
    let blueprint = match formwork_core::load_blueprint_from_root_with_stage(
        &project_root,
        stage.as_deref(),
    ) {
        Ok(blueprint) => blueprint,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ 設定エラー".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    // ステージ決定: 引数 → ブループリントのデフォルト → "dev"
    let stage_name = stage
        .or_else(|| blueprint.stage.clone())
        .unwrap_or_else(|| DEFAULT_STAGE.to_string());

    let naming = NamingContext::new(&blueprint.name, &stage_name)?;
    let environment = Environment::load()?;

    // 合成
    let stack = match formwork_aws::synthesize(&blueprint, &naming, &environment) {
        Ok(stack) => stack,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ 合成エラー".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    // テンプレートを書き出し
    let out_dir = out.unwrap_or_else(|| project_root.join(".formwork/out"));
    let out_path = out_dir.join(format!("{}.{}.template.json", blueprint.name, stage_name));
    stack.to_template().write_to(&out_path)?;

    println!("{}", "✓ 合成が完了しました！".green().bold());
    println!();
    println!("サマリー:");
    println!("  スタック: {}", blueprint.name.cyan());
    println!("  ステージ: {}", stage_name.cyan());
    println!("  リソース: {}個", stack.resources().len());
    println!("  アウトプット: {}個", stack.outputs().len());
    println!("  テンプレート: {}", out_path.display().to_string().cyan());

    Ok(())
}
