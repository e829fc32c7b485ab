use colored::Colorize;

pub async fn handle(stage: Option<String>) -> anyhow::Result<()> {
    println!("{}", "設定を検証中...".blue());

    // プロジェクトルートを検出
    match formwork_core::find_project_root() {
        Ok(project_root) => {
            println!(
                "プロジェクトルート: {}",
                project_root.display().to_string().cyan()
            );

            // デバッグモードでロード
            match formwork_core::load_blueprint_with_debug(&project_root, stage.as_deref()) {
                Ok(blueprint) => {
                    println!("{}", "✓ 設定ファイルは正常です！".green().bold());
                    println!();
                    println!("サマリー:");
                    println!("  スタック: {}", blueprint.name.cyan());
                    if let Some(stage) = &blueprint.stage {
                        println!("  デフォルトステージ: {}", stage.cyan());
                    }
                    for (collection, count) in blueprint.summary() {
                        println!("  {}: {}個", collection.cyan(), count);
                    }
                }
                Err(e) => {
                    eprintln!();
                    eprintln!("{}", "✗ 設定エラー".red().bold());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ プロジェクトルートが見つかりません".red().bold());
            eprintln!("  {}", e);
            eprintln!();
            eprintln!("stack.json が存在するディレクトリで実行してください");
            std::process::exit(1);
        }
    }

    Ok(())
}
