use colored::Colorize;
use formwork_secrets::{CliSecretsStore, SecretsStore, write_env_file};
use std::path::PathBuf;

pub async fn handle_export(
    names: Vec<String>,
    profile: Option<String>,
    region: Option<String>,
    out: PathBuf,
    overwrite: bool,
) -> anyhow::Result<()> {
    println!("{}", "シークレットを読み込み中...".blue());

    let store = CliSecretsStore::new(profile, region);

    if let Err(e) = store.check_cli().await {
        eprintln!();
        eprintln!("{}", "✗ AWS CLIが利用できません".red().bold());
        eprintln!("  {}", e);
        std::process::exit(1);
    }

    // 1つずつ順番に読み込む（並列化しない）
    let secrets = match store.load_secrets(&names).await {
        Ok(secrets) => secrets,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ シークレットの読み込みに失敗しました".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    for (name, _) in &secrets {
        println!("  ✓ {}", name.cyan());
    }

    if let Err(e) = write_env_file(&out, &secrets, overwrite).await {
        eprintln!();
        eprintln!("{}", "✗ ファイルの書き出しに失敗しました".red().bold());
        eprintln!("  {}", e);
        std::process::exit(1);
    }

    println!();
    println!(
        "{}",
        format!("✓ {} を書き出しました（{}件）", out.display(), secrets.len())
            .green()
            .bold()
    );

    Ok(())
}
