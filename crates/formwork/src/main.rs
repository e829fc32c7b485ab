mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "form")]
#[command(version)]
#[command(about = "設定を書く。テンプレートが生まれる。", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// テンプレートを合成
    Synth {
        /// ステージ名 (dev, stg, prd)
        stage: Option<String>,
        /// ステージ名 (-s/--stage フラグ、FORM_STAGE 環境変数)
        #[arg(
            short = 's',
            long = "stage",
            env = "FORM_STAGE",
            conflicts_with = "stage",
            hide = true
        )]
        stage_flag: Option<String>,
        /// 出力ディレクトリ（デフォルト: .formwork/out）
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// 設定を検証
    Validate {
        /// ステージ名 (dev, stg, prd)
        stage: Option<String>,
        /// ステージ名 (-s/--stage フラグ、FORM_STAGE 環境変数)
        #[arg(
            short = 's',
            long = "stage",
            env = "FORM_STAGE",
            conflicts_with = "stage",
            hide = true
        )]
        stage_flag: Option<String>,
    },
    /// シークレット操作
    Secrets {
        #[command(subcommand)]
        command: SecretsCommands,
    },
}

#[derive(Subcommand)]
enum SecretsCommands {
    /// シークレットを .env ファイルへエクスポート
    Export {
        /// シークレット名（複数指定可）
        #[arg(short, long = "name", env = "FORM_SECRET_NAME", required = true)]
        names: Vec<String>,
        /// AWSプロファイル
        #[arg(short, long, env = "FORM_PROFILE")]
        profile: Option<String>,
        /// リージョン
        #[arg(short, long, env = "FORM_REGION")]
        region: Option<String>,
        /// 出力ファイル
        #[arg(short, long, env = "FORM_OUT", default_value = ".env")]
        out: PathBuf,
        /// 既存ファイルを上書きする
        #[arg(long, env = "FORM_OVERWRITE")]
        overwrite: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // FORM_LOG / RUST_LOG でログレベルを制御
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("FORM_LOG")
                .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Synth {
            stage,
            stage_flag,
            out,
        } => {
            let stage = stage.or(stage_flag);
            commands::synth::handle(stage, out).await
        }
        Commands::Validate { stage, stage_flag } => {
            let stage = stage.or(stage_flag);
            commands::validate::handle(stage).await
        }
        Commands::Secrets { command } => match command {
            SecretsCommands::Export {
                names,
                profile,
                region,
                out,
                overwrite,
            } => commands::secrets::handle_export(names, profile, region, out, overwrite).await,
        },
    }
}
