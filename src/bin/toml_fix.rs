use clap::Parser;
use mdlink_fix::config::toml_config::TomlConfig;
use mdlink_fix::core::ConfigProvider;
use mdlink_fix::utils::{logger, validation::Validate};
use mdlink_fix::{FixEngine, LinkFixPipeline, LocalStorage};

#[derive(Parser)]
#[command(name = "toml-fix")]
#[command(about = "Markdown link fixer driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "fix-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - print diffs without writing any file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logging() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based link fixer");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if args.dry_run {
        config.set_dry_run(true);
        tracing::info!("🔍 DRY RUN MODE - no files will be written");
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config);

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道
    let storage = LocalStorage::new(config.root_dir().to_string());
    let pipeline = LinkFixPipeline::new(storage, config);

    // 創建引擎並運行
    let engine = FixEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ Link fix completed successfully!");
            println!("✅ Link fix completed successfully!");
            println!(
                "📁 {} files scanned, {} files {} ({} links) in {}ms",
                summary.files_scanned,
                summary.files_changed,
                if summary.dry_run {
                    "would change"
                } else {
                    "changed"
                },
                summary.links_rewritten,
                summary.elapsed_ms
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Link fix failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                mdlink_fix::utils::error::ErrorSeverity::Low => 0,
                mdlink_fix::utils::error::ErrorSeverity::Medium => 2,
                mdlink_fix::utils::error::ErrorSeverity::High => 1,
                mdlink_fix::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!("  Job: {} v{}", config.job.name, config.job.version);
    println!("  Root: {}", config.root_dir());
    println!("  Extensions: {}", config.scan.extensions.join(", "));
    println!("  Excluded dirs: {}", config.scan.exclude_dirs.join(", "));
    println!("  Threads: {}", config.threads());
    println!("  Backup: {}", config.backup());

    if config.is_dry_run() {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
