use clap::Parser;
use small_gantt::core::render_pipeline::RenderReport;
use small_gantt::utils::error::GanttError;
use small_gantt::utils::{logger, validation::Validate};
use small_gantt::{LocalStorage, PipelineEngine, RenderArgs, RenderPipeline};

fn fail(e: &GanttError) -> ! {
    tracing::error!(
        "❌ Gantt chart generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn print_summary(report: &RenderReport) {
    let summary = &report.summary;
    println!("Chart saved to: {}", report.output_path);
    println!();
    println!("{}", "=".repeat(50));
    println!("Gantt chart generated successfully!");
    println!("Title: {}", summary.title);
    println!(
        "Project spans from month {} to month {}",
        summary.first_month, summary.last_month
    );
    println!("Total tasks: {}", summary.task_count);
    println!("Total milestones: {}", summary.milestone_count);
    println!("{}", "=".repeat(50));
}

#[tokio::main]
async fn main() {
    let args = RenderArgs::parse();

    // 初始化日誌
    logger::init_from_env(args.verbose);

    tracing::info!("🚀 Starting gantt renderer");
    tracing::debug!("CLI args: {:?}", args);

    // 驗證參數與配置
    let config = match args.validate().and_then(|_| args.chart_config()) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let source = match args.source() {
        Ok(source) => source,
        Err(e) => fail(&e),
    };

    let pipeline = RenderPipeline::new(LocalStorage::current_dir(), config, source);
    let engine = PipelineEngine::new(pipeline);

    if args.dry_run {
        match engine.dry_run().await {
            Ok(tasks) => println!(
                "✓ {} items valid ({} tasks, {} milestones); nothing written",
                tasks.len(),
                tasks.task_count(),
                tasks.milestone_count()
            ),
            Err(e) => fail(&e),
        }
        return;
    }

    match engine.run().await {
        Ok(report) => {
            tracing::info!("✅ Chart written ({} bytes)", report.bytes_written);
            print_summary(&report);
        }
        Err(e) => fail(&e),
    }
}
