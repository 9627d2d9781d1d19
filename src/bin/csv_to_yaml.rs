use clap::Parser;
use small_gantt::core::ConversionSummary;
use small_gantt::utils::error::GanttError;
use small_gantt::utils::{logger, validation::Validate};
use small_gantt::{ConvertArgs, ConvertPipeline, LocalStorage, PipelineEngine, TaskKind};

fn fail(e: &GanttError) -> ! {
    tracing::error!(
        "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn print_summary(summary: &ConversionSummary) {
    println!(
        "✓ Successfully converted {} tasks to {}",
        summary.total_tasks, summary.output_path
    );
    println!();
    println!("Conversion Summary:");
    println!("  Input file: {}", summary.input_path);
    println!("  Output file: {}", summary.output_path);
    println!("  Total tasks: {}", summary.total_tasks);
    if summary.milestones_added > 0 {
        println!("  Milestones added: {}", summary.milestones_added);
    }
    println!("  Work packages: {}", summary.work_packages.join(", "));
    if let Some((first, last)) = summary.month_range {
        println!("  Month range: {} to {}", first, last);
    }
}

#[tokio::main]
async fn main() {
    let args = ConvertArgs::parse();

    logger::init_from_env(args.verbose);
    tracing::debug!("CLI args: {:?}", args);

    if let Err(e) = args.validate() {
        fail(&e);
    }

    let pipeline = ConvertPipeline::new(
        LocalStorage::current_dir(),
        args.csv_file.clone(),
        args.output_path(),
    )
    .with_milestones(args.milestones.clone())
    .with_default_kind(TaskKind::from(args.task_type));

    match PipelineEngine::new(pipeline).run().await {
        Ok(summary) => print_summary(&summary),
        Err(e) => fail(&e),
    }
}
