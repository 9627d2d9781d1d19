use anyhow::Result;
use small_gantt::adapters::task_source::InputFormat;
use small_gantt::layout::ChartLayout;
use small_gantt::{ChartConfig, LocalStorage, PipelineEngine, RenderPipeline, TaskSource};
use tempfile::TempDir;

const PROJECT_CSV: &str = "\
Task,Work Package,Start,End,Type,Related WPs
Requirements Analysis,WP1: System Design,1,2,Task,
Architecture Design,WP1: System Design,2,4,Task,
Database Setup,WP2: Backend Dev,3,6,Task,
API Development,WP2: Backend Dev,5,9,Task,
Design Complete,WP1: System Design,4,4,Milestone,WP1
Backend Alpha,WP2: Backend Dev,9,9,Milestone,\"WP1, WP2\"
Go-Live,Milestones,10,10,Milestone,
";

fn config(title: &str, output: &str) -> ChartConfig {
    let mut config = ChartConfig::default();
    config.chart.title = title.to_string();
    config.output.path = output.to_string();
    config
}

#[tokio::test]
async fn test_render_csv_to_svg_on_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("project.csv"), PROJECT_CSV)?;

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = RenderPipeline::new(
        storage,
        config("Project Plan", "charts/plan.svg"),
        TaskSource::File {
            path: "project.csv".to_string(),
            format: InputFormat::Csv,
        },
    );

    let report = PipelineEngine::new(pipeline).run().await?;

    assert_eq!(report.summary.task_count, 4);
    assert_eq!(report.summary.milestone_count, 3);
    assert_eq!(report.summary.first_month, 1);
    assert_eq!(report.summary.last_month, 10);

    let svg = std::fs::read_to_string(temp_dir.path().join("charts/plan.svg"))?;
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Project Plan"));
    assert!(svg.contains("WP1\\System Design"));
    assert!(svg.contains("class=\"brackets\""));
    assert!(svg.contains(">Go-Live</tspan>"));
    Ok(())
}

#[tokio::test]
async fn test_render_yaml_to_layout_json() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let yaml = "\
tasks:
  - Task: Kickoff
    Work Package: \"WP1: Setup\"
    Start: 0
    End: 1
    Type: Task
  - Task: Ready
    Work Package: \"WP1: Setup\"
    Start: 1
    End: 1
    Type: Milestone
";
    std::fs::write(temp_dir.path().join("plan.yml"), yaml)?;

    let mut cfg = config("", "layout.json");
    cfg.axis.max_month = 12;
    cfg.axis.start_date = chrono::NaiveDate::from_ymd_opt(2026, 1, 1);

    let pipeline = RenderPipeline::new(
        LocalStorage::new(temp_dir.path()),
        cfg,
        TaskSource::File {
            path: "plan.yml".to_string(),
            format: InputFormat::Yaml,
        },
    );
    PipelineEngine::new(pipeline).run().await?;

    let layout: ChartLayout =
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join("layout.json"))?)?;
    assert_eq!(layout.bars.len(), 1);
    assert_eq!(layout.axis.x_max, 13.0);
    assert_eq!(layout.axis.ticks[1].label, "Jan 26");
    assert_eq!(layout.milestone_labels[0].text, "Ready");
    // 單一列的工作包不畫括號
    assert!(layout.brackets.is_empty());
    assert_eq!(layout.band_labels[0].rotation, 15.0);
    Ok(())
}

#[tokio::test]
async fn test_sample_chart_when_no_input() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let pipeline = RenderPipeline::new(
        LocalStorage::new(temp_dir.path()),
        config("", "sample.svg"),
        TaskSource::Sample,
    );

    let report = PipelineEngine::new(pipeline).run().await?;
    assert_eq!(report.summary.task_count, 17);
    assert_eq!(report.summary.milestone_count, 6);
    assert!(temp_dir.path().join("sample.svg").exists());
    Ok(())
}

#[tokio::test]
async fn test_missing_columns_fail_before_writing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("bad.csv"), "Task,Start\nA,1\n")?;

    let pipeline = RenderPipeline::new(
        LocalStorage::new(temp_dir.path()),
        config("", "bad.svg"),
        TaskSource::File {
            path: "bad.csv".to_string(),
            format: InputFormat::Csv,
        },
    );

    let err = PipelineEngine::new(pipeline).run().await.unwrap_err();
    assert!(err.to_string().contains("Missing required columns"));
    assert_eq!(err.exit_code(), 1);
    assert!(!temp_dir.path().join("bad.svg").exists());
    Ok(())
}

#[tokio::test]
async fn test_dry_run_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("project.csv"), PROJECT_CSV)?;

    let engine = PipelineEngine::new(RenderPipeline::new(
        LocalStorage::new(temp_dir.path()),
        config("", "plan.svg"),
        TaskSource::File {
            path: "project.csv".to_string(),
            format: InputFormat::Csv,
        },
    ));

    let tasks = engine.dry_run().await?;
    assert_eq!(tasks.len(), 7);
    assert!(!temp_dir.path().join("plan.svg").exists());
    Ok(())
}

#[cfg(feature = "cli")]
mod gantt_binary {
    use super::PROJECT_CSV;
    use anyhow::Result;
    use std::process::Command;
    use tempfile::TempDir;

    fn gantt(dir: &TempDir, args: &[&str]) -> Result<std::process::Output> {
        Ok(Command::new(env!("CARGO_BIN_EXE_gantt"))
            .args(args)
            .current_dir(dir.path())
            .env_remove("RUST_LOG")
            .env_remove("GANTT_LOG_FORMAT")
            .output()?)
    }

    #[test]
    fn test_dry_run_validates_without_writing() -> Result<()> {
        let temp_dir = TempDir::new()?;
        std::fs::write(temp_dir.path().join("project.csv"), PROJECT_CSV)?;

        let output = gantt(&temp_dir, &["-c", "project.csv", "-o", "plan.svg", "--dry-run"])?;

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("7 items valid (4 tasks, 3 milestones); nothing written"));
        assert!(!stdout.contains("Gantt chart generated successfully!"));
        assert!(!temp_dir.path().join("plan.svg").exists());
        Ok(())
    }

    #[test]
    fn test_failure_is_logged_and_sets_exit_code() -> Result<()> {
        let temp_dir = TempDir::new()?;

        let output = gantt(&temp_dir, &["-c", "missing.csv"])?;

        assert_eq!(output.status.code(), Some(3));
        let stdout = String::from_utf8_lossy(&output.stdout);
        // 執行檔自己的日誌也要輸出
        assert!(stdout.contains("Starting gantt renderer"));
        assert!(stdout.contains("Recovery suggestion"));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("CSV file 'missing.csv' not found."));
        Ok(())
    }
}
