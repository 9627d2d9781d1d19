use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

/// Drives a pipeline through extract, transform and load.
pub struct PipelineEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PipelineEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<P::Report> {
        let started = Instant::now();
        tracing::info!("Starting pipeline");

        tracing::info!("Extracting data...");
        let phase = Instant::now();
        let raw_data = self.pipeline.extract().await?;
        tracing::debug!("Extract finished in {:?}", phase.elapsed());

        tracing::info!("Transforming data...");
        let phase = Instant::now();
        let artifact = self.pipeline.transform(raw_data).await?;
        tracing::debug!("Transform finished in {:?}", phase.elapsed());

        tracing::info!("Writing output...");
        let phase = Instant::now();
        let report = self.pipeline.load(artifact).await?;
        tracing::debug!("Load finished in {:?}", phase.elapsed());

        tracing::info!("Pipeline completed in {:?}", started.elapsed());
        Ok(report)
    }

    /// 只執行擷取階段，用於 --dry-run
    pub async fn dry_run(&self) -> Result<P::Intermediate> {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        self.pipeline.extract().await
    }
}
