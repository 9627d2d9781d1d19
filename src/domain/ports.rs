use crate::adapters::svg::SvgOptions;
use crate::layout::LayoutOptions;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> bool;
}

/// Render-time settings the chart pipeline needs, whatever layer they came from.
pub trait ConfigProvider: Send + Sync {
    fn title(&self) -> &str;
    fn output_path(&self) -> &str;
    fn layout_options(&self) -> LayoutOptions;
    fn svg_options(&self) -> SvgOptions;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Intermediate: Send;
    type Artifact: Send;
    type Report: Send;

    async fn extract(&self) -> Result<Self::Intermediate>;
    async fn transform(&self, data: Self::Intermediate) -> Result<Self::Artifact>;
    async fn load(&self, artifact: Self::Artifact) -> Result<Self::Report>;
}
