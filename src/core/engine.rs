use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::time::Instant;

pub struct FixEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> FixEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        println!("Starting link fix...");

        // Scan
        println!("Scanning files...");
        let files = self.pipeline.scan().await?;
        println!("Scanned {} files", files.len());
        self.monitor.log_phase("Scan");

        // Rewrite
        println!("Rewriting links...");
        let batch = self.pipeline.rewrite(files).await?;
        println!(
            "{} files need changes ({} links)",
            batch.changed_files(),
            batch.total_edits()
        );
        self.monitor.log_phase("Rewrite");

        // Apply
        println!("Applying changes...");
        let mut summary = self.pipeline.apply(batch).await?;
        summary.elapsed_ms = started.elapsed().as_millis() as u64;
        self.monitor.log_phase("Apply");
        self.monitor.log_final();

        Ok(summary)
    }
}
