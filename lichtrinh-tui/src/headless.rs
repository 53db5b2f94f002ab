use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use tokio::task;
use tracing::info;

use lichtrinh_core::model::{Itinerary, ItineraryId};
use lichtrinh_core::service::LichtrinhService;
use lichtrinh_infographic::{ExportError, Exporter, ResvgRasterizer, export_itinerary};

use crate::config::ExportSettings;

#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("source").required(true).args(["id", "file"])))]
pub(crate) struct ExportArgs {
    /// Itinerary id to fetch from the API
    #[arg(long)]
    pub id: Option<String>,

    /// Itinerary JSON file to read instead of calling the API
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output directory (overrides config file)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Date printed in the footer, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

async fn load(args: &ExportArgs, service: &LichtrinhService) -> Result<Itinerary> {
    if let Some(path) = &args.file {
        let body = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        return serde_json::from_str(&body)
            .with_context(|| format!("parsing {}", path.display()));
    }
    let id = ItineraryId(args.id.clone().unwrap_or_default());
    Ok(service.itinerary(&id).await?)
}

/// Write the infographic of one itinerary without starting the UI.
pub(crate) async fn export_command(
    args: ExportArgs,
    service: &LichtrinhService,
    settings: &ExportSettings,
) -> Result<PathBuf> {
    let itinerary = load(&args, service).await?;
    let output_dir = args.out.unwrap_or_else(|| settings.output_dir.clone());
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let font_file = settings.font_file.clone();

    let path = task::spawn_blocking(move || -> Result<PathBuf, ExportError> {
        let rasterizer = ResvgRasterizer::new(font_file.as_deref())?;
        Exporter::default().run(|| export_itinerary(&rasterizer, &itinerary, date, &output_dir))
    })
    .await
    .context("export task panicked")??;

    info!(path = %path.display(), "infographic written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn service() -> LichtrinhService {
        let client = lichtrinh_provider_http::client(Duration::from_secs(1)).expect("client");
        LichtrinhService::new(lichtrinh_provider_http::port(client, ""))
    }

    fn args(id: Option<&str>, file: Option<PathBuf>, out: PathBuf) -> ExportArgs {
        ExportArgs {
            id: id.map(str::to_owned),
            file,
            out: Some(out),
            date: NaiveDate::from_ymd_opt(2026, 10, 16),
        }
    }

    fn settings() -> ExportSettings {
        ExportSettings {
            output_dir: PathBuf::from("."),
            font_file: None,
        }
    }

    #[tokio::test]
    async fn exports_from_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("itinerary.json");
        fs::write(&source, include_str!("../../testdata/itinerary.json"))
            .expect("write fixture");

        let out = dir.path().join("png");
        let path = export_command(args(None, Some(source), out.clone()), &service(), &settings())
            .await
            .expect("export");

        assert_eq!(path.parent(), Some(out.as_path()));
        let bytes = fs::read(&path).expect("png");
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[tokio::test]
    async fn unconfigured_backend_fails_without_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("png");
        let err = export_command(args(Some("it-42"), None, out.clone()), &service(), &settings())
            .await
            .expect_err("no backend");
        assert!(err.to_string().contains("not configured"), "{err}");
        assert!(!out.exists());
    }
}
