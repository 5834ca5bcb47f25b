use analysis::ObservationFilter;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use common::types::DATE_FORMAT;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "ecovision", about = "Climate trend, anomaly and seasonality analysis")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Trend, anomalies and seasonality per metric
    Trends(QueryArgs),
    /// Quality-weighted min/max/average per metric
    Summary(QueryArgs),
}

impl Command {
    pub fn args(&self) -> &QueryArgs {
        match self {
            Command::Trends(args) | Command::Summary(args) => args,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Trends(_) => "trends",
            Command::Summary(_) => "summary",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Climate data file (JSON array, or object with a `data` array)
    #[arg(long)]
    pub input: PathBuf,

    /// Output file path for the report JSON (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub location_id: Option<i64>,

    /// Metric name (case-insensitive)
    #[arg(long)]
    pub metric: Option<String>,

    /// Period start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Period end date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Minimum quality: poor, questionable, good or excellent
    #[arg(long)]
    pub quality_threshold: Option<String>,
}

fn parse_date(name: &str, value: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
    value
        .map(|v| {
            NaiveDate::parse_from_str(v, DATE_FORMAT)
                .map_err(|e| anyhow::anyhow!("Invalid {name} '{v}': {e}"))
        })
        .transpose()
}

impl QueryArgs {
    pub fn parse_start_date(&self) -> anyhow::Result<Option<NaiveDate>> {
        parse_date("start-date", self.start_date.as_deref())
    }

    pub fn parse_end_date(&self) -> anyhow::Result<Option<NaiveDate>> {
        parse_date("end-date", self.end_date.as_deref())
    }

    pub fn filter(&self) -> anyhow::Result<ObservationFilter> {
        let mut filter = ObservationFilter::new()
            .with_date_range(self.parse_start_date()?, self.parse_end_date()?)?;
        if let Some(id) = self.location_id {
            filter = filter.with_location(id);
        }
        if let Some(metric) = &self.metric {
            filter = filter.with_metric(metric);
        }
        if let Some(threshold) = &self.quality_threshold {
            filter = filter.with_quality_threshold(threshold)?;
        }
        Ok(filter)
    }
}
