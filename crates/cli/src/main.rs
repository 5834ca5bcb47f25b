#![deny(warnings)]

mod cli;
mod input;
mod output;

use analysis::{AnalysisParams, analyze, summarize};
use clap::Parser;
use logging::*;

fn run(cli: &cli::Cli, params: &AnalysisParams) -> anyhow::Result<()> {
    let log = DEFAULT.new(o!(
        "function" => "run",
        "command" => cli.command.name(),
    ));

    let args = cli.command.args();
    let filter = args.filter()?;
    let records = input::read_records(&args.input)?;
    let selected = filter.apply(&records);
    info!(log, "records loaded";
        "path" => args.input.display().to_string(),
        "records_count" => records.len(),
        "selected_count" => selected.len(),
    );

    match &cli.command {
        cli::Command::Trends(_) => {
            let report = analyze(&selected, params);
            info!(log, "analysis finished"; "metrics_count" => report.len());
            output::write_json(&report, args.output.as_deref())?;
        }
        cli::Command::Summary(_) => {
            let report = summarize(&selected);
            info!(log, "summary finished"; "metrics_count" => report.len());
            output::write_json(&report, args.output.as_deref())?;
        }
    }

    if let Some(path) = &args.output {
        info!(log, "results written"; "path" => path.display().to_string());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let params = AnalysisParams::from_config()?;
    run(&cli, &params)
}
