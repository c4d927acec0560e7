use anyhow::Result;
use clap::Parser;
use contraste::{
    analysis::{compare_panel, AnalysisConfig},
    cli::{Cli, OutputFormat},
    csv_output::CsvOutput,
    dataset, json_output, report,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = AnalysisConfig {
        alpha: args.alpha,
        ..AnalysisConfig::default()
    };

    let panel = dataset::builtin_panel();
    let results = compare_panel(&panel, &config)?;

    match args.format {
        OutputFormat::Text => print!("{}", report::render_report(&results, &config)),
        OutputFormat::Json => println!("{}", json_output::to_json_string(&results, config.alpha)?),
        OutputFormat::Csv => print!(
            "{}",
            CsvOutput::from_comparisons(&results, config.alpha).to_csv()
        ),
    }

    Ok(())
}
