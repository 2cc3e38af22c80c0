use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use matgroups::config::Settings;
use matgroups::export::export_model;
use matgroups::model::JsonModel;

const LONG_ABOUT: &str = "\
Define fatigue element groups for each material found in a model.

In a large assembly it is often easier to assign fatigue material properties
by the material names used in the stress analysis than component by
component. For every part instance in each MODEL file, this writes one
Hypermesh bulk-data file, <model>_material_<instance>.bdf, holding one group
per material. Instances without materials are reported and skipped.

Import the files on the fatigue solver's groups page. To attach node
characteristics such as material, add the nodes related to the elements of
each group.";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogOutputFormat {
    Json,
    Pretty,
}

/// Command line arguments for matgroups.
#[derive(Debug, Parser)]
#[clap(name = "matgroups", version, about, long_about = LONG_ABOUT)]
struct Args {
    /// Model files to export material groups from.
    #[clap(value_name = "MODEL")]
    models: Vec<PathBuf>,

    /// Run the built-in self-test suite and exit without processing models.
    #[clap(long)]
    test: bool,

    /// Optional path to the configuration file. Values may also be provided
    /// via `MATGROUPS_` environment variables.
    #[clap(short = 'c', long, required = false)]
    config: Option<PathBuf>,

    /// Only export the instance with this name.
    #[clap(short = 'i', long)]
    instance: Option<String>,

    /// Directory to write the group files to, instead of next to each model.
    #[clap(short = 'd', long)]
    output_dir: Option<PathBuf>,

    #[clap(short = 'o', long = "output-format", default_value = "pretty")]
    output_format: Option<LogOutputFormat>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let pretty = matches!(args.output_format, Some(LogOutputFormat::Pretty));
    matgroups::logging::setup_logging(matgroups::logging::DEFAULT_DIRECTIVES, pretty);

    if args.test {
        let report = matgroups::selftest::run();
        println!("{report}");
        report.into_result()?;
        return Ok(());
    }

    let settings = Settings::new(args.config)?;
    let export = settings.export.with_overrides(args.instance, args.output_dir);

    for path in &args.models {
        tracing::info!(model = %path.display(), "processing model");

        let model = JsonModel::open(path)?;
        let written = export_model(&model, &export)?;

        tracing::info!(model = %path.display(), files = written.len(), "finished model");
    }

    Ok(())
}
