//! Find the molecular formula of your molecule from its m/z

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use context_error::{BoxedError, Context, CreateError};
use directories::ProjectDirs;
use mzformula::{error::FormulaError, parameters::SearchParameters};
use tracing_subscriber::EnvFilter;

mod table;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// The measured m/z (in Dalton)
    #[arg(short, long, required_unless_present = "list_ionizations")]
    mass: Option<f64>,
    /// The accuracy of the measurement in ppm
    #[arg(short, long, default_value = "5.0")]
    ppm: f64,
    /// The ionization state, one of the names listed by `--list-ionizations`
    #[arg(short, long, default_value = "+", allow_hyphen_values = true)]
    ionization: String,
    /// A JSON file with the search parameters, if not given `parameters.json` in the
    /// configuration directory is used if it exists, otherwise the built in defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overwrite the maximal number of atoms in a formula
    #[arg(long)]
    max_atoms: Option<u32>,
    /// Also apply the valence check to all candidates
    #[arg(long)]
    valence_filter: bool,
    /// Write the results as JSON instead of a table
    #[arg(long)]
    json: bool,
    /// Show the available ionization states and stop
    #[arg(long)]
    list_ionizations: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Cli::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> Result<(), BoxedError<'static, FormulaError>> {
    let mut parameters = load_parameters(args.config.as_deref())?;
    if let Some(max_atoms) = args.max_atoms {
        parameters.max_total_atoms = max_atoms;
    }
    parameters.valence_filter |= args.valence_filter;

    if args.list_ionizations {
        for (index, (name, adjustment)) in parameters.ionizations.iter().enumerate() {
            println!("{}. {name} (adjusts mass by {adjustment:+.6} Da)", index + 1);
        }
        return Ok(());
    }

    let Some(mass) = args.mass else {
        return Err(BoxedError::new(
            FormulaError::InvalidParameter,
            "Missing mass",
            "A target mass is needed to search for formulas",
            Context::none(),
        ));
    };
    let ionization = parameters.ionization(&args.ionization)?;
    let results = parameters.search().run(mass, args.ppm, ionization)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).map_err(|err| BoxedError::new(
                FormulaError::InvalidConfiguration,
                "Could not write results",
                err.to_string(),
                Context::none(),
            ))?
        );
    } else if results.is_empty() {
        println!("No formulas found within the specified tolerance.");
    } else {
        println!("Results for ionization: {}", args.ionization);
        println!(
            "Possible molecular formulas for mass {mass} (precision: {} ppm):\n",
            args.ppm
        );
        print!("{}", table::render(&results));
    }
    Ok(())
}

/// Load the parameters from the given path, the default location, or the built in defaults.
fn load_parameters(
    path: Option<&Path>,
) -> Result<SearchParameters, BoxedError<'static, FormulaError>> {
    let default_path = ProjectDirs::from("com", "rusteomics", "formula-finder")
        .map(|dirs| dirs.config_dir().join("parameters.json"));
    let path = match (path, &default_path) {
        (Some(path), _) => path,
        (None, Some(path)) if path.exists() => path.as_path(),
        _ => {
            tracing::debug!("Using the built in search parameters");
            return Ok(SearchParameters::default());
        }
    };
    tracing::debug!(path = %path.display(), "Loading search parameters");
    let text = std::fs::read_to_string(path).map_err(|err| {
        BoxedError::new(
            FormulaError::InvalidConfiguration,
            "Could not open search parameters",
            err.to_string(),
            Context::none().source(path.to_string_lossy()).to_owned(),
        )
    })?;
    SearchParameters::from_json(&text)
}
