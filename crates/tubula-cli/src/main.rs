//! Tubula command-line interface.
//!
//! Generate aggregate geometries from TOML configuration files:
//! ```sh
//! tubula-cli run tube.toml
//! tubula-cli validate tube.toml
//! tubula-cli template > tube.toml
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tubula-cli")]
#[command(about = "Tubula: cylindrical molecular aggregate geometry")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a lattice from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without generating anything.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Print an annotated example configuration to stdout.
    Template,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Tubula Geometry Generator");
            println!("=========================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let result = runner::run_job(&job)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            if job.output.save_csv {
                runner::write_positions_csv(
                    &result.lattice,
                    &result.params,
                    &out_dir.join("positions.csv"),
                )?;
                runner::write_components_csv(
                    &result.lattice,
                    &result.params,
                    &out_dir.join("components.csv"),
                )?;
            }

            if job.output.save_json {
                runner::write_lattice_json(&result.lattice, &out_dir.join("lattice.json"))?;
            }

            println!("Generation complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            let params = job.lattice.to_params()?;
            params.validate()?;
            println!("Configuration is valid: {}", config.display());
            println!(
                "  {} molecules in {} rings of {}",
                params.n_molecules,
                params.n_rings,
                params.ring_size()
            );
            Ok(())
        }
        Commands::Template => {
            print!("{}", TEMPLATE);
            Ok(())
        }
    }
}

/// The untilted nanotube model of the reference study, with the tilted
/// variant left as comments.
const TEMPLATE: &str = r#"# Tubula job configuration.
# Lengths in angstrom, angles in radians.

[lattice]
molecules = 6000       # total number of molecules in the cylinder
rings = 100            # stacked rings (60 molecules per ring)
radius = 60.0          # cylinder radius
ring_spacing = 8.3     # vertical distance between consecutive rings

# Untilted planar-ring model: all dipoles along the cylinder axis.
tilt = 0.0             # in-plane offset from the ring tangent, sign alternating by slot
polar_angle = 0.0      # angle between dipole and cylinder axis
displacement = 0.0     # vertical displacement between dipoles on neighbour rings

# Tilted variant of the study:
# tilt = 0.06981317007977318         # pi/45
# polar_angle = 0.3839724354387525   # 11*pi/90
# displacement = 0.5585053606381855  # 8*pi/45

# The azimuthal step defaults to 2*pi / (molecules / rings); the twist
# may also be given directly instead of the displacement:
# azimuthal_step = 0.10471975511965977
# twist = 0.0

[output]
directory = "./output"
save_csv = true        # positions.csv + components.csv
save_json = false      # lattice.json
"#;
