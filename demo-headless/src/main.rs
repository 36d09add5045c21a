use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use heat_source_core::{
    compare_peak_over_depth, Degrees, GridSpec, HeatSourceConfig, HeatSourceFormula,
    HeatSourceModel, IntensityField, IntensityFormula, Micrometers, ModelConfig, RadiusProfile,
    Result, SweepSpec,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Characters used for the text heat map, coolest first
const SHADES: &[u8] = b" .:-=+*#%@";

/// Cells per axis in the text heat map
const MAP_CELLS: usize = 25;

/// Rows printed in the peak-vs-depth table
const TABLE_ROWS: usize = 11;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModelKind {
    /// Conical-linear shape function, I0 = 1, half-angle 5°
    Conical,
    /// Power-normalized exponential cone, P = 250 W
    Exponential,
    /// Volumetric Gaussian cone between depth anchors
    GaussianCone,
    /// Super-Gaussian with linear radius growth
    SuperGaussian,
}

impl ModelKind {
    fn default_model(self) -> ModelConfig {
        let widening = RadiusProfile::LinearAngle {
            surface_radius: Micrometers::new(25.0),
            half_angle: Degrees::new(5.0),
        };
        match self {
            ModelKind::Conical => ModelConfig::Conical {
                peak_intensity: 1.0,
                profile: widening,
            },
            ModelKind::Exponential => ModelConfig::ExponentialCone {
                power: 250.0,
                efficiency: 1.0,
                decay: 2.0,
                profile: widening,
            },
            ModelKind::GaussianCone => ModelConfig::GaussianCone {
                power: 250.0,
                efficiency: 1.0,
                z_e: 0.0,
                r_e: 25.0,
                z_i: 100.0,
                r_i: 10.0,
            },
            ModelKind::SuperGaussian => ModelConfig::SuperGaussian {
                amplitude: 2.0,
                k: 1.0,
                power: 100.0,
                efficiency: 0.8,
                decay: 2.0,
                profile: RadiusProfile::GrowthRate {
                    surface_radius: Micrometers::new(25.0),
                    growth_rate: 0.087,
                },
            },
        }
    }
}

/// Heat source intensity explorer
#[derive(Parser, Debug)]
#[command(name = "heat-source-demo")]
#[command(about = "Evaluate laser heat source intensity models over depth", long_about = None)]
struct Args {
    /// JSON config file (overrides --model)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in model to evaluate when no config is given
    #[arg(short, long, value_enum, default_value_t = ModelKind::SuperGaussian)]
    model: ModelKind,

    /// Depth at which the full field is evaluated (μm)
    #[arg(short, long)]
    depth: Option<f64>,

    /// Deepest point of the peak sweep (μm)
    #[arg(long)]
    z_max: Option<f64>,

    /// Number of depth samples in the sweep
    #[arg(short, long)]
    samples: Option<usize>,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

impl Args {
    fn config(&self) -> Result<HeatSourceConfig> {
        let mut config = match &self.config {
            Some(path) => HeatSourceConfig::load(path)?,
            None => HeatSourceConfig {
                model: self.model.default_model(),
                grid: GridSpec::default(),
                sweep: SweepSpec::default(),
            },
        };
        if let Some(depth) = self.depth {
            config.sweep.selected_depth = depth;
        }
        if let Some(z_max) = self.z_max {
            config.sweep.max_depth = z_max;
        }
        if let Some(samples) = self.samples {
            config.sweep.samples = samples;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.config()?;
    if args.dump_config {
        println!("{}", config.to_json_string()?);
        return Ok(());
    }

    let model = config.build_model()?;
    let grid = config.build_grid()?;
    let depth = Micrometers::new(config.sweep.selected_depth);
    info!(
        "Evaluating {} on {}x{} grid",
        model.formula().name(),
        grid.shape().1,
        grid.shape().0
    );

    println!("=== Heat Source Demo ===\n");
    println!("Model: {}", model.formula().name());
    print_parameters(model.formula());
    println!("Profile: {:?}", model.profile());

    let ceiling = model.reference_max(&grid);
    println!("\nPeak intensity at z=0: {:.4e}", model.peak_at_depth(Micrometers::ZERO));
    println!("Color scale ceiling (surface max on grid): {ceiling:.4e}");

    let field = model.evaluate_at_depth(&grid, depth);
    println!("\n--- Field at z = {depth} ---");
    match model.resolve_radius(depth).radius() {
        Some(r0) => println!("Beam radius: {r0}"),
        None => println!("Beam radius: undefined"),
    }
    println!("Status: {:?}", field.status());
    if field.status().is_suppressed() {
        warn!("Field at {} is suppressed: {:?}", depth, field.status());
    }
    println!("Max: {:.4e}  Min: {:.4e}", field.max(), field.min());
    println!(
        "Cells above 1% of ceiling: {:.1}%",
        support_fraction(&field, ceiling) * 100.0
    );
    println!();
    print_heat_map(&field, ceiling);

    print_comparison(&config, &model, depth)
}

fn print_parameters(formula: &HeatSourceFormula) {
    match formula {
        HeatSourceFormula::Conical(cone) => println!("  I0 = {}", cone.i0()),
        HeatSourceFormula::ExponentialCone(cone) => println!(
            "  P = {}  η = {}  C = {}",
            cone.power(),
            cone.efficiency(),
            cone.decay()
        ),
        HeatSourceFormula::GaussianCone(cone) => {
            let (z_e, r_e) = cone.top_anchor();
            let (z_i, r_i) = cone.bottom_anchor();
            println!("  P = {}  η = {}", cone.power(), cone.efficiency());
            println!("  top anchor: z = {z_e}, r = {r_e}");
            println!("  bottom anchor: z = {z_i}, r = {r_i}");
            match cone.volumetric_peak() {
                Some(qv) => println!("  Qv = {qv:.4e}"),
                None => println!("  Qv undefined (zero-height cone)"),
            }
        }
        HeatSourceFormula::SuperGaussian(source) => println!(
            "  A = {}  k = {}  P = {}  η = {}  C = {}",
            source.amplitude(),
            source.shape(),
            source.power(),
            source.efficiency(),
            source.decay()
        ),
    }
}

/// Fraction of cells whose value exceeds 1% of `ceiling`
fn support_fraction(field: &IntensityField, ceiling: f64) -> f64 {
    let (rows, cols) = field.shape();
    let cells = rows * cols;
    if cells == 0 || ceiling <= 0.0 {
        return 0.0;
    }
    let above = field.values().filter(|v| *v > 0.01 * ceiling).count();
    above as f64 / cells as f64
}

/// Downsampled text rendering, shaded against the surface ceiling
fn print_heat_map(field: &IntensityField, ceiling: f64) {
    let (rows, cols) = field.shape();
    let map_rows = MAP_CELLS.min(rows);
    let map_cols = MAP_CELLS.min(cols);
    let top = SHADES.len() - 1;

    for i in (0..map_rows).rev() {
        let row = i * rows / map_rows;
        let line: String = (0..map_cols)
            .map(|j| {
                let value = field.value_at(row, j * cols / map_cols).unwrap_or(0.0);
                let level = if ceiling > 0.0 {
                    ((value / ceiling).clamp(0.0, 1.0) * top as f64).round() as usize
                } else {
                    0
                };
                char::from(SHADES[level])
            })
            .flat_map(|c| [c, c])
            .collect();
        println!("  |{line}|");
    }
}

fn print_comparison(
    config: &HeatSourceConfig,
    model: &HeatSourceModel,
    selected: Micrometers,
) -> Result<()> {
    let Some(constant) = model.constant_radius_counterpart() else {
        println!("\nNo surface radius defined, skipping peak-vs-depth comparison");
        return Ok(());
    };

    let rows = compare_peak_over_depth(config.depth_samples()?, &constant, model);
    let stride = (rows.len() / (TABLE_ROWS - 1)).max(1);

    println!("\n--- Peak intensity vs depth ---");
    println!(
        "{:>10}  {:>12}  {:>12}  {:>9}",
        "z (μm)", "constant", "growing", "retained"
    );
    let last = rows.len().saturating_sub(1);
    for (i, row) in rows.iter().enumerate() {
        if i % stride != 0 && i != last {
            continue;
        }
        let retained = row
            .retained_fraction()
            .map_or_else(|| "-".to_string(), |f| format!("{:.1}%", f * 100.0));
        println!(
            "{:>10.2}  {:>12.4e}  {:>12.4e}  {:>9}",
            *row.depth, row.constant, row.growing, retained
        );
    }
    println!(
        "Selected depth {selected}: peak {:.4e}",
        model.peak_at_depth(selected)
    );
    Ok(())
}
