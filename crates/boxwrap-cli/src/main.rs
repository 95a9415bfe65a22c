use anyhow::{Context, Result};
use boxwrap::layout::{CoordinateGrid, template_coordinates};
use boxwrap::{BoxSizeMm, TemplateOptions, WrapHalf, WrapOptions};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "boxwrap", about = "Box wrap template and wrap sheet generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty template to paint the box artwork on
    Template {
        /// Output image (.png, .jpg, .tiff or .pdf)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        box_size: BoxArgs,

        /// Load all parameters from a JSON file instead of the flags
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create the top and bottom wraps from a painted template
    Wraps {
        /// Painted template image
        #[arg(short, long)]
        template: PathBuf,

        /// Output image; writes <stem>-top.<ext> and <stem>-bottom.<ext>
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        box_size: BoxArgs,

        #[command(flatten)]
        material: MaterialArgs,

        /// Load all parameters from a JSON file instead of the flags
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the grids and draw steps as JSON without drawing anything
    Plan {
        #[command(flatten)]
        box_size: BoxArgs,

        #[command(flatten)]
        material: MaterialArgs,

        /// Only plan one half
        #[arg(long, value_enum)]
        half: Option<HalfArg>,

        /// Load all parameters from a JSON file instead of the flags
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct BoxArgs {
    /// Box width in mm
    #[arg(long, default_value = "75")]
    width: f64,

    /// Box height in mm
    #[arg(long, default_value = "104")]
    height: f64,

    /// Box depth in mm
    #[arg(long, default_value = "100")]
    depth: f64,
}

#[derive(Args)]
struct MaterialArgs {
    /// Cardboard thickness in mm
    #[arg(long, default_value = "2.0")]
    thickness: f64,

    /// Flap size in mm
    #[arg(long, default_value = "10.0")]
    flap_size: f64,

    /// Paper folded inside the box in mm
    #[arg(long, default_value = "15.0")]
    inside_size: f64,

    /// Crop mark length in mm
    #[arg(long, default_value = "5.0")]
    crop_mark_size: f64,

    /// Gap between crop marks and the cut in mm
    #[arg(long, default_value = "2.0")]
    crop_mark_distance: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum HalfArg {
    Top,
    Bottom,
}

impl From<HalfArg> for WrapHalf {
    fn from(arg: HalfArg) -> Self {
        match arg {
            HalfArg::Top => Self::Top,
            HalfArg::Bottom => Self::Bottom,
        }
    }
}

impl From<&BoxArgs> for BoxSizeMm {
    fn from(args: &BoxArgs) -> Self {
        BoxSizeMm::new(args.width, args.height, args.depth)
    }
}

fn wrap_options(box_size: &BoxArgs, material: &MaterialArgs) -> WrapOptions {
    WrapOptions {
        box_size: box_size.into(),
        thickness_mm: material.thickness,
        flap_size_mm: material.flap_size,
        inside_size_mm: material.inside_size,
        crop_mark_size_mm: material.crop_mark_size,
        crop_mark_distance_mm: material.crop_mark_distance,
    }
}

async fn load_wrap_options(
    config: Option<PathBuf>,
    box_size: &BoxArgs,
    material: &MaterialArgs,
) -> Result<WrapOptions> {
    match config {
        Some(path) => WrapOptions::load(&path)
            .await
            .with_context(|| format!("Failed to load {}", path.display())),
        None => Ok(wrap_options(box_size, material)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Template {
            output,
            box_size,
            config,
        } => {
            let options = match config {
                Some(path) => TemplateOptions::load(&path)
                    .await
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => TemplateOptions {
                    box_size: (&box_size).into(),
                },
            };

            let template = boxwrap::create_template(&options).await?;
            boxwrap::save_image(template, &output).await?;
            println!("Template → {}", output.display());
        }

        Commands::Wraps {
            template,
            output,
            box_size,
            material,
            config,
        } => {
            let options = load_wrap_options(config, &box_size, &material).await?;

            let source = boxwrap::load_image(&template)
                .await
                .with_context(|| format!("Failed to read template {}", template.display()))?;
            let (top, bottom) = boxwrap::create_wraps(source, &options).await?;

            let (top_path, bottom_path) = boxwrap::wrap_output_paths(&output);
            boxwrap::save_image(top, &top_path).await?;
            boxwrap::save_image(bottom, &bottom_path).await?;
            println!("Top wrap → {}", top_path.display());
            println!("Bottom wrap → {}", bottom_path.display());
        }

        Commands::Plan {
            box_size,
            material,
            half,
            config,
        } => {
            let options = load_wrap_options(config, &box_size, &material).await?;
            options.validate()?;

            let dims = options.box_size.to_pixels();
            let material = options.material();
            let halves: Vec<WrapHalf> = match half {
                Some(half) => vec![half.into()],
                None => WrapHalf::ALL.to_vec(),
            };

            let mut wraps = Vec::new();
            for half in halves {
                let plan = boxwrap::plan_wrap(half, &dims, &material);
                if let Err(e) = plan.grid.check_increasing() {
                    warn!("{} wrap grid overlaps itself: {}", half.suffix(), e);
                }
                wraps.push(serde_json::json!({
                    "half": plan.half,
                    "size": plan.size,
                    "grid": plan.grid,
                    "steps": plan.steps(),
                }));
            }

            let count = wraps.len();
            let template = template_coordinates(&dims);
            let report = serde_json::json!({
                "dimensions": dims,
                "material": material,
                "template": {
                    "size": template.size(),
                    "grid": template,
                },
                "wraps": wraps,
            });
            info!("Planned {} wrap sheet(s)", count);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
