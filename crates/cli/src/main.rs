#![deny(unsafe_code)]
//! CLI binary for lab-picker.
//!
//! With no subcommand it builds the gamut atlas into `LabColorSpace.bin` in
//! the working directory. Subcommands:
//! - `atlas`: build the atlas with custom parameters or output path
//! - `convert <color>`: show a color in every supported space
//! - `contrast <color>`: find the most distinct color at the same chroma
//! - `simulate <mode> <color>`: color-vision deficiency simulation
//! - `delta <color> <color>`: CIEDE2000 and CIE76 differences
//! - `slice <axis> <value>`: render a Lab cross-section with its gamut outline
//! - `preview <atlas> <axis> <index>`: extract one atlas image as PNG
//! - `palette <file|name>`: list the colors of a palette
//! - `list`: vision modes, palettes and axes

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use lab_picker_atlas::snapshot::write_png;
use lab_picker_atlas::{AtlasParams, GamutAtlas, DEFAULT_FILE_NAME};
use lab_picker_core::color::{
    from_lab, from_lab_tolerant, lab_to_lch, lab_to_linear, lab_to_xyz, srgb_to_linear, to_lab,
};
use lab_picker_core::contrast::contrasting_color_with;
use lab_picker_core::hsb::{hsb_to_rgb, rgb_to_hsb};
use lab_picker_core::slice::render_lab_slice;
use lab_picker_core::{
    delta_e_2000, delta_e_76, ContrastParams, DeltaECategory, Hsb, Lab, LabAxis, Palette, Rgb8,
    VisionMode,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lab-picker", about = "Lab color picker numerics and gamut atlas tool")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the gamut atlas and write it gzip-compressed.
    Atlas {
        /// Output file path.
        #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
        output: PathBuf,

        /// Atlas parameters as a JSON string (size, depth_steps, shape_steps, slices, ambient).
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Show a color as hex, Lab, LCh, XYZ, linear RGB and HSB.
    Convert {
        /// "#rrggbb", "lab:L,a,b" (textbook scale) or "hsb:h,s,b" (each in [0, 1]).
        color: String,
    },
    /// Find the contrasting color for a reference color.
    Contrast {
        /// Reference color, in any form `convert` accepts.
        color: String,

        /// Search grid as a JSON string (lightness_steps, hue_steps).
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Show how a color appears under a color-vision deficiency.
    Simulate {
        /// Vision mode (see `list`).
        mode: String,

        color: String,
    },
    /// Perceptual difference between two colors.
    Delta { first: String, second: String },
    /// Render a Lab cross-section with its gamut outline to PNG.
    Slice {
        /// Axis held constant: l, a or b.
        axis: String,

        /// Axis value on the internal scale: L in [0, 1], a/b in [-1, 1].
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Image edge length in pixels.
        #[arg(short, long, default_value_t = 256)]
        size: usize,

        #[arg(short, long, default_value = "slice.png")]
        output: PathBuf,
    },
    /// Extract one image of an atlas file to PNG.
    Preview {
        /// Atlas file written by `atlas`.
        atlas: PathBuf,

        /// Axis block: l, a or b.
        axis: String,

        /// Image index within the block.
        index: usize,

        /// Parameters the atlas was built with, as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,
    },
    /// List the colors of a palette file or built-in palette.
    Palette {
        /// Palette file path or built-in palette name.
        source: String,
    },
    /// List vision modes, built-in palettes and Lab axes.
    List,
}

fn parse_params(text: &str) -> Result<Value, CliError> {
    serde_json::from_str(text).map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))
}

fn parse_triple(text: &str) -> Result<[f64; 3], CliError> {
    let parts: Vec<f64> = text
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| CliError::Input(format!("invalid number in '{text}': {e}")))?;
    <[f64; 3]>::try_from(parts)
        .map_err(|_| CliError::Input(format!("expected three comma-separated numbers, got '{text}'")))
}

/// Parses a color argument into its Lab value and displayable sRGB.
fn parse_color(text: &str) -> Result<(Lab, Rgb8), CliError> {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix("lab:") {
        let [l, a, b] = parse_triple(rest)?;
        let lab = Lab {
            l: l / 100.0,
            a: a / 100.0,
            b: b / 100.0,
        };
        return Ok((lab, from_lab(lab)));
    }
    if let Some(rest) = text.strip_prefix("hsb:") {
        let [h, s, v] = parse_triple(rest)?;
        let rgb = hsb_to_rgb(Hsb { h, s, v });
        return Ok((to_lab(rgb), rgb));
    }
    let rgb = Rgb8::from_hex(text)?;
    Ok((to_lab(rgb), rgb))
}

fn textbook(lab: Lab) -> [f64; 3] {
    [lab.l * 100.0, lab.a * 100.0, lab.b * 100.0]
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn build_atlas(output: &Path, params: &AtlasParams, json_mode: bool) -> Result<(), CliError> {
    let atlas = GamutAtlas::build(params)?;
    atlas.write(output)?;
    if json_mode {
        print_json(&json!({
            "output": output.display().to_string(),
            "bytes": atlas.as_bytes().len(),
            "params": params.to_json(),
        }))?;
    } else {
        eprintln!(
            "wrote {} ({} slices per axis, {}x{})",
            output.display(),
            params.slices,
            params.size,
            params.size
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let json_mode = cli.json;
    let command = cli.command.unwrap_or(Command::Atlas {
        output: PathBuf::from(DEFAULT_FILE_NAME),
        params: "{}".into(),
    });

    match command {
        Command::Atlas { output, params } => {
            let params = AtlasParams::from_json(&parse_params(&params)?);
            build_atlas(&output, &params, json_mode)?;
        }
        Command::Convert { color } => {
            let (lab, rgb) = parse_color(&color)?;
            let lch = lab_to_lch(lab);
            let gamut_alpha = from_lab_tolerant(lab).a;
            let xyz = lab_to_xyz(lab);
            let linear = if gamut_alpha == 255 {
                srgb_to_linear(rgb)
            } else {
                lab_to_linear(lab)
            };
            let hsb = rgb_to_hsb(rgb);
            if json_mode {
                print_json(&json!({
                    "hex": rgb.to_hex(),
                    "lab": textbook(lab),
                    "lch": [lch.l * 100.0, lch.c * 100.0, lch.h.to_degrees()],
                    "xyz": [xyz.x, xyz.y, xyz.z],
                    "linear_rgb": [linear.r, linear.g, linear.b],
                    "hsb": hsb,
                    "gamut_alpha": gamut_alpha,
                }))?;
            } else {
                let [l, a, b] = textbook(lab);
                println!("hex         {}", rgb.to_hex());
                println!("Lab         {l:.3}, {a:.3}, {b:.3}");
                println!(
                    "LCh         {:.3}, {:.3}, {:.2}°",
                    lch.l * 100.0,
                    lch.c * 100.0,
                    lch.h.to_degrees()
                );
                println!("XYZ         {:.5}, {:.5}, {:.5}", xyz.x, xyz.y, xyz.z);
                println!("linear RGB  {:.5}, {:.5}, {:.5}", linear.r, linear.g, linear.b);
                println!("HSB         {:.4}, {:.4}, {:.4}", hsb.h, hsb.s, hsb.v);
                let status = match gamut_alpha {
                    255 => "in gamut",
                    0 => "out of gamut (clamped)",
                    _ => "at the gamut edge",
                };
                println!("gamut       {status}");
            }
        }
        Command::Contrast { color, params } => {
            let (lab, rgb) = parse_color(&color)?;
            let params = ContrastParams::from_json(&parse_params(&params)?);
            let found = contrasting_color_with(lab, &params);
            if json_mode {
                print_json(&json!({
                    "reference": rgb.to_hex(),
                    "contrast": found.srgb.to_hex(),
                    "lab": textbook(found.lab),
                    "score": found.score,
                }))?;
            } else {
                println!(
                    "{} -> {} (score {:.2})",
                    rgb.to_hex(),
                    found.srgb.to_hex(),
                    found.score
                );
            }
        }
        Command::Simulate { mode, color } => {
            let mode = VisionMode::from_name(&mode)?;
            let (_, rgb) = parse_color(&color)?;
            let seen = lab_picker_core::simulate(mode, rgb);
            let shift = delta_e_2000(to_lab(rgb), to_lab(seen));
            if json_mode {
                print_json(&json!({
                    "mode": mode,
                    "input": rgb.to_hex(),
                    "simulated": seen.to_hex(),
                    "delta_e": shift,
                }))?;
            } else {
                println!(
                    "{} under {} -> {} (ΔE00 {shift:.2})",
                    rgb.to_hex(),
                    mode.name(),
                    seen.to_hex()
                );
            }
        }
        Command::Delta { first, second } => {
            let (lab1, _) = parse_color(&first)?;
            let (lab2, _) = parse_color(&second)?;
            let de00 = delta_e_2000(lab1, lab2);
            let de76 = delta_e_76(lab1, lab2);
            let category = DeltaECategory::from_delta_e(de00);
            if json_mode {
                print_json(&json!({
                    "ciede2000": de00,
                    "cie76": de76,
                    "category": category.name(),
                }))?;
            } else {
                println!("CIEDE2000  {de00:.4} ({})", category.name());
                println!("CIE76      {de76:.4}");
            }
        }
        Command::Slice {
            axis,
            value,
            size,
            output,
        } => {
            let axis = LabAxis::from_name(&axis)?;
            let rgba = render_lab_slice(axis, value, size, size)?;
            write_png(&rgba, size, size, &output)?;
            info!(axis = axis.name(), value, size, "slice rendered");
            if json_mode {
                print_json(&json!({
                    "axis": axis,
                    "value": value,
                    "size": size,
                    "output": output.display().to_string(),
                }))?;
            } else {
                eprintln!(
                    "rendered {}={value} ({size}x{size}) -> {}",
                    axis.name(),
                    output.display()
                );
            }
        }
        Command::Preview {
            atlas,
            axis,
            index,
            params,
            output,
        } => {
            let axis = LabAxis::from_name(&axis)?;
            let params = AtlasParams::from_json(&parse_params(&params)?);
            let loaded = GamutAtlas::load(&atlas, &params)?;
            let image = loaded.image(axis, index).ok_or_else(|| {
                CliError::Input(format!(
                    "index {index} out of range, atlas has {} slices per axis",
                    params.slices
                ))
            })?;
            write_png(image, params.size, params.size, &output)?;
            let value = axis.value_at(index, params.slices);
            if json_mode {
                print_json(&json!({
                    "axis": axis,
                    "index": index,
                    "value": value,
                    "output": output.display().to_string(),
                }))?;
            } else {
                eprintln!(
                    "extracted {}={value:.4} (index {index}) -> {}",
                    axis.name(),
                    output.display()
                );
            }
        }
        Command::Palette { source } => {
            let palette = if Path::new(&source).exists() {
                Palette::load(&source)?
            } else {
                Palette::from_name(&source)?
            };
            if json_mode {
                print_json(&serde_json::to_value(&palette)?)?;
            } else {
                println!("{} ({} colors)", palette.name, palette.len());
                if !palette.description.is_empty() {
                    println!("{}", palette.description);
                }
                for c in &palette.colors {
                    let [l, a, b] = textbook(to_lab(c.rgb()));
                    println!("  {}  Lab {l:.1}, {a:.1}, {b:.1}", c.to_hex());
                }
            }
        }
        Command::List => {
            let modes = VisionMode::list_names();
            let palettes = Palette::list_names();
            let axes: Vec<&str> = LabAxis::ALL.iter().map(|a| a.name()).collect();
            if json_mode {
                print_json(&json!({
                    "vision_modes": modes,
                    "palettes": palettes,
                    "axes": axes,
                }))?;
            } else {
                println!("Vision modes:");
                for name in modes {
                    println!("  {name}");
                }
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
                println!("Axes:");
                println!("  {}", axes.join(", "));
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lab_picker=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
