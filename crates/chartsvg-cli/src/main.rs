use chartsvg::raster::{RasterError, RasterOptions, svg_to_png};
use chartsvg::{
    Failure, LayoutOptions, Renderer, SmoothingCapability, SvgRenderOptions, Viewport,
};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Convert(Failure),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Convert(err) => write!(f, "{}: {err}", err.reason()),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<Failure> for CliError {
    fn from(value: Failure) -> Self {
        Self::Convert(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Layout,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
    no_smoothing: bool,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    viewport: Viewport,
    chart_id: Option<String>,
    out: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::Render,
            input: None,
            config: None,
            pretty: false,
            no_smoothing: false,
            render_format: RenderFormat::Svg,
            render_scale: 1.0,
            background: None,
            viewport: Viewport::default(),
            chart_id: None,
            out: None,
        }
    }
}

fn usage() -> &'static str {
    "chartsvg-cli\n\
\n\
USAGE:\n\
  chartsvg-cli [render] [--format svg|png] [--scale <n>] [--background <css-color>] [--width <px>] [--height <px>] [--dpi <n>] [--id <chart-id>] [--config <path>] [--no-smoothing] [--out <path>] [<path>|-]\n\
  chartsvg-cli layout [--pretty] [--width <px>] [--height <px>] [--dpi <n>] [--config <path>] [--no-smoothing] [<path>|-]\n\
\n\
NOTES:\n\
  - Input is a chart widget JSON object; if <path> is omitted or '-', it is read from stdin.\n\
  - The default image is 800x500 at 100 dpi.\n\
  - --config deep-merges a JSON file over the built-in palette, theme tokens and styles.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG output defaults to writing next to the input file (or ./out.png for stdin).\n\
  - layout prints the computed geometry as JSON.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a str, CliError> {
    it.next()
        .map(String::as_str)
        .ok_or(CliError::Usage(usage()))
}

fn parse_dimension(value: &str) -> Result<u32, CliError> {
    match value.trim().parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(CliError::Usage(usage())),
    }
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "layout" => args.command = Command::Layout,
            "--pretty" => args.pretty = true,
            "--no-smoothing" => args.no_smoothing = true,
            "--format" => {
                args.render_format = next_value(&mut it)?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let scale = next_value(&mut it)?
                    .parse::<f32>()
                    .map_err(|_| CliError::Usage(usage()))?;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.render_scale = scale;
            }
            "--background" => {
                let bg = next_value(&mut it)?.trim();
                args.background = (!bg.is_empty()).then(|| bg.to_string());
            }
            "--width" => args.viewport.width = parse_dimension(next_value(&mut it)?)?,
            "--height" => args.viewport.height = parse_dimension(next_value(&mut it)?)?,
            "--dpi" => args.viewport.dpi = parse_dimension(next_value(&mut it)?)?,
            "--id" => args.chart_id = Some(next_value(&mut it)?.to_string()),
            "--config" => args.config = Some(next_value(&mut it)?.to_string()),
            "--out" => args.out = Some(next_value(&mut it)?.to_string()),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

fn build_renderer(args: &Args) -> Result<Renderer, CliError> {
    let mut renderer = Renderer::new();
    if let Some(path) = args.config.as_deref() {
        let site_config: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        renderer = renderer.with_site_config(site_config);
    }
    if args.no_smoothing {
        renderer = renderer.with_layout_options(LayoutOptions {
            smoothing: SmoothingCapability::Unavailable,
            ..LayoutOptions::default()
        });
    }
    Ok(renderer.with_svg_options(SvgRenderOptions {
        chart_id: args.chart_id.clone(),
    }))
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let widget: Value = serde_json::from_str(&text)?;
    let renderer = build_renderer(&args)?;

    match args.command {
        Command::Layout => {
            let layout = renderer.layout_widget(&widget, args.viewport)?;
            write_json(&layout, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let svg = renderer.convert_widget(&widget, args.viewport)?;
            match args.render_format {
                RenderFormat::Svg => write_text(&svg, args.out.as_deref())?,
                RenderFormat::Png => {
                    let bytes = svg_to_png(
                        &svg,
                        &RasterOptions {
                            scale: args.render_scale,
                            background: args.background.clone(),
                        },
                    )?;
                    let out = args.out.clone().unwrap_or_else(|| {
                        default_raster_out_path(args.input.as_deref(), "png")
                            .to_string_lossy()
                            .to_string()
                    });
                    if out == "-" {
                        use std::io::Write;
                        std::io::stdout().lock().write_all(&bytes)?;
                    } else {
                        std::fs::write(out, bytes)?;
                    }
                }
            }
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Convert(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
