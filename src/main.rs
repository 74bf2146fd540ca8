// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![allow(clippy::uninlined_format_args)]

use std::path;

use svgscene::Canvas;

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn timed<F, T>(perf: bool, name: &str, mut f: F) -> T
where
    F: FnMut() -> T,
{
    let now = std::time::Instant::now();
    let result = f();
    if perf {
        let elapsed = now.elapsed().as_micros() as f64 / 1000.0;
        println!("{}: {:.2}ms", name, elapsed);
    }

    result
}

fn process() -> Result<(), String> {
    let args = match collect_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e.to_string());
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    let svg_data = timed(args.perf, "Reading", || {
        std::fs::read(&args.input).map_err(|_| "failed to open the provided file".to_string())
    })?;

    let opt = svgscene::Options {
        dpi: args.dpi as f64,
        ..svgscene::Options::default()
    };

    let doc = timed(args.perf, "SVG Parsing", || {
        svgscene::Document::from_data_with(&svg_data, &opt).map_err(|e| e.to_string())
    })?;

    let (w, h) = doc.container_size();
    let doc_size = tiny_skia::IntSize::from_wh(w.ceil() as u32, h.ceil() as u32)
        .ok_or("document size is zero")?;
    let size = args
        .fit_to
        .fit_to_size(doc_size)
        .ok_or("target size is zero")?;

    let mut pixmap =
        tiny_skia::Pixmap::new(size.width(), size.height()).ok_or("target size is zero")?;

    if let Some(c) = args.background {
        pixmap.fill(tiny_skia::Color::from_rgba8(c.red(), c.green(), c.blue(), c.alpha()));
    }

    let ts = args.fit_to.fit_to_transform(doc_size);
    timed(args.perf, "Rendering", || {
        let mut canvas = svgscene::PixmapCanvas::new(&mut pixmap);
        canvas.concat(ts);
        doc.render(&mut canvas);
    });

    timed(args.perf, "Saving", || {
        pixmap.save_png(&args.output).map_err(|e| e.to_string())
    })?;

    Ok(())
}

const HELP: &str = "\
svgscene renders a static SVG file into a PNG image.

USAGE:
  svgscene [OPTIONS] <in-svg> <out-png>

  svgscene in.svg out.png
  svgscene -w 1024 in.svg out.png
  svgscene --background white in.svg out.png

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version

  -w, --width LENGTH            Scales the image to the width in pixels
  -h, --height LENGTH           Scales the image to the height in pixels
  -z, --zoom FACTOR             Zooms the image by a factor
      --dpi DPI                 Sets the resolution
                                [default: 96] [possible values: 10..4000]
      --background COLOR        Sets the background color
                                Examples: red, #fff, #fff000

      --quiet                   Disables warnings
      --perf                    Prints performance stats

ARGS:
  <in-svg>                      Input file
  <out-png>                     Output file
";

#[derive(Clone, Copy, PartialEq, Debug)]
enum FitTo {
    /// The document size.
    Original,
    Width(u32),
    Height(u32),
    /// Both sides, keeping the aspect ratio.
    Size(u32, u32),
    Zoom(f32),
}

impl FitTo {
    fn fit_to_size(&self, size: tiny_skia::IntSize) -> Option<tiny_skia::IntSize> {
        match *self {
            FitTo::Original => Some(size),
            FitTo::Width(w) => size.scale_to_width(w),
            FitTo::Height(h) => size.scale_to_height(h),
            FitTo::Size(w, h) => tiny_skia::IntSize::from_wh(w, h).map(|s| size.scale_to(s)),
            FitTo::Zoom(z) => size.scale_by(z),
        }
    }

    fn fit_to_transform(&self, size: tiny_skia::IntSize) -> tiny_skia::Transform {
        match self.fit_to_size(size) {
            Some(fitted) => tiny_skia::Transform::from_scale(
                fitted.width() as f32 / size.width() as f32,
                fitted.height() as f32 / size.height() as f32,
            ),
            None => tiny_skia::Transform::identity(),
        }
    }
}

#[derive(Debug)]
struct CliArgs {
    fit_to: FitTo,
    dpi: u32,
    background: Option<svgvalues::Color>,
    perf: bool,
    quiet: bool,
    input: path::PathBuf,
    output: path::PathBuf,
}

fn collect_args() -> Result<CliArgs, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    let width = input.opt_value_from_fn(["-w", "--width"], parse_length)?;
    let height = input.opt_value_from_fn(["-h", "--height"], parse_length)?;
    let zoom = input.opt_value_from_fn(["-z", "--zoom"], parse_zoom)?;

    let fit_to = match (width, height, zoom) {
        (Some(w), Some(h), _) => FitTo::Size(w, h),
        (Some(w), None, _) => FitTo::Width(w),
        (None, Some(h), _) => FitTo::Height(h),
        (None, None, Some(z)) => FitTo::Zoom(z),
        (None, None, None) => FitTo::Original,
    };

    Ok(CliArgs {
        fit_to,
        dpi: input.opt_value_from_fn("--dpi", parse_dpi)?.unwrap_or(96),
        background: input.opt_value_from_str("--background")?,
        perf: input.contains("--perf"),
        quiet: input.contains("--quiet"),
        input: input.free_from_str()?,
        output: input.free_from_str()?,
    })
}

fn parse_dpi(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if (10..=4000).contains(&n) {
        Ok(n)
    } else {
        Err("DPI out of bounds".to_string())
    }
}

fn parse_length(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid length")?;

    if n > 0 {
        Ok(n)
    } else {
        Err("LENGTH cannot be zero".to_string())
    }
}

fn parse_zoom(s: &str) -> Result<f32, String> {
    let n: f32 = s.parse().map_err(|_| "invalid zoom factor")?;

    if n > 0.0 {
        Ok(n)
    } else {
        Err("ZOOM should be positive".to_string())
    }
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let level = match record.level() {
                log::Level::Error => "Error",
                log::Level::Warn => "Warning",
                log::Level::Info => "Info",
                log::Level::Debug => "Debug",
                log::Level::Trace => "Trace",
            };

            eprintln!(
                "{} (in {}:{}): {}",
                level,
                target,
                record.line().unwrap_or(0),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}
