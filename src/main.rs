// SPDX-License-Identifier: MPL-2.0
//! Renders toasts into a virtual document and prints the resulting markup,
//! once right after creation and once after the clock has moved on.

use bulma_toast::config::{self, Animation, Position, ToastOptions, DEFAULT_DURATION_MS};
use bulma_toast::dom::Document;
use bulma_toast::error::Result;
use bulma_toast::notifications::ToastService;
use bulma_toast::runtime::{Runtime, VirtualLoop};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const HELP: &str = "\
bulma-toast: preview toast markup

USAGE:
  bulma-toast --message <MARKUP> [OPTIONS]

OPTIONS:
  --message <MARKUP>        Toast content (required)
  --position <POS>          top-left, top-right, top-center, bottom-left,
                            bottom-right, bottom-center or center
  --duration <MS>           Lifetime in milliseconds
  --extra-classes <CLASSES> Classes added next to `notification`
  --animate-in <NAME>       Entrance animation (e.g. fadeIn)
  --animate-out <NAME>      Exit animation (e.g. fadeOut)
  --speed <NAME>            Animation speed class suffix
  --dismissible             Add a close button
  --pause-on-hover          Pause the countdown while hovered
  --single                  Keep at most one toast per container
  --no-close-on-click       Do not dismiss when the toast is clicked
  --count <N>               Number of toasts to show [default: 1]
  --at <MS>                 Second snapshot time [default: the duration]
  --config <PATH>           Defaults file instead of the user settings
  -v, --verbose             Log debug output
  -h, --help                Print this help
";

struct Args {
    message: String,
    position: Option<Position>,
    duration: Option<u64>,
    extra_classes: Option<String>,
    animate_in: Option<String>,
    animate_out: Option<String>,
    speed: Option<String>,
    dismissible: bool,
    pause_on_hover: bool,
    single: bool,
    no_close_on_click: bool,
    count: usize,
    at: Option<u64>,
    config: Option<PathBuf>,
    verbose: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let parsed = Args {
        dismissible: args.contains("--dismissible"),
        pause_on_hover: args.contains("--pause-on-hover"),
        single: args.contains("--single"),
        no_close_on_click: args.contains("--no-close-on-click"),
        verbose: args.contains(["-v", "--verbose"]),
        message: args.value_from_str("--message")?,
        position: args.opt_value_from_str("--position")?,
        duration: args.opt_value_from_str("--duration")?,
        extra_classes: args.opt_value_from_str("--extra-classes")?,
        animate_in: args.opt_value_from_str("--animate-in")?,
        animate_out: args.opt_value_from_str("--animate-out")?,
        speed: args.opt_value_from_str("--speed")?,
        count: args.opt_value_from_str("--count")?.unwrap_or(1),
        at: args.opt_value_from_str("--at")?,
        config: args.opt_value_from_str("--config")?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("Ignoring unexpected arguments: {remaining:?}");
    }
    Ok(Some(parsed))
}

impl Args {
    fn options(&self) -> ToastOptions {
        let mut options = ToastOptions::new(self.message.as_str());
        options.position = self.position;
        options.duration = self.duration;
        options.extra_classes = self.extra_classes.clone();
        if self.dismissible {
            options.dismissible = Some(true);
        }
        if self.pause_on_hover {
            options.pause_on_hover = Some(true);
        }
        if self.single {
            options.single = Some(true);
        }
        if self.no_close_on_click {
            options.close_on_click = Some(false);
        }
        if self.animate_in.is_some() || self.animate_out.is_some() {
            options.animate = Some(Animation {
                entrance: self.animate_in.clone(),
                exit: self.animate_out.clone(),
                speed: self.speed.clone(),
            });
        }
        options
    }
}

fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let defaults = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };

    let event_loop = VirtualLoop::new();
    let mut service = ToastService::new(Document::new(), Runtime::from_virtual(&event_loop));
    service.set_defaults(defaults);

    let options = args.options();
    for _ in 0..args.count {
        service.toast(options.clone())?;
    }
    println!("t=0ms\n{}", service.document().body_html());

    let at = args.at.unwrap_or_else(|| {
        service
            .defaults()
            .merge(&options)
            .duration
            .unwrap_or(DEFAULT_DURATION_MS)
    });
    event_loop.advance_ms(at);
    println!("t={at}ms\n{}", service.document().body_html());

    Ok(())
}
