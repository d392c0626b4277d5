//! Interactive console host for the modeling session.
//!
//! Stands in for the map UI: commands typed on stdin become parameter
//! events, and overlay/legend/indicator updates print as they happen.

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use foundation::{LatLng, LatLngBounds};
use layers::{IndicatorState, TileSurface};
use model::{ParameterSnapshot, Polarity, WeightValue};
use runtime::ParameterEvent;
use session::{Endpoints, ModelingSession, Notice, SessionConfig, SessionHandle};
use streaming::HttpGateway;

#[derive(Parser, Debug)]
#[command(author, version, about = "Console driver for the priority overlay session")]
struct Args {
    /// Class-breaks endpoint
    #[arg(long, default_value = "http://localhost:8080/gt/breaks")]
    breaks_url: String,

    /// Tile template endpoint; keeps its {z}/{x}/{y} placeholders
    #[arg(long, default_value = "http://localhost:8080/gt/tile/{z}/{x}/{y}.png")]
    tile_url: String,

    /// Zip-code lookup endpoint
    #[arg(long, default_value = "http://localhost:8080/gt/masks/zip-codes")]
    boundary_url: String,

    /// Initial view center as "lat,lng" (overrides the default area)
    #[arg(long)]
    center: Option<String>,

    /// Half-size in meters of the box built around --center
    #[arg(long, default_value_t = 5000.0)]
    radius: f64,

    /// Preset to apply on startup
    #[arg(long)]
    preset: Option<String>,

    /// Previously exported parameters (JSON object from `export`)
    #[arg(long)]
    params: Option<String>,
}

/// Default view: the Minneapolis / St. Paul area the datasets cover.
fn default_bounds() -> LatLngBounds {
    LatLngBounds::new(
        LatLng::new(44.63635, -93.62626),
        LatLng::new(45.27205, -92.72795),
    )
}

/// Map-widget stand-in: overlay operations just print.
struct PrintSurface;

impl TileSurface for PrintSurface {
    fn add_overlay(&mut self, url: &str, opacity: f64) {
        println!("overlay: added (opacity {opacity})\n  {url}");
    }
    fn set_overlay_url(&mut self, url: &str) {
        println!("overlay: updated\n  {url}");
    }
    fn set_overlay_opacity(&mut self, opacity: f64) {
        println!("overlay: opacity {opacity}");
    }
    fn remove_overlay(&mut self) {
        println!("overlay: removed");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let bounds = match &args.center {
        Some(center) => match parse_center(center) {
            Some(c) => LatLngBounds::from_center(c, args.radius),
            None => {
                eprintln!("invalid --center, expected \"lat,lng\"");
                return;
            }
        },
        None => default_bounds(),
    };

    let mut config = SessionConfig::new(
        Endpoints {
            breaks_url: args.breaks_url,
            tile_url: args.tile_url,
            boundary_url: args.boundary_url,
        },
        bounds,
    );
    config.preset = args.preset;
    if let Some(params) = &args.params {
        match parse_params(params) {
            Some(snapshot) => config.snapshot = Some(snapshot),
            None => {
                eprintln!("invalid --params, expected the JSON object `export` prints");
                return;
            }
        }
    }

    let gateway = HttpGateway::new();
    let (modeling, handle) = ModelingSession::new(
        config,
        Arc::new(gateway.clone()),
        Arc::new(gateway),
        PrintSurface,
    );
    tokio::spawn(modeling.run());
    info!("session started");

    let events = handle.events.clone();
    let snapshot_rx = handle.snapshot_changes.clone();
    spawn_watchers(handle);

    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if !dispatch(&events, &snapshot_rx, &line, args.radius) {
            break;
        }
    }
}

fn spawn_watchers(handle: SessionHandle) {
    let mut legend_rx = handle.legend_changes;
    tokio::spawn(async move {
        while legend_rx.changed().await.is_ok() {
            let entries = legend_rx.borrow_and_update().clone();
            if entries.is_empty() {
                println!("legend: (no active variables)");
            }
            for e in &entries {
                println!("legend: {} [{} .. {}] weight {:+}", e.title, e.less, e.more, e.weight);
            }
        }
    });

    let mut preset_rx = handle.preset_changes;
    tokio::spawn(async move {
        while preset_rx.changed().await.is_ok() {
            let selection = preset_rx.borrow_and_update().clone();
            match selection.id {
                Some(id) => println!("preset: {id}"),
                None if selection.weights.is_empty() => println!("preset: (none)"),
                None => println!("preset: custom {:?}", selection.weights),
            }
        }
    });

    let mut indicator_rx = handle.indicator_changes;
    tokio::spawn(async move {
        while indicator_rx.changed().await.is_ok() {
            let state = indicator_rx.borrow_and_update().clone();
            match state {
                IndicatorState::Hidden => {}
                IndicatorState::Loading(text) => println!("status: {text}..."),
                IndicatorState::Error(text) => println!("status: error: {text}"),
            }
        }
    });

    let mut notices = handle.notices;
    tokio::spawn(async move {
        while let Some(notice) = notices.recv().await {
            match notice {
                Notice::BoundaryAdded(id) => println!("zip: added {id}"),
                Notice::BoundaryLookupFailed { code, message } => {
                    println!("zip: {code}: {message}")
                }
            }
        }
    });
}

/// Handle one input line. Returns false to quit.
fn dispatch(
    events: &runtime::ParameterBus,
    snapshot_rx: &tokio::sync::watch::Receiver<ParameterSnapshot>,
    line: &str,
    radius: f64,
) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [] => {}
        ["quit"] | ["exit"] => return false,
        ["help"] => print_help(),
        ["vars"] => {
            for v in catalog::variables() {
                println!("  {}\n    {} ({} .. {})", v.source, v.title, v.less, v.more);
            }
        }
        ["presets"] => {
            for id in catalog::presets::preset_ids() {
                println!("  {id}");
            }
        }
        ["classes", source] => match catalog::mask_source(source) {
            Some(m) => {
                for c in m.choices {
                    println!("  {} ({})", c.name, c.title);
                }
            }
            None => println!("unknown mask source: {source}"),
        },
        ["on", source] => match resolve_variable(source) {
            Some(source) => events.push(ParameterEvent::VariableToggled {
                source,
                active: true,
            }),
            None => println!("unknown variable: {source}"),
        },
        ["off", source] => match resolve_variable(source) {
            Some(source) => events.push(ParameterEvent::VariableToggled {
                source,
                active: false,
            }),
            None => println!("unknown variable: {source}"),
        },
        ["weight", source, magnitude] => {
            match (resolve_variable(source), magnitude.parse::<i32>()) {
                (Some(source), Ok(raw)) => {
                    let value = WeightValue::resolve(raw, catalog::weight_choices());
                    if let WeightValue::Custom(v) = value {
                        println!("note: {v} is outside the usual choices, using it anyway");
                    }
                    events.push(ParameterEvent::WeightChanged {
                        source,
                        magnitude: value.value(),
                    })
                }
                _ => println!("usage: weight <variable> <0..5>"),
            }
        }
        ["export"] => {
            let map = snapshot_rx.borrow().to_json_map();
            match serde_json::to_string(&map) {
                Ok(json) => println!("{json}"),
                Err(err) => println!("export failed: {err}"),
            }
        }
        ["polarity", source, which] => {
            let polarity = match *which {
                "less" => Some(Polarity::Less),
                "neutral" => Some(Polarity::Neutral),
                "more" => Some(Polarity::More),
                _ => None,
            };
            match (resolve_variable(source), polarity) {
                (Some(source), Some(polarity)) => {
                    events.push(ParameterEvent::PolarityChanged { source, polarity })
                }
                _ => println!("usage: polarity <variable> less|neutral|more"),
            }
        }
        ["threshold", position] => match position.parse() {
            Ok(position) => events.push(ParameterEvent::ThresholdMoved { position }),
            Err(_) => println!("usage: threshold <position>"),
        },
        ["transparency", percent] => match percent.parse() {
            Ok(percent) => events.push(ParameterEvent::TransparencyChanged { percent }),
            Err(_) => println!("usage: transparency <0..100>"),
        },
        ["mask", source, names] => {
            let checked = if *names == "all" {
                catalog::class_names(source)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            } else {
                names.split(',').map(str::to_string).collect()
            };
            events.push(ParameterEvent::RasterMaskChanged {
                source: source.to_string(),
                checked,
            });
        }
        ["zip", "add", code] => events.push(ParameterEvent::BoundaryAdd {
            code: code.to_string(),
        }),
        ["zip", "rm", id] => events.push(ParameterEvent::BoundaryRemove { id: id.to_string() }),
        ["center", lat, lng] => match (lat.parse(), lng.parse()) {
            (Ok(lat), Ok(lng)) => events.push(ParameterEvent::BoundsChanged(
                LatLngBounds::from_center(LatLng::new(lat, lng), radius),
            )),
            _ => println!("usage: center <lat> <lng>"),
        },
        ["bounds", west, south, east, north] => {
            match (west.parse(), south.parse(), east.parse(), north.parse()) {
                (Ok(w), Ok(s), Ok(e), Ok(n)) => events.push(ParameterEvent::BoundsChanged(
                    LatLngBounds::new(LatLng::new(s, w), LatLng::new(n, e)),
                )),
                _ => println!("usage: bounds <west> <south> <east> <north>"),
            }
        }
        ["preset", id] => events.push(ParameterEvent::PresetApplied { id: id.to_string() }),
        _ => println!("unrecognized command (try `help`)"),
    }
    true
}

/// Accept either a full source id or any unambiguous fragment of one.
fn resolve_variable(arg: &str) -> Option<String> {
    let matches: Vec<&str> = catalog::variables()
        .iter()
        .map(|v| v.source)
        .filter(|source| source.contains(arg))
        .collect();
    match matches.as_slice() {
        [source] => Some((*source).to_string()),
        _ => None,
    }
}

fn parse_params(arg: &str) -> Option<ParameterSnapshot> {
    let value: serde_json::Value = serde_json::from_str(arg).ok()?;
    match value {
        serde_json::Value::Object(map) => ParameterSnapshot::from_json_map(map).ok(),
        _ => None,
    }
}

fn parse_center(arg: &str) -> Option<LatLng> {
    let (lat, lng) = arg.split_once(',')?;
    Some(LatLng::new(
        lat.trim().parse().ok()?,
        lng.trim().parse().ok()?,
    ))
}

fn print_help() {
    println!(
        "commands:\n  \
         vars | presets | classes <mask-source>\n  \
         on <variable> | off <variable>\n  \
         weight <variable> <0..5> | polarity <variable> less|neutral|more\n  \
         threshold <position> | transparency <0..100>\n  \
         mask <source> <name,name,...|all>\n  \
         zip add <code> | zip rm <id>\n  \
         center <lat> <lng> | bounds <w> <s> <e> <n>\n  \
         preset <id> | export | help | quit"
    );
}
