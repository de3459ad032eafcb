use std::process::ExitCode;
use std::sync::Arc;

use dotenv::dotenv;
use geo::Point;
use log::{debug, error, info, warn};
use pk_geo::Crs;

use pk_tools::tools::{
    Host, IdentifyTool, Level, LocateTool, MapTool, Marker, MarkerId, MeasureTool, Notice,
};
use pk_tools::{Config, Layer};

const USAGE: &str = "usage: pk_tools <layer-file> identify <x> <y>
       pk_tools <layer-file> locate <road> <km> <m>
       pk_tools <layer-file> measure <x1> <y1> <x2> <y2>";

/// Writes notices to standard output. Markers and map moves are only logged.
struct ConsoleHost {
    crs: Crs,
    next_marker: MarkerId,
}

impl Host for ConsoleHost {
    fn map_crs(&self) -> Crs {
        self.crs
    }

    fn add_marker(&mut self, marker: Marker) -> MarkerId {
        self.next_marker += 1;
        debug!("Marker {} ({} {}) at {:?}", self.next_marker, marker.style, marker.shape, marker.position);
        self.next_marker
    }

    fn remove_marker(&mut self, id: MarkerId) {
        debug!("Removed marker {id}");
    }

    fn push_message(&mut self, notice: Notice) {
        match notice.level {
            Level::Info => info!("{}: {}", notice.title, notice.text),
            Level::Warning => warn!("{}: {}", notice.title, notice.text),
        }

        println!("{}", notice.text);
        if let Some(link) = &notice.link {
            println!("  {link}");
        }

        for copyable in &notice.copy {
            println!("  {}: {}", copyable.label, copyable.text);
        }
    }

    fn choose_layer(&mut self, names: &[&str]) -> Option<usize> {
        debug!("Choosing the first of {names:?}");
        Some(0)
    }

    fn set_center(&mut self, point: Point, scale: f64) {
        info!("Centering on {point:?} at 1:{scale}");
    }
}

fn coordinate(value: &str) -> Result<f64, Box<dyn std::error::Error>> {
    value
        .parse::<f64>()
        .map_err(|_| format!("invalid coordinate '{value}'").into())
}

fn run(args: &[String]) -> Result<bool, Box<dyn std::error::Error>> {
    let (path, command) = match args {
        [path, command, ..] => (path, command.as_str()),
        _ => return Err(USAGE.into()),
    };

    let config = Config::from_env()?;
    let layers = [Arc::new(Layer::from_path(path)?)];

    let mut host = ConsoleHost {
        crs: config.map_crs,
        next_marker: 0,
    };

    match (command, &args[2..]) {
        ("identify", [x, y]) => {
            let mut tool = IdentifyTool::new(config);
            if !tool.activate(&mut host, &layers) {
                return Ok(false);
            }

            tool.on_click(&mut host, Point::new(coordinate(x)?, coordinate(y)?));
            Ok(tool.session().is_some_and(|session| !session.history().is_empty()))
        }
        ("locate", [road, km, m]) => {
            let mut tool = LocateTool::new(config);
            if !tool.activate(&mut host, &layers) {
                return Ok(false);
            }

            match tool.submit(&mut host, road, km, m) {
                Some(entry) => {
                    tool.zoom_to(&mut host, entry.point());
                    Ok(true)
                }
                None => Ok(false),
            }
        }
        ("measure", [x1, y1, x2, y2]) => {
            let mut tool = MeasureTool::new(config);
            if !tool.activate(&mut host, &layers) {
                return Ok(false);
            }

            for (x, y) in [(x1, y1), (x2, y2)] {
                match tool.measure(&mut host, Point::new(coordinate(x)?, coordinate(y)?)) {
                    Ok(Some(_)) => return Ok(true),
                    Ok(None) => continue,
                    Err(err) => {
                        pk_tools::tools::report(&mut host, MeasureTool::TITLE, err);
                        return Ok(false);
                    }
                }
            }

            Ok(false)
        }
        _ => Err(USAGE.into()),
    }
}

fn main() -> ExitCode {
    dotenv().ok();

    #[cfg(feature = "tracing")]
    pk_tools::util::trace::initialize_tracer();
    #[cfg(not(feature = "tracing"))]
    env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
