use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::{Parser, Subcommand};

use wx_display::{Category, Unit, UnitSystem};

const ABOUT: &str = "Weather station display formatting";

const LONG_ABOUT: &str = "
Convert and format weather station observations the way the station console shows them, and
pick the current hourly forecast period from a saved WeatherFlow forecast response.

Unit systems and the station timezone are read from an optional JSON configuration file, e.g.

    {\"units\": {\"temp\": \"f\", \"wind\": \"mph\"}, \"station\": {\"timezone\": \"America/Chicago\"}}

Individual settings can be overridden on the command line.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(short, long, help = "JSON configuration file (unit systems and station timezone)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Station timezone, IANA identifier (e.g. Europe/London)")]
    pub timezone: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert and format a single measurement
    Show {
        #[arg(allow_negative_numbers = true, help = "Measured value (\"nan\" for no reading)")]
        value: f64,

        #[arg(help = "Unit the value is in (c, mb, mb/hr, mps, degrees, mm, mm/hr, km, s, ...)")]
        unit: Unit,

        #[arg(help = "Category (Temp, Pressure, Wind, Direction, Precip, TimeDelta, ...)")]
        category: Category,

        #[arg(long, help = "Target unit system, overriding the configured one")]
        to: Option<UnitSystem>,

        #[arg(long, help = "Token carried after the formatted value (e.g. \"ago\")")]
        suffix: Option<String>,
    },

    /// Show the current hourly forecast from a saved forecast response
    Forecast {
        #[arg(help = "WeatherFlow better_forecast JSON response")]
        path: PathBuf,

        #[arg(long, help = "Current time as epoch seconds (defaults to the system clock)")]
        now: Option<i64>,
    },
}
