use std::error::Error;
use std::fs;

use chrono::Utc;
use clap::Parser;
use log::info;

use wx_display::forecast::{ForecastCache, Refresh, Response};
use wx_display::{convert, extract, format, Category, Config, Measurement, Observation};

mod cli;

use crate::cli::{Args, Command};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(timezone) = args.timezone {
        config.station.timezone = timezone;
    }

    match args.command {
        Command::Show {
            value,
            unit,
            category,
            to,
            suffix,
        } => {
            let measurement = Measurement::new(Some(value), unit);
            let mut observation = match to.or(config.units.system_for(category)) {
                Some(system) => convert(&measurement, system),
                None => Observation::from(measurement),
            };
            if let Some(suffix) = suffix {
                observation = observation.with_trailer(suffix);
            }
            let display = format(&observation, category)?;
            if category == Category::TimeDelta {
                println!("{}", display.tokens().join(" "));
            } else {
                println!("{display}");
            }
        }
        Command::Forecast { path, now } => {
            let mut cache = ForecastCache::default();
            let fetched = fs::read_to_string(&path)
                .map_err(wx_display::WxError::from)
                .and_then(|json| Response::hourly_from_json(&json));
            if cache.refresh(fetched) == Refresh::KeptStale {
                info!("no forecast could be read from {}", path.display());
            }

            let now = now.unwrap_or_else(|| Utc::now().timestamp());
            let panel = extract(cache.series(), now, &config)?;
            println!(" {:13}{}", "Time", panel.time.format("%d-%m-%Y %H:%M"));
            println!(" {:13}{}", "Valid until", panel.valid());
            println!(" {:13}{}", "Temperature", panel.temp().concat());
            println!(" {:13}{}", "Wind", panel.wind_spd().concat());
            println!(" {:13}{}", "Direction", panel.wind_dir());
            println!(" {:13}{}%", "Precip", panel.precip());
            println!(" {:13}{}", "Icon", panel.weather());
        }
    }

    Ok(())
}
