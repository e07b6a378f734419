const HELP: &str = "\
keyfob-lights - light GPIO indicators from rtl_433 key-fob events

USAGE:
  keyfob-lights [OPTIONS]

OPTIONS:
  -h, --help            Prints help information
  -c, --config <path>   JSON config file (defaults apply to missing fields)
  --bind <ip>           Address to receive decoder datagrams on
  --port <n>            UDP port (default: 1433)
  --simulate            Use in-memory GPIO instead of /sys/class/gpio
  --no-decoder          Don't launch rtl_433; expect it to be running already
";

use std::net::IpAddr;
use std::path::PathBuf;

use keyfob_lights::config::{GpioBackend, SystemConfig};

#[derive(Debug, Default)]
pub struct AppArgs {
    pub config: Option<PathBuf>,
    pub bind: Option<IpAddr>,
    pub port: Option<u16>,
    pub simulate: bool,
    pub no_decoder: bool,
}

impl AppArgs {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut SystemConfig) {
        if let Some(ip) = self.bind {
            config.network.bind_address = ip;
        }
        if let Some(port) = self.port {
            config.network.port = port;
        }
        if self.simulate {
            config.gpio.backend = GpioBackend::Sim;
        }
        if self.no_decoder {
            config.decoder.enabled = false;
        }
    }
}

pub fn parse_args() -> Result<AppArgs, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let args = AppArgs {
        config: pargs.opt_value_from_str(["-c", "--config"])?,
        bind: pargs.opt_value_from_str("--bind")?,
        port: pargs.opt_value_from_str("--port")?,
        simulate: pargs.contains("--simulate"),
        no_decoder: pargs.contains("--no-decoder"),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        eprintln!("Warning: unused arguments left: {:?}.", remaining);
    }

    Ok(args)
}
