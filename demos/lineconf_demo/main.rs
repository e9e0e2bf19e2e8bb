//! # lineconf demo application
//!
//! Reads a config file into a typed struct and prints the result. It exists
//! to try out the file format and error messages by hand.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example lineconf_demo --features regex -- demos/lineconf_demo/demo.conf
//! ```
//!
//! Without an argument the demo looks for `lineconf-demo.conf` with
//! [`lineconf::find_config`] (`$XDG_CONFIG`, `~/.lineconf-demo.conf`, `/etc`,
//! ..., the working directory).
//!
//! ## Features demonstrated
//!
//! | Feature | Where |
//! |---------|-------|
//! | Built-in types, plural keys | `port`, `order`, `host` |
//! | Plug-in handler | `match` uses `lineconf::handlers::regex` |
//! | Per-field callback | `address` is resolved with a DNS lookup |
//! | `source` | `demo.conf` includes `extra.conf` |

mod config;

use std::net::ToSocketAddrs;
use std::path::PathBuf;
use std::process::ExitCode;

use lineconf::Handlers;

use config::DemoConfig;

const CONFIG_NAME: &str = "lineconf-demo.conf";

fn main() -> ExitCode {
    let Some(path) = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| lineconf::find_config(CONFIG_NAME))
    else {
        eprintln!("no config file given and no {CONFIG_NAME} found");
        return ExitCode::FAILURE;
    };

    lineconf::handlers::regex::register();

    let mut config = DemoConfig::default();
    let handlers = Handlers::new().on("Address", |config: &mut DemoConfig, line: &[String]| {
        let host = line.join(" ");
        let addr = (host.as_str(), 0)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| format!("{host} has no addresses"))?;
        config.address = Some(addr.ip());
        Ok(())
    });

    if let Err(err) = lineconf::parse(&mut config, &path, handlers) {
        eprintln!("Error parsing config: {err}");
        return ExitCode::FAILURE;
    }

    println!("{config:#?}");
    ExitCode::SUCCESS
}
