use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use tracing::error;

use binrelay_cli::client;
use binrelay_cli::config::Config;
use common::log::tracing_factory::TracingFactory;

#[derive(Parser, Debug)]
#[command(name = "binrelay")]
#[command(about = "MySQL binlog CDC relay: filters row changes into an HTTP sink")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct CliArgs {
    #[arg(short = 'u', value_name = "user", default_value = "root", help = "mysql user")]
    user: String,

    #[arg(short = 'p', value_name = "password", default_value = "", help = "mysql password")]
    pass: String,

    #[arg(
        short = 'h',
        long = "host",
        value_name = "host",
        default_value = "127.0.0.1",
        help = "mysql server ip address"
    )]
    host: String,

    #[arg(short = 'P', value_name = "port", default_value_t = 3306, help = "mysql server port")]
    port: u16,

    #[arg(
        short = 'd',
        value_name = "url",
        default_value = "http://localhost:8888/binrelay.data",
        help = "destination for binlog data"
    )]
    dest: String,

    #[arg(short = 'c', value_name = "FILE", help = "config file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "generate a sample config and exit")]
    genconf: bool,

    #[arg(short = 'v', help = "show version")]
    version: bool,

    #[arg(long, help = "enable debug logging")]
    debug: bool,

    #[arg(long, action = ArgAction::Help, help = "print help")]
    help: Option<bool>,
}

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let args = CliArgs::parse();

    if args.version {
        println!("binrelay v{}", env!("CARGO_PKG_VERSION"));
        return 0;
    }

    let config = match Config::load(
        &args.user,
        &args.pass,
        &args.host,
        args.port,
        &args.dest,
        args.config.as_deref(),
    ) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return 1;
        }
    };

    if args.genconf {
        return match config.sample_json() {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(err) => {
                eprintln!("error: {}", err);
                1
            }
        };
    }

    TracingFactory::init_log(args.debug);

    match client::start(&config) {
        Ok(()) => 0,
        Err(err) => {
            error!("error: {}", err);
            1
        }
    }
}
