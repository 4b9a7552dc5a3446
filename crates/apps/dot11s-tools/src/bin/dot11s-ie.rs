use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dot11s_ie::{PeerManagementElement, ReasonCode};
use dot11s_peering::MeshConfig;
use dot11s_tools::{describe_elements, describe_interfaces, encode_hex};

#[derive(Parser, Debug)]
#[command(name = "dot11s-ie", about = "Encode and inspect 802.11s peering elements")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a peer management element and print it as hex
    Encode {
        #[command(subcommand)]
        element: EncodeElement,
    },
    /// Decode a hex element sequence
    Decode {
        #[arg(value_name = "HEX")]
        input: String,
    },
    /// List the interfaces of a mesh config file
    Interfaces {
        #[arg(long)]
        config: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum EncodeElement {
    Open {
        #[arg(long)]
        local: u16,
    },
    Confirm {
        #[arg(long)]
        local: u16,
        #[arg(long)]
        peer: u16,
    },
    Close {
        #[arg(long)]
        local: u16,
        #[arg(long)]
        peer: u16,
        #[arg(long, default_value_t = ReasonCode::Reserved.as_u16())]
        reason: u16,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("dot11s-ie error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Encode { element } => {
            let element = match element {
                EncodeElement::Open { local } => PeerManagementElement::open(local),
                EncodeElement::Confirm { local, peer } => {
                    PeerManagementElement::confirm(local, peer)
                }
                EncodeElement::Close { local, peer, reason } => {
                    PeerManagementElement::close(local, peer, ReasonCode::from(reason))
                }
            };
            log::debug!("encoding {}", element);
            println!("{}", encode_hex(&element)?);
        }
        Command::Decode { input } => {
            let body = hex::decode(input.trim()).context("input is not valid hex")?;
            for line in describe_elements(&body)? {
                println!("{}", line);
            }
        }
        Command::Interfaces { config } => {
            let mesh = MeshConfig::from_path(&config)
                .with_context(|| format!("loading {}", config.display()))?;
            for line in describe_interfaces(&mesh)? {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
