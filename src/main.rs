//! # slackview CLI
//!
//! Command-line front end for the slackview library.

use std::process;

use clap::Parser as ClapParser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use slackview::SlackviewError;
use slackview::archive::Archive;
use slackview::cli::{Args, Command, ShowArgs};
use slackview::config::ArchiveConfig;
use slackview::core::{DateRange, QueryParams, query_threads};
use slackview::format::{OutputFormat, to_format_string, write_to_format};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("slackview=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(args: Args) -> Result<(), SlackviewError> {
    let archive = Archive::open(ArchiveConfig::new().with_root(&args.root));

    match args.command {
        Command::Channels => {
            let channels = archive.list_channels()?;
            if channels.is_empty() {
                eprintln!("No channels found under {}", args.root.display());
            }
            for channel in channels {
                println!("{}", channel);
            }
            Ok(())
        }
        Command::Show(show) => run_show(&archive, &show),
    }
}

fn run_show(archive: &Archive, show: &ShowArgs) -> Result<(), SlackviewError> {
    if !archive.list_channels()?.contains(&show.channel) {
        return Err(SlackviewError::UnknownChannel(show.channel.clone()));
    }

    let messages = archive.load_and_normalize(&show.channel)?;
    if messages.is_empty() {
        println!("No messages found in the {} channel.", show.channel);
        return Ok(());
    }

    let mut range = DateRange::new();
    if let Some(ref from) = show.from {
        range = range.with_start_str(from)?;
    }
    if let Some(ref to) = show.to {
        range = range.with_end_str(to)?;
    }

    let mut params = QueryParams::new()
        .with_date_range(range)
        .with_sort_order(show.order.into());
    if let Some(ref search) = show.search {
        params = params.with_search(search.clone());
    }
    if let Some(ref ts) = show.ts {
        params = params.with_timestamp(ts.clone());
    }

    let result = query_threads(&messages, &params);
    if let Some(ref warning) = result.validation {
        eprintln!("Warning: {}", warning);
    }

    let format = match (show.format, show.output.as_deref()) {
        (Some(format), _) => OutputFormat::from(format),
        (None, Some(path)) => OutputFormat::from_path(path)?,
        (None, None) => OutputFormat::Text,
    };
    match show.output {
        Some(ref path) => {
            write_to_format(&result, path, format)?;
            println!("Output saved to {}", path);
        }
        None => {
            if format == OutputFormat::Text {
                println!("Data for {} channel", show.channel);
                println!();
            }
            print!("{}", to_format_string(&result, format)?);
        }
    }

    Ok(())
}
