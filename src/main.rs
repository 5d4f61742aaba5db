use std::fs::File;
use std::io::{self, Read};

use anyhow::Context;
use clap::{Parser, Subcommand};

use tonelink_rs::constants::{
    PREAMBLE_SYMBOLS, SAMPLE_RATE_HZ, SYMBOL_BYTES, SYMBOL_FRAMES, SYMBOL_MS, SYNC_WORD,
    TONE_FREQS,
};
use tonelink_rs::util::hex::format_hex_compact;
use tonelink_rs::{init_logger, log_info, Listener, Message, Receiver};

#[derive(Parser)]
#[command(name = "tonelink-cli")]
#[command(about = "CLI tool for the 4-FSK acoustic link")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a raw PCM stream (s16le mono), from a file or stdin with "-"
    Decode {
        input: String,
        /// Print decoded messages as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Print the fixed link parameters
    Params,
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();
    match cli.command {
        Commands::Decode { input, json } => decode(&input, json),
        Commands::Params => {
            params();
            Ok(())
        }
    }
}

fn decode(input: &str, json: bool) -> anyhow::Result<()> {
    let mut reader: Box<dyn Read> = if input == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(File::open(input).with_context(|| format!("opening {input}"))?)
    };

    let mut listener = Listener {
        on_packet: Some(Box::new(move |payload: &[u8]| {
            match Message::decode(payload) {
                Ok(msg) if json => match serde_json::to_string(&msg) {
                    Ok(line) => println!("{line}"),
                    Err(e) => log::error!("serializing message: {e}"),
                },
                Ok(msg) => {
                    let dst = if msg.is_broadcast() {
                        "broadcast".to_string()
                    } else {
                        msg.dst.to_string()
                    };
                    println!("[{:?}] {} -> {}: {}", msg.kind, msg.src, dst, msg.text());
                }
                // Payloads that are not inner messages are still valid
                // packets; show them raw.
                Err(_) => println!("raw payload: {}", format_hex_compact(payload)),
            }
        })),
        ..Listener::default()
    };

    let mut receiver = Receiver::new();
    let stats = receiver.run(&mut reader, &mut listener)?;
    log_info(&format!(
        "session complete: {} windows, {} packets, {} CRC errors, {} desyncs",
        stats.windows_processed, stats.packets_received, stats.crc_errors, stats.desyncs
    ));
    Ok(())
}

fn params() {
    println!("sample rate:   {SAMPLE_RATE_HZ} Hz");
    println!("symbol window: {SYMBOL_MS} ms ({SYMBOL_FRAMES} frames, {SYMBOL_BYTES} bytes)");
    println!("tones:         {TONE_FREQS:?} Hz");
    println!("preamble run:  {PREAMBLE_SYMBOLS} symbols");
    println!("sync word:     {SYNC_WORD:?}");
}
