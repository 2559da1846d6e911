// Route probe - prints how transcripts are routed
//
// Usage:
//   route-probe [--code] [--config <path>] [transcript ...]
// Without transcripts, reads one transcript per line from stdin.
use anyhow::Result;
use spis_voice::{CommandRouter, ParserConfig};
use std::io::BufRead;
use std::path::PathBuf;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut force_code_mode = false;
    let mut config_path: Option<PathBuf> = None;
    let mut transcripts = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--code" => force_code_mode = true,
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config needs a path"))?;
                config_path = Some(PathBuf::from(path));
            }
            _ => transcripts.push(arg),
        }
    }

    let config = match config_path {
        Some(path) => ParserConfig::load_from_path(&path)?,
        None => ParserConfig::load()?,
    };
    let router = CommandRouter::new(&config);

    if transcripts.is_empty() {
        for line in std::io::stdin().lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            print_routed(&router, &line, force_code_mode)?;
        }
    } else {
        for transcript in &transcripts {
            print_routed(&router, transcript, force_code_mode)?;
        }
    }

    Ok(())
}

fn print_routed(router: &CommandRouter, transcript: &str, force_code_mode: bool) -> Result<()> {
    let routed = router.route(transcript, force_code_mode);
    for line in routed.debug_lines() {
        tracing::debug!("{}", line);
    }
    println!("{}", serde_json::to_string_pretty(&routed)?);
    Ok(())
}
