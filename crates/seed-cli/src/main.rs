use std::io::Read;

use log::debug;
use seed_adapters::{IntoSeedValue, Tagged};
use seed_core::{KeyCollisionPolicy, SeedCalculator, SeedConfig, SeedError};

const USAGE: &str = "Uso: seed-cli <seed|bytes|digest> [--tagged] [--max-depth <N>] [--reject-collisions] [--json '<JSON>' | --file <PATH>]";

struct Args {
    command: String,
    tagged: bool,
    config: SeedConfig,
    json: Option<String>,
    file: Option<String>,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let command = args.get(1)?.clone();
    if !matches!(command.as_str(), "seed" | "bytes" | "digest") {
        return None;
    }
    // Valores base desde entorno / .env; las flags los sobreescriben.
    let mut parsed = Args { command,
                            tagged: false,
                            config: SeedConfig::from_env(),
                            json: None,
                            file: None };
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--tagged" => parsed.tagged = true,
            "--reject-collisions" => parsed.config.key_collisions = KeyCollisionPolicy::Reject,
            "--max-depth" => {
                i += 1;
                parsed.config.max_depth = args.get(i)?.parse().ok()?;
            }
            "--json" => {
                i += 1;
                parsed.json = Some(args.get(i)?.clone());
            }
            "--file" => {
                i += 1;
                parsed.file = Some(args.get(i)?.clone());
            }
            _ => return None,
        }
        i += 1;
    }
    Some(parsed)
}

fn read_input(args: &Args) -> Result<String, std::io::Error> {
    match (&args.json, &args.file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => std::fs::read_to_string(path),
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn exit_code(err: &SeedError) -> i32 {
    match err {
        SeedError::SeedComputation(_) => 4,
        SeedError::StructuralLimit { .. } | SeedError::KeyCollision(_) => 5,
    }
}

fn main() {
    // Cargar .env si existe para obtener SEED_MAX_DEPTH / SEED_KEY_COLLISIONS
    seed_core::init_dotenv();
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                                                  tracing_subscriber::EnvFilter::new("warn")
                                              }))
                             .with_writer(std::io::stderr)
                             .init();

    let raw: Vec<String> = std::env::args().collect();
    let args = match parse_args(&raw) {
        Some(a) => a,
        None => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let text = match read_input(&args) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("[seed-cli] input error: {e}");
            std::process::exit(3);
        }
    };
    let doc: serde_json::Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("[seed-cli] JSON parse error: {e}");
            std::process::exit(3);
        }
    };
    debug!("parsed {} bytes of JSON (tagged={})", text.len(), args.tagged);

    let tagged = Tagged(&doc);
    let converted = if args.tagged { tagged.to_seed_value(&args.config) } else { doc.to_seed_value(&args.config) };
    let calc = SeedCalculator::new(args.config.clone());
    let outcome = converted.and_then(|value| match args.command.as_str() {
                                         "bytes" => calc.canonical_bytes(&value).map(|b| to_hex(&b)),
                                         "digest" => calc.digest(&value).map(|h| format!("{h:016x}")),
                                         _ => calc.seed_for(&value).map(|s| s.to_string()),
                                     });

    match outcome {
        Ok(line) => println!("{line}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(exit_code(&e));
        }
    }
}
