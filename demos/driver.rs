use chain_hash::HashMap;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "capacity", default_value_t = chain_hash::DEFAULT_CAPACITY)]
    capacity: usize,

    #[arg(short = 'l', long = "load-factor", default_value_t = chain_hash::DEFAULT_LOAD_FACTOR)]
    load_factor: f64,

    /// Print every bucket chain after the inserts.
    #[arg(short = 'd', long = "dump")]
    dump: bool,

    /// Pairs to insert, written as KEY=VALUE.
    #[arg(value_parser = parse_pair)]
    pairs: Vec<(String, String)>,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut map = match HashMap::with_capacity_and_load_factor(args.capacity, args.load_factor) {
        Ok(map) => map,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let pairs = if args.pairs.is_empty() {
        vec![
            ("k1".to_string(), "v1".to_string()),
            ("k2".to_string(), "v2".to_string()),
        ]
    } else {
        args.pairs
    };

    for (key, value) in pairs {
        if let Some(previous) = map.set(key.clone(), value) {
            println!("Updated {key} (was {previous})");
        }
    }

    println!(
        "{} keys in {} buckets (load factor {})",
        map.length(),
        map.capacity(),
        map.load_factor()
    );
    for key in map.keys() {
        println!("{key} = {}", map[key.as_str()]);
    }

    if args.dump {
        println!("{map}");
    }
}
