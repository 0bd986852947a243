use clap::{Args as ClapArgs, Parser, Subcommand};
use jpath_core::SetOptions;
use std::path::{Path, PathBuf};
use tracing::{Level, debug};

#[derive(Parser, Debug)]
#[command(
    name = "jpath",
    about = "Read and edit JSON files by path expression ($.key[0].nested)",
    version
)]
struct Cli {
    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Get value at path
    Get(PathArgs),
    /// List children at path
    List(PathArgs),
    /// Set value (raw JSON) at path; prints or writes with --out
    Set(SetArgs),
    /// Parse a path and print its segments with byte offsets
    Tokens(TokensArgs),
}

#[derive(ClapArgs, Debug)]
struct PathArgs {
    /// JSON file to load
    file: PathBuf,
    /// Path expression, e.g. $.obj.arr[1]
    #[arg(long)]
    path: String,
}

#[derive(ClapArgs, Debug)]
struct SetArgs {
    /// JSON file to load
    file: PathBuf,
    /// Path expression, e.g. $.obj.arr[1]
    #[arg(long)]
    path: String,
    /// New value as raw JSON (e.g., 123, true, "str", {"a":1})
    #[arg(long)]
    value: String,
    /// Optional output .json path to write; otherwise prints to stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// Only overwrite existing keys and elements
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(ClapArgs, Debug)]
struct TokensArgs {
    path: String,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Cmd::Get(a) => cmd_get(a),
        Cmd::List(a) => cmd_list(a),
        Cmd::Set(a) => cmd_set(a),
        Cmd::Tokens(a) => cmd_tokens(a),
    }
}

fn load(file: &Path) -> serde_json::Value {
    debug!(file = %file.display(), "loading");
    jpath_core::load_json_file(file).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(2);
    })
}

fn print_json(v: &serde_json::Value) {
    match serde_json::to_string_pretty(v) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(5);
        }
    }
}

fn cmd_get(args: PathArgs) {
    let v = load(&args.file);
    match jpath_core::try_get(&v, &args.path) {
        Ok(x) => print_json(x),
        Err(e) => {
            debug!(error = %e, "lookup failed");
            eprintln!("not found: {}", args.path);
            std::process::exit(3);
        }
    }
}

fn cmd_list(args: PathArgs) {
    let v = load(&args.file);
    match jpath_core::list_children(&v, &args.path) {
        Ok(children) => {
            for c in children {
                println!(
                    "{}\t{:?}{}",
                    c.key_or_index,
                    c.kind,
                    c.len.map(|n| format!("\t(len={})", n)).unwrap_or_default()
                );
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(3);
        }
    }
}

fn cmd_set(args: SetArgs) {
    let mut v = load(&args.file);
    let new_val: serde_json::Value = serde_json::from_str(&args.value).unwrap_or_else(|e| {
        eprintln!("invalid --value JSON: {}", e);
        std::process::exit(3);
    });
    let opts = if args.strict { SetOptions::strict() } else { SetOptions::default() };
    jpath_core::set(&mut v, &args.path, new_val, opts).unwrap_or_else(|e| {
        eprintln!("error at {}: {}", e.offset(), e.text());
        std::process::exit(4);
    });
    if let Some(out) = args.out {
        jpath_core::write_json_to_file(&out, &v).unwrap_or_else(|e| {
            eprintln!("error writing: {}", e);
            std::process::exit(5);
        });
    } else {
        print_json(&v);
    }
}

fn cmd_tokens(args: TokensArgs) {
    let parsed = jpath_core::parse(&args.path).unwrap_or_else(|e| {
        eprintln!("error at {}: {}", e.offset(), e.text());
        std::process::exit(4);
    });
    for t in parsed.tokens() {
        println!("{}\t{}", t.offset(), t);
    }
}
