//! Command-line interface for pbm-bindings

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use pbm::codec::EncodeOptions;
#[cfg(feature = "cli")]
use pbm::limits::Limits;
#[cfg(feature = "cli")]
use pbm::registry;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "pbm")]
#[command(author, version, about = "Inspect and convert VMware PBM (urn:pbm) documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the schema types the tool knows
    Types {
        /// List enumerations instead of complex types
        #[arg(short, long)]
        enums: bool,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the tokens of an enumeration, or check one token
    Enum {
        /// Enumeration name, e.g. PbmComplianceStatus
        #[arg(value_name = "NAME")]
        name: String,

        /// Token to check
        #[arg(value_name = "VALUE")]
        value: Option<String>,
    },

    /// Decode an XML document of a given type to JSON
    Decode {
        /// Schema type of the document's root element
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        type_name: String,

        /// Path to the XML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,

        /// Parse with strict resource limits
        #[arg(long)]
        strict: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the JSON skeleton of a type, ready to fill in for `encode`
    Template {
        /// Schema type
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        type_name: String,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Encode a JSON value of a given type as XML
    Encode {
        /// Schema type of the value
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        type_name: String,

        /// Path to the JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Root element name (defaults to the type name)
        #[arg(short, long)]
        root: Option<String>,

        /// Single-line output without XML declaration
        #[arg(short, long)]
        compact: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Types { enums, json } => cmd_types(enums, json),
        Commands::Enum { name, value } => cmd_enum(name, value),
        Commands::Decode {
            type_name,
            file,
            pretty,
            strict,
            output,
        } => cmd_decode(type_name, file, pretty, strict, output),
        Commands::Template { type_name, pretty } => cmd_template(type_name, pretty),
        Commands::Encode {
            type_name,
            file,
            root,
            compact,
            output,
        } => cmd_encode(type_name, file, root, compact, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn cmd_types(enums: bool, json_output: bool) -> pbm::Result<()> {
    let names = if enums {
        registry::enum_names()
    } else {
        registry::type_names()
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for name in names {
            println!("{}", name);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_enum(name: String, value: Option<String>) -> pbm::Result<()> {
    match value {
        Some(value) => {
            registry::check_enum(&name, &value)?;
            println!("{} is a valid {}", value, name);
        }
        None => {
            for token in registry::enum_values(&name)? {
                println!("{}", token);
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_decode(
    type_name: String,
    file: PathBuf,
    pretty: bool,
    strict: bool,
    output: Option<PathBuf>,
) -> pbm::Result<()> {
    let xml_content = fs::read_to_string(&file)?;
    let limits = if strict { Limits::strict() } else { Limits::default() };

    let value = registry::decode_to_json(&type_name, &xml_content, &limits)?;

    let json_str = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };

    write_output(output, &json_str)
}

#[cfg(feature = "cli")]
fn cmd_template(type_name: String, pretty: bool) -> pbm::Result<()> {
    let value = registry::template_json(&type_name)?;

    if pretty {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", serde_json::to_string(&value)?);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_encode(
    type_name: String,
    file: PathBuf,
    root: Option<String>,
    compact: bool,
    output: Option<PathBuf>,
) -> pbm::Result<()> {
    let json_content = fs::read_to_string(&file)?;
    let value: serde_json::Value = serde_json::from_str(&json_content)?;
    let options = if compact {
        EncodeOptions::compact()
    } else {
        EncodeOptions::default()
    };

    let xml = registry::encode_from_json(&type_name, value, root.as_deref(), &options)?;

    write_output(output, &xml)
}

#[cfg(feature = "cli")]
fn write_output(output: Option<PathBuf>, content: &str) -> pbm::Result<()> {
    if let Some(output_path) = output {
        fs::write(output_path, content)?;
    } else {
        println!("{}", content);
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
