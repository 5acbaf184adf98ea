//! Krater CLI - ML-KEM-1024 key encapsulation command-line tool.

use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use krater_ml_kem::{Ciphertext, DecapsulationKey, EncapsulationKey, Kem, MlKem1024};
use rand::rng;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// ML-KEM-1024 command-line tool
#[derive(Parser)]
#[command(name = "krater")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new key pair
    Keygen {
        /// Output file prefix (creates `<prefix>.pub` and `<prefix>.sec`)
        #[arg(short, long)]
        output: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "hex")]
        format: OutputFormat,
    },

    /// Encapsulate a shared secret using a public key
    Encaps {
        /// Path to the public key file
        #[arg(long = "pub")]
        pubkey: PathBuf,

        /// Output file for ciphertext (writes to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "hex")]
        format: OutputFormat,
    },

    /// Decapsulate a shared secret using a secret key
    Decaps {
        /// Path to the secret key file
        #[arg(long = "key")]
        key: PathBuf,

        /// Path to the ciphertext file (reads from stdin if not specified)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format for shared secret
        #[arg(short, long, value_enum, default_value = "hex")]
        format: OutputFormat,
    },

    /// Display information about the algorithm and object sizes
    Info,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Hexadecimal encoding
    Hex,
    /// Base64 encoding
    Base64,
    /// PEM format
    Pem,
}

/// Encode bytes to the specified format
fn encode_output(data: &[u8], format: OutputFormat, label: &str) -> String {
    match format {
        OutputFormat::Hex => hex::encode(data),
        OutputFormat::Base64 => BASE64.encode(data),
        OutputFormat::Pem => {
            let b64 = BASE64.encode(data);
            let wrapped: String = b64
                .chars()
                .collect::<Vec<_>>()
                .chunks(64)
                .map(|c| c.iter().collect::<String>())
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "-----BEGIN {}-----\n{}\n-----END {}-----",
                label, wrapped, label
            )
        }
    }
}

/// Decode bytes from the specified format
fn decode_input(data: &str, format: OutputFormat) -> Result<Vec<u8>> {
    let data = data.trim();

    // Auto-detect PEM format
    if data.starts_with("-----BEGIN") {
        let lines: Vec<&str> = data.lines().collect();
        if lines.len() < 3 {
            bail!("Invalid PEM format");
        }
        let b64: String = lines[1..lines.len() - 1].join("");
        return BASE64
            .decode(&b64)
            .context("Failed to decode PEM base64 content");
    }

    match format {
        OutputFormat::Hex => hex::decode(data).context("Failed to decode hex"),
        OutputFormat::Base64 => BASE64.decode(data).context("Failed to decode base64"),
        OutputFormat::Pem => bail!("Expected PEM format but not found"),
    }
}

/// Generate an ML-KEM-1024 key pair
fn cmd_keygen(output: &str, format: OutputFormat, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("Generating ML-KEM-1024 key pair...");
    }

    let (dk, ek) =
        MlKem1024::keygen(&mut rng()).map_err(|e| anyhow!("Key generation failed: {e}"))?;

    let pk_encoded = encode_output(ek.as_bytes(), format, "ML-KEM PUBLIC KEY");
    let sk_encoded = encode_output(dk.as_bytes(), format, "ML-KEM SECRET KEY");

    let pub_path = format!("{}.pub", output);
    let sec_path = format!("{}.sec", output);

    fs::write(&pub_path, &pk_encoded).context("Failed to write public key")?;
    fs::write(&sec_path, &sk_encoded).context("Failed to write secret key")?;

    if verbose {
        eprintln!("Public key size: {} bytes", ek.as_bytes().len());
        eprintln!("Secret key size: {} bytes", dk.as_bytes().len());
    }

    println!("Public key written to: {}", pub_path);
    println!("Secret key written to: {}", sec_path);

    Ok(())
}

/// Encapsulate a shared secret
fn cmd_encaps(
    pubkey: &PathBuf,
    output: Option<&PathBuf>,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let pk_data = fs::read_to_string(pubkey).context("Failed to read public key file")?;
    let pk_bytes = decode_input(&pk_data, format)?;

    let ek = EncapsulationKey::from_bytes(&pk_bytes)
        .map_err(|e| anyhow!("Invalid public key: {e}"))?;

    if verbose {
        eprintln!("Public key size: {} bytes", pk_bytes.len());
    }

    let (ct, ss) =
        MlKem1024::encaps(&ek, &mut rng()).map_err(|e| anyhow!("Encapsulation failed: {e}"))?;

    let ct_encoded = encode_output(ct.as_bytes(), format, "ML-KEM CIPHERTEXT");

    if let Some(out_path) = output {
        fs::write(out_path, &ct_encoded).context("Failed to write ciphertext")?;
        if verbose {
            eprintln!("Ciphertext written to: {}", out_path.display());
            eprintln!("Ciphertext size: {} bytes", ct.as_bytes().len());
        }
    } else {
        println!("{}", ct_encoded);
    }

    // The shared secret goes to stdout, or stderr when the ciphertext
    // already occupies stdout.
    let ss_encoded = encode_output(ss.as_ref(), format, "SHARED SECRET");
    if output.is_some() {
        println!("Shared secret: {}", ss_encoded);
    } else {
        eprintln!("Shared secret: {}", ss_encoded);
    }

    Ok(())
}

/// Decapsulate a shared secret
fn cmd_decaps(
    key: &PathBuf,
    input: Option<&PathBuf>,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let sk_data = fs::read_to_string(key).context("Failed to read secret key file")?;
    let sk_bytes = decode_input(&sk_data, format)?;

    let dk = DecapsulationKey::from_bytes(&sk_bytes)
        .map_err(|e| anyhow!("Invalid secret key: {e}"))?;

    if verbose {
        eprintln!("Secret key size: {} bytes", sk_bytes.len());
    }

    let ct_data = if let Some(ct_path) = input {
        fs::read_to_string(ct_path).context("Failed to read ciphertext file")?
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read ciphertext from stdin")?;
        buf
    };
    let ct_bytes = decode_input(&ct_data, format)?;

    let ct = Ciphertext::from_bytes(&ct_bytes).map_err(|e| anyhow!("Invalid ciphertext: {e}"))?;

    if verbose {
        eprintln!("Ciphertext size: {} bytes", ct_bytes.len());
    }

    let ss = MlKem1024::decaps(&dk, &ct).map_err(|e| anyhow!("Decapsulation failed: {e}"))?;

    println!("{}", encode_output(ss.as_ref(), format, "SHARED SECRET"));

    Ok(())
}

/// Display information about the algorithm
fn cmd_info() {
    println!("Krater - ML-KEM-1024 Key Encapsulation");
    println!();
    println!("  ML-KEM-1024 (FIPS 203), NIST Security Level 5 (256-bit)");
    println!(
        "    Public key: {} bytes",
        MlKem1024::ENCAPSULATION_KEY_SIZE
    );
    println!(
        "    Secret key: {} bytes",
        MlKem1024::DECAPSULATION_KEY_SIZE
    );
    println!("    Ciphertext: {} bytes", MlKem1024::CIPHERTEXT_SIZE);
    println!(
        "    Shared secret: {} bytes",
        MlKem1024::SHARED_SECRET_SIZE
    );
    println!();
    println!("Output formats:");
    println!("    hex    - Hexadecimal encoding (default)");
    println!("    base64 - Base64 encoding");
    println!("    pem    - PEM format with headers");
}

/// Generate shell completions
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "krater", &mut io::stdout());
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen { output, format } => cmd_keygen(&output, format, cli.verbose),

        Commands::Encaps {
            pubkey,
            output,
            format,
        } => cmd_encaps(&pubkey, output.as_ref(), format, cli.verbose),

        Commands::Decaps { key, input, format } => {
            cmd_decaps(&key, input.as_ref(), format, cli.verbose)
        }

        Commands::Info => {
            cmd_info();
            Ok(())
        }

        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}
