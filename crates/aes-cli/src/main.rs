//! Command-line interface for AES-128 in ECB and CTR modes.

#![forbid(unsafe_code)]

use std::fmt;
use std::fs;
use std::path::PathBuf;

use aes_core::{
    cipher_traced, expand_key, inv_cipher_traced, Aes128Key, Matrix, State, TraceSink,
    BLOCK_BYTES,
};
use aes_modes::{Algorithm, Cipher, Direction, Iv, Mode, Transformation};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// FIPS-197 Appendix B plaintext.
const FIPS_PLAINTEXT: &str = "00112233445566778899aabbccddeeff";
/// FIPS-197 Appendix B key.
const FIPS_KEY: &str = "000102030405060708090a0b0c0d0e0f";

/// AES-128 CLI.
#[derive(Parser)]
#[command(name = "aes128", version, author, about = "AES-128 (FIPS-197) in ECB and CTR modes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file.
    Enc {
        #[command(flatten)]
        args: TransformArgs,
        /// Pad the input with zero bytes up to a 16-byte boundary.
        #[arg(long, default_value_t = false)]
        zero_pad: bool,
    },
    /// Decrypt a file (must be a multiple of 16 bytes).
    Dec {
        #[command(flatten)]
        args: TransformArgs,
    },
    /// Print the round-by-round trace of one block through the cipher and its inverse.
    Trace {
        /// Plaintext block as 32 hex characters.
        #[arg(long, value_name = "HEX", default_value = FIPS_PLAINTEXT)]
        plaintext_hex: State,
        /// AES-128 key as 32 hex characters.
        #[arg(long = "key-hex", value_name = "HEX", default_value = FIPS_KEY)]
        key: Aes128Key,
    },
    /// Run a local demo: random key, IV and data through ECB and CTR, then back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
        /// Number of 16-byte blocks to encrypt.
        #[arg(long, default_value_t = 4)]
        blocks: usize,
    },
}

#[derive(clap::Args)]
struct TransformArgs {
    /// Transformation in the form AES128/<ECB|CTR>.
    #[arg(long, default_value = "AES128/ECB")]
    transformation: Transformation,
    /// AES-128 key as 32 hex characters.
    #[arg(long = "key-hex", value_name = "HEX")]
    key: Aes128Key,
    /// CTR initial counter as 32 hex characters (defaults to zero).
    #[arg(long = "iv-hex", value_name = "HEX")]
    iv: Option<Iv>,
    /// Input file.
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output file.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
    /// Print the round trace of every cipher invocation to stderr.
    #[arg(long, default_value_t = false)]
    trace: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Enc { args, zero_pad } => cmd_transform(&args, Direction::Encrypt, zero_pad),
        Commands::Dec { args } => cmd_transform(&args, Direction::Decrypt, false),
        Commands::Trace { plaintext_hex, key } => cmd_trace(&plaintext_hex, &key),
        Commands::Demo { seed, blocks } => cmd_demo(seed, blocks),
    }
}

/// Forwards trace lines to stderr.
struct StderrTrace;

impl TraceSink for StderrTrace {
    fn line(&mut self, args: fmt::Arguments<'_>) {
        eprintln!("{args}");
    }
}

fn cmd_transform(args: &TransformArgs, direction: Direction, zero_pad: bool) -> Result<()> {
    let mut data =
        fs::read(&args.input).with_context(|| format!("read {}", args.input.display()))?;
    if zero_pad {
        data = pad_to_block(data);
    }
    if data.is_empty() || data.len() % BLOCK_BYTES != 0 {
        bail!(
            "input length must be a non-zero multiple of {BLOCK_BYTES} bytes (got {})",
            data.len()
        );
    }

    let mut cipher = Cipher::new(args.transformation);
    cipher.set_direction(direction);
    cipher.set_iv(args.iv.unwrap_or_default());
    let output = transform(&cipher, &args.key, &data, args.trace)?;

    fs::write(&args.output, output)
        .with_context(|| format!("write {}", args.output.display()))?;
    Ok(())
}

fn transform(cipher: &Cipher, key: &Aes128Key, data: &[u8], trace: bool) -> Result<Vec<u8>> {
    let blocks = Matrix::from_bytes(data).context("lay out input blocks")?;
    let output = if trace {
        cipher.do_final_traced(&blocks, key, &mut StderrTrace)
    } else {
        cipher.do_final(&blocks, key)
    }
    .with_context(|| format!("apply {}", cipher.transformation()))?;
    Ok(output.into_bytes())
}

fn cmd_trace(plaintext: &State, key: &Aes128Key) -> Result<()> {
    let schedule = expand_key(key);
    let mut lines: Vec<String> = Vec::new();
    let ciphertext = cipher_traced(plaintext, &schedule, &mut lines);
    let recovered = inv_cipher_traced(&ciphertext, &schedule, &mut lines);
    for line in &lines {
        println!("{line}");
    }
    if recovered != *plaintext {
        bail!("inverse cipher did not recover the plaintext");
    }
    Ok(())
}

fn cmd_demo(seed: Option<u64>, blocks: usize) -> Result<()> {
    if blocks == 0 {
        bail!("demo needs at least one block");
    }
    let mut rng = seeded_rng(seed);
    let mut key_bytes = [0u8; 16];
    rng.fill_bytes(&mut key_bytes);
    let key = Aes128Key::from(key_bytes);
    let mut iv_bytes = [0u8; 16];
    rng.fill_bytes(&mut iv_bytes);
    let iv = Iv::new(u128::from_be_bytes(iv_bytes));

    let mut plaintext = vec![0u8; blocks * BLOCK_BYTES];
    rng.fill_bytes(&mut plaintext);

    println!("demo key: {}", hex::encode(key_bytes));
    println!("iv: {iv}");
    println!("plaintext: {}", hex::encode(&plaintext));

    for mode in Mode::ALL {
        let mut cipher = Cipher::new(Transformation::new(Algorithm::Aes128, mode));
        cipher.set_iv(iv);
        let ciphertext = transform(&cipher, &key, &plaintext, false)?;
        cipher.set_direction(Direction::Decrypt);
        let decrypted = transform(&cipher, &key, &ciphertext, false)?;

        println!("{mode} ciphertext: {}", hex::encode(&ciphertext));
        if decrypted != plaintext {
            bail!("{mode} roundtrip failed");
        }
    }
    Ok(())
}

/// Pads with zero bytes up to the next 16-byte boundary; aligned input is unchanged.
fn pad_to_block(mut data: Vec<u8>) -> Vec<u8> {
    let rem = data.len() % BLOCK_BYTES;
    if rem != 0 {
        data.resize(data.len() + BLOCK_BYTES - rem, 0);
    }
    data
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
