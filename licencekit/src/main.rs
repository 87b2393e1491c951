//! licencekit command-line tool
//!
//! Issues and checks licence documents and product keys.
//!
//! Usage:
//!   licencekit keygen --out-dir keys/
//!   licencekit signature --bits 16
//!   licencekit issue --owner "Alice" --expires 2030-01-01T00:00:00Z --feature export
//!   licencekit verify licence.txt
//!   licencekit pack --owner "Alice" --value 3 --size 4 --value 12 --size 4
//!   licencekit unpack --owner "Alice" --size 4 --size 4 IXDIE-AXA4W-...

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use licencekit::{
    DEFAULT_PRIVATE_KEY, DEFAULT_PUBLIC_KEY, IssuerKeyPair, LicensingConfig, LicensingContext,
    ProductLicence, format_key, normalize, salt,
};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "licencekit")]
#[command(about = "Offline licence documents and product keys")]
struct Args {
    /// Path to the configuration file (defaults apply if it does not exist)
    #[arg(short, long, default_value = "licencekit.toml")]
    config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an issuer key pair
    Keygen {
        /// Directory to write the key files to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Write PEM instead of DER
        #[arg(long)]
        pem: bool,
    },

    /// Generate a permutation signature for product keys
    Signature {
        /// Payload bits per pass (sum of field sizes)
        #[arg(long)]
        bits: usize,
    },

    /// Sign a licence document
    Issue {
        /// Licence holder
        #[arg(long)]
        owner: String,

        /// Expiry, RFC 3339
        #[arg(long)]
        expires: DateTime<Utc>,

        /// Enabled feature (repeatable)
        #[arg(long = "feature")]
        features: Vec<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Check a licence document
    Verify {
        /// Licence document
        file: PathBuf,

        /// Print the licence as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pack values into a product key
    Pack {
        /// Key owner (salts the key)
        #[arg(long)]
        owner: String,

        /// Field value (repeatable, in order)
        #[arg(long = "value", required = true)]
        values: Vec<u32>,

        /// Field width in bits (repeatable, in order)
        #[arg(long = "size", required = true)]
        sizes: Vec<u8>,

        /// Number of keys to generate
        #[arg(long, default_value = "1")]
        count: usize,
    },

    /// Read the values back out of a product key
    Unpack {
        /// Key owner the key was issued to
        #[arg(long)]
        owner: String,

        /// Field width in bits (repeatable, in order)
        #[arg(long = "size", required = true)]
        sizes: Vec<u8>,

        /// The product key
        key: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = load_config(&args.config)?;

    match args.command {
        Command::Keygen { out_dir, pem } => keygen(&out_dir, pem),
        Command::Signature { bits } => {
            let codec = config.product_key_codec()?;
            let signature = codec.generator().randomize(bits, config.key_length)?;
            let total_bits = codec.alphabet().bits_per_character() * config.key_length;
            info!(
                information_bits = bits * config.passes,
                total_bits,
                "signature generated"
            );
            println!("{signature}");
            Ok(())
        }
        Command::Issue {
            owner,
            expires,
            features,
            out,
        } => {
            let context = LicensingContext::from_config(&config)
                .context("failed to load licensing keys")?;
            let licence = ProductLicence::new(owner, expires, features);
            match out {
                Some(path) => {
                    context
                        .licences()
                        .encode_to_file(&licence, &path)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "licence written");
                }
                None => print!("{}", context.issue_licence(&licence)?),
            }
            Ok(())
        }
        Command::Verify { file, json } => {
            let context = LicensingContext::from_config(&config)
                .context("failed to load licensing keys")?;
            let Some(licence) = context
                .licences()
                .decode_file(&file)
                .with_context(|| format!("failed to read {}", file.display()))?
            else {
                bail!("licence is invalid");
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&licence)?);
            } else {
                println!("owner:     {}", licence.owner());
                println!("expires:   {}", licence.expire_at().to_rfc3339());
                println!("features:  {}", licence.features().join(", "));
            }
            if licence.is_expired() {
                warn!(expired_at = %licence.expire_at(), "licence has expired");
            }
            Ok(())
        }
        Command::Pack {
            owner,
            values,
            sizes,
            count,
        } => {
            let codec = config.product_key_codec()?;
            let owner_salt = salt(&owner);
            for _ in 0..count {
                let key = codec.pack(&values, &sizes, config.key_length, &owner_salt)?;
                println!("{}", format_key(&key, config.group_size));
            }
            if config.permutation_signature.is_none()
                && let Some(signature) = codec.signature()
            {
                warn!("no permutation signature configured; these keys can only be read with:");
                eprintln!("permutation_signature = \"{signature}\"");
            }
            Ok(())
        }
        Command::Unpack { owner, sizes, key } => {
            if normalize(&key).chars().count() != config.key_length {
                bail!("product key must be {} characters", config.key_length);
            }
            let codec = config.product_key_codec()?;
            match codec.unpack(&key, &salt(&owner), &sizes)? {
                Some(values) => {
                    let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                    println!("{}", values.join(" "));
                    Ok(())
                }
                None => bail!("product key is invalid"),
            }
        }
    }
}

fn load_config(path: &Path) -> Result<LicensingConfig> {
    if path.exists() {
        LicensingConfig::load(path).with_context(|| format!("failed to load {}", path.display()))
    } else {
        info!(path = %path.display(), "no config file, using defaults");
        Ok(LicensingConfig::default())
    }
}

fn keygen(out_dir: &Path, pem: bool) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let keypair = IssuerKeyPair::generate();

    let (public, private, public_name, private_name) = if pem {
        (
            keypair.public_key_pem()?.into_bytes(),
            keypair.private_key_pem()?.into_bytes(),
            "public-key.pem",
            "private-key.pem",
        )
    } else {
        (
            keypair.public_key_der()?,
            keypair.private_key_der()?,
            DEFAULT_PUBLIC_KEY,
            DEFAULT_PRIVATE_KEY,
        )
    };

    let public_path = out_dir.join(public_name);
    let private_path = out_dir.join(private_name);
    std::fs::write(&public_path, public)
        .with_context(|| format!("failed to write {}", public_path.display()))?;
    std::fs::write(&private_path, private)
        .with_context(|| format!("failed to write {}", private_path.display()))?;

    info!(public = %public_path.display(), private = %private_path.display(), "key pair written");
    println!("{}", public_path.display());
    println!("{}", private_path.display());
    Ok(())
}
