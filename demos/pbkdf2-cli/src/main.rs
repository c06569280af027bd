// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! redoubt-pbkdf2 driver
//!
//! - `hash`: SHA-256 / SHA-512 digest of a message, a file or stdin
//! - `hmac`: HMAC tag of a message
//! - `derive`: PBKDF2 derived key
//! - `demo`: fixed example digests and derivation
//!
//! Every result is printed as lowercase hex on stdout.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;

use redoubt_pbkdf2::{HashAlgorithm, Pbkdf2Error, derive, hash, hmac};

const DEFAULT_ITERATIONS: u32 = 100_000;

const DEMO_MESSAGES: [&str; 3] = [
    "Hello World!",
    "This is the SHA-256 Hashing Algorithm",
    "My name is KelCodes and I wrote this program",
];

#[derive(Parser, Debug)]
#[command(name = "redoubt-pbkdf2")]
#[command(author, version, about = "SHA-2, HMAC and PBKDF2 from first principles", long_about = None)]
struct Cli {
    /// Log library events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Hash a message (reads stdin when neither MESSAGE nor --file is given)
    Hash {
        /// sha256 or sha512
        #[arg(short, long, default_value_t = HashAlgorithm::Sha256)]
        algorithm: HashAlgorithm,

        /// Hash the contents of this file
        #[arg(short, long, conflicts_with = "message")]
        file: Option<PathBuf>,

        /// Message to hash, as UTF-8
        message: Option<String>,
    },

    /// Compute an HMAC tag
    Hmac {
        /// sha256 or sha512
        #[arg(short, long, default_value_t = HashAlgorithm::Sha256)]
        algorithm: HashAlgorithm,

        /// Secret key, as UTF-8
        #[arg(short, long)]
        key: String,

        /// Message to authenticate, as UTF-8
        message: String,
    },

    /// Derive a key with PBKDF2
    Derive {
        /// PRF hash: sha256 or sha512
        #[arg(short, long, default_value_t = HashAlgorithm::Sha256)]
        algorithm: HashAlgorithm,

        /// Password, as UTF-8
        #[arg(short, long)]
        password: String,

        /// Salt, as UTF-8 (or hex with --hex-salt)
        #[arg(short, long)]
        salt: String,

        /// Iteration count
        #[arg(
            short,
            long,
            env = "REDOUBT_PBKDF2_ITERATIONS",
            default_value_t = DEFAULT_ITERATIONS
        )]
        iterations: u32,

        /// Derived key length in bytes (defaults to the digest length)
        #[arg(short, long)]
        length: Option<usize>,

        /// Interpret --salt as hex
        #[arg(long)]
        hex_salt: bool,
    },

    /// Print the built-in example digests and derivation
    Demo,
}

fn init_logging(verbose: bool) {
    if !verbose {
        return;
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(Level::TRACE)
        .init();
}

fn read_message(file: Option<PathBuf>, message: Option<String>) -> std::io::Result<Vec<u8>> {
    match (file, message) {
        (Some(path), _) => std::fs::read(path),
        (None, Some(message)) => Ok(message.into_bytes()),
        (None, None) => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn salt_bytes(salt: &str, hex_salt: bool) -> Result<Vec<u8>, hex::FromHexError> {
    if hex_salt {
        hex::decode(salt)
    } else {
        Ok(salt.as_bytes().to_vec())
    }
}

/// `Example N: <message> = <digest>` per demo message, then the derived key
fn demo_lines() -> Result<Vec<String>, Pbkdf2Error> {
    let mut lines: Vec<String> = DEMO_MESSAGES
        .iter()
        .enumerate()
        .map(|(i, message)| {
            let digest = hash(HashAlgorithm::Sha256, message.as_bytes());
            format!("Example {}: {} = {}", i + 1, message, hex::encode(digest))
        })
        .collect();

    let key = derive(
        "mypassword".as_bytes(),
        "mysalt".as_bytes(),
        DEFAULT_ITERATIONS,
        Some(32),
        HashAlgorithm::Sha256,
    )?;
    lines.push(hex::encode(key));

    Ok(lines)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Hash {
            algorithm,
            file,
            message,
        } => {
            let message = read_message(file, message)?;
            println!("{}", hex::encode(hash(algorithm, &message)));
        }
        Commands::Hmac {
            algorithm,
            key,
            message,
        } => {
            println!(
                "{}",
                hex::encode(hmac(algorithm, key.as_bytes(), message.as_bytes()))
            );
        }
        Commands::Derive {
            algorithm,
            password,
            salt,
            iterations,
            length,
            hex_salt,
        } => {
            let salt = salt_bytes(&salt, hex_salt)?;
            tracing::debug!(%algorithm, iterations, ?length, "deriving key");

            let key = derive(password.as_bytes(), &salt, iterations, length, algorithm)?;
            println!("{}", hex::encode(key));
        }
        Commands::Demo => {
            for line in demo_lines()? {
                println!("{line}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_derive_defaults() {
        let cli = Cli::try_parse_from(["redoubt-pbkdf2", "derive", "-p", "pw", "-s", "salt"])
            .expect("Failed to try_parse_from(..)");

        match cli.command {
            Commands::Derive {
                algorithm,
                iterations,
                length,
                hex_salt,
                ..
            } => {
                assert_eq!(algorithm, HashAlgorithm::Sha256);
                assert!(iterations > 0);
                assert_eq!(length, None);
                assert!(!hex_salt);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_algorithm_spellings() {
        let cli = Cli::try_parse_from(["redoubt-pbkdf2", "hash", "-a", "SHA-512", "abc"])
            .expect("Failed to try_parse_from(..)");

        match cli.command {
            Commands::Hash {
                algorithm, message, ..
            } => {
                assert_eq!(algorithm, HashAlgorithm::Sha512);
                assert_eq!(message.as_deref(), Some("abc"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_algorithm() {
        let result = Cli::try_parse_from(["redoubt-pbkdf2", "hash", "-a", "md5", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric_iterations() {
        let result = Cli::try_parse_from([
            "redoubt-pbkdf2",
            "derive",
            "-p",
            "pw",
            "-s",
            "salt",
            "-i",
            "not-a-number",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_file_conflicts_with_message() {
        let result =
            Cli::try_parse_from(["redoubt-pbkdf2", "hash", "--file", "x.bin", "inline"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_salt_bytes() {
        assert_eq!(
            salt_bytes("73616c74", true).expect("Failed to salt_bytes(..)"),
            b"salt"
        );
        assert_eq!(
            salt_bytes("73616c74", false).expect("Failed to salt_bytes(..)"),
            b"73616c74"
        );
        assert!(salt_bytes("zz", true).is_err());
    }

    #[test]
    fn test_read_message_prefers_inline() {
        let bytes = read_message(None, Some("abc".into())).expect("Failed to read_message(..)");
        assert_eq!(bytes, b"abc");
        assert_eq!(
            hex::encode(hash(HashAlgorithm::Sha256, &bytes)),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_demo_lines() {
        let lines = demo_lines().expect("Failed to demo_lines()");

        assert_eq!(
            lines,
            [
                "Example 1: Hello World! = 7f83b1657ff1fc53b92dc18148a1d65dfc2d4b1fa3d677284addd200126d9069",
                "Example 2: This is the SHA-256 Hashing Algorithm = 4291324768ebe640c605ab816a04779ebb2ee7015b7106d2073c9af68de74686",
                "Example 3: My name is KelCodes and I wrote this program = 160e0d39d4bc5c2d16e87e4d4b7ebb8333e65e2d736f38babbe771c9d2e91def",
                "dd7f91b07fac548d5dd88b86a953996908f28c2b7c648789351ad349e29088f7",
            ]
        );
    }
}
