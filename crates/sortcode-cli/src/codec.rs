//! `sortcode encode` / `sortcode decode` implementation.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sortcode_codec::CodecKind;
use tracing::debug;

/// Arguments for `sortcode encode`.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Codec to use: d32 (order-preserving), base32 (RFC 4648 lowercase) or d64.
    #[arg(long, short = 'c', default_value_t = CodecKind::D32)]
    pub codec: CodecKind,

    /// File to encode (defaults to stdin).
    pub input: Option<PathBuf>,
}

/// Arguments for `sortcode decode`.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Codec to use: d32 (order-preserving), base32 (RFC 4648 lowercase) or d64.
    #[arg(long, short = 'c', default_value_t = CodecKind::D32)]
    pub codec: CodecKind,

    /// Encoded text (defaults to stdin).
    pub text: Option<String>,
}

/// Run the encode command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or stdout cannot be written.
pub fn run_encode(args: &EncodeArgs) -> Result<()> {
    let data = match &args.input {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let text = args.codec.codec().encode(&data);
    debug!(codec = %args.codec, bytes = data.len(), chars = text.len(), "encoded");

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}").context("failed to write stdout")?;
    Ok(())
}

/// Run the decode command.
///
/// # Errors
///
/// Returns an error naming the offending character if the text is not valid
/// for the codec, or if stdin/stdout fail.
pub fn run_decode(args: &DecodeArgs) -> Result<()> {
    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf.trim_end().to_owned()
        }
    };

    let data = args
        .codec
        .codec()
        .decode(&text)
        .with_context(|| format!("cannot decode input as {}", args.codec))?;
    debug!(codec = %args.codec, chars = text.len(), bytes = data.len(), "decoded");

    let mut stdout = io::stdout().lock();
    stdout.write_all(&data).context("failed to write stdout")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}
