// Command-line surface and dispatch. `run` resolves the requested service
// and hands off to `execute`, which does the actual put/get against any
// `PasteService`. Input and output are passed in so the whole flow can be
// driven from tests.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::api::ApiClient;
use crate::error::Error;
use crate::service::{self, Paste, PasteService, DEFAULT_SERVICE};
use crate::ui::with_spinner;

#[derive(Parser, Debug)]
#[command(
    name = "pastectl",
    version,
    about = "get and put pastes from pastebin and other paste sites"
)]
pub struct Cli {
    /// The paste service to use (pastebin, fpaste, or their domain/URL)
    #[arg(short, long, global = true, default_value = DEFAULT_SERVICE)]
    pub service: String,

    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Put a paste
    #[command(visible_alias = "p")]
    Put(PutArgs),
    /// Get a paste from its URL
    #[command(visible_alias = "g")]
    Get(GetArgs),
}

#[derive(Args, Debug, Default)]
pub struct PutArgs {
    /// Print the paste ID instead of the URL
    #[arg(long)]
    pub id: bool,

    /// Title for the paste (defaults to the file name)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Extension used to pick highlighting when reading stdin, e.g. `.go`
    #[arg(short, long)]
    pub ext: Option<String>,

    /// File to upload; `-` or nothing reads stdin
    pub file: Option<String>,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Treat the argument as a paste ID instead of a URL
    #[arg(long)]
    pub id: bool,

    /// Paste URL (or ID with --id)
    pub target: String,
}

/// Message for a command line clap rejected, or `None` when clap should
/// handle the outcome itself (help and version output).
pub fn usage_error(err: &clap::Error) -> Option<String> {
    use clap::error::ErrorKind;

    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
        _ => {
            let rendered = err.to_string();
            let message = rendered.trim_end();
            Some(message.strip_prefix("error: ").unwrap_or(message).to_string())
        }
    }
}

/// Resolve the service named on the command line and execute the command.
pub fn run(cli: Cli, stdin: impl Read, stdout: impl Write) -> anyhow::Result<()> {
    let client = ApiClient::new()?;
    let service = service::resolve(&cli.service, client)?;
    execute(cli.command, service.as_ref(), stdin, stdout)
}

/// Execute `command` against `service`. Nothing is written to `stdout`
/// unless the remote call succeeds.
pub fn execute(
    command: Command,
    service: &dyn PasteService,
    stdin: impl Read,
    mut stdout: impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Put(args) => {
            let id = put(&args, service, stdin)?;
            let shown = if args.id { id } else { service.wrap_id(&id) };
            writeln!(stdout, "{shown}").context("failed to write output")?;
        }
        Command::Get(args) => {
            let id = if args.id {
                args.target
            } else {
                service.strip_url(&args.target)
            };
            debug!(service = service.name(), %id, "fetching paste");
            let text = with_spinner("Fetching...", || service.get(&id))?;
            stdout
                .write_all(&text)
                .context("failed to write output")?;
        }
    }
    stdout.flush().context("failed to write output")?;
    Ok(())
}

fn put(args: &PutArgs, service: &dyn PasteService, mut stdin: impl Read) -> Result<String, Error> {
    let mut title = args.title.clone();
    let mut ext = args.ext.clone();
    let text = match args.file.as_deref() {
        None | Some("-") | Some("") => {
            let mut text = Vec::new();
            stdin
                .read_to_end(&mut text)
                .map_err(|e| Error::io("failed to read stdin", e))?;
            text
        }
        Some(file) => {
            let path = Path::new(file);
            if title.is_none() {
                title = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned());
            }
            if let Some(file_ext) = path.extension() {
                ext = Some(file_ext.to_string_lossy().into_owned());
            }
            std::fs::read(path)
                .map_err(|e| Error::io(format!("failed to read {file}"), e))?
        }
    };

    let mut paste = Paste::new(&text);
    if let Some(title) = title.as_deref() {
        paste = paste.title(title);
    }
    if let Some(ext) = ext.as_deref() {
        paste = paste.extension(ext);
    }
    debug!(
        service = service.name(),
        title = ?paste.title,
        ext = ?paste.extension,
        "publishing paste"
    );
    with_spinner("Uploading...", || service.put(&paste))
}
