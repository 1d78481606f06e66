use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use dialoguer::Confirm;
use log::{Level, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use idmef::{IdmefParser, IdmefSerializer, ParserSettings, SerializerSettings, TagNames};

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

#[derive(Copy, Clone, PartialOrd, PartialEq)]
pub enum IdmefOutputFormat {
    Json,
    Xml,
}

struct IdmefDump {
    parser: IdmefParser,
    serializer: IdmefSerializer,
    inputs: Vec<PathBuf>,
    output_format: IdmefOutputFormat,
    output: Box<dyn Write>,
    verbosity_level: Option<Level>,
}

impl IdmefDump {
    pub fn from_cli_matches(matches: &ArgMatches) -> Result<Self> {
        let inputs: Vec<PathBuf> = matches
            .get_many::<String>("INPUT")
            .into_iter()
            .flatten()
            .map(PathBuf::from)
            .collect();

        let output_format = match matches
            .get_one::<String>("output-format")
            .map(String::as_str)
        {
            Some("json") => IdmefOutputFormat::Json,
            _ => IdmefOutputFormat::Xml,
        };

        let verbosity_level = match matches.get_count("verbose") {
            0 => None,
            1 => Some(Level::Info),
            2 => Some(Level::Debug),
            3 => Some(Level::Trace),
            _ => {
                eprintln!("using more than  -vvv does not affect verbosity level");
                Some(Level::Trace)
            }
        };

        let tag_names = match matches.get_one::<String>("tag-names") {
            Some(path) => TagNames::from_json_file(path)
                .with_context(|| format!("Failed to load tag names from `{}`", path))?,
            None => TagNames::default(),
        };

        let num_threads = matches
            .get_one::<usize>("num-threads")
            .copied()
            .unwrap_or_default();

        let output: Box<dyn Write> = match matches.get_one::<String>("output-target") {
            Some(path) => Box::new(
                Self::create_output_file(path, !matches.get_flag("no-confirm-overwrite"))
                    .with_context(|| {
                        format!("An error occurred while creating output file at `{}`", path)
                    })?,
            ),
            None => Box::new(io::stdout()),
        };

        Ok(IdmefDump {
            parser: IdmefParser::new().with_configuration(
                ParserSettings::new()
                    .num_threads(num_threads)
                    .tag_names(tag_names.clone()),
            ),
            serializer: IdmefSerializer::new().with_configuration(
                SerializerSettings::new()
                    .indent(!matches.get_flag("no-indent"))
                    .tag_names(tag_names),
            ),
            inputs,
            output_format,
            output,
            verbosity_level,
        })
    }

    /// Main entry point for `IdmefDump`. Fails if any input could not be dumped.
    pub fn run(&mut self) -> Result<()> {
        self.try_to_initialize_logging();

        let mut failed = 0;
        let mut documents = Vec::with_capacity(self.inputs.len());
        let mut paths = Vec::with_capacity(self.inputs.len());

        for path in &self.inputs {
            match read_input(path) {
                Ok(document) => {
                    documents.push(document);
                    paths.push(path.clone());
                }
                Err(e) => {
                    eprintln!("Failed to open file {}.\n\tcaused by: {}", path.display(), e);
                    failed += 1;
                }
            }
        }

        let results = self.parser.parse_many(&documents);
        for (path, result) in paths.iter().zip(results) {
            let dumped = result
                .map_err(anyhow::Error::from)
                .and_then(|message| self.dump_message(&message));

            if let Err(e) = dumped {
                eprintln!("Failed to dump {}.\n\tcaused by: {:#}", path.display(), e);
                failed += 1;
            }
        }

        self.output.flush().context("Failed to flush output")?;

        if failed > 0 {
            bail!("{} of {} input(s) failed", failed, self.inputs.len());
        }
        Ok(())
    }

    fn dump_message(&mut self, message: &idmef::Message) -> Result<()> {
        match self.output_format {
            IdmefOutputFormat::Xml => {
                let xml = self.serializer.serialize(message)?;
                self.output.write_all(xml.as_bytes())?;
                if !xml.ends_with('\n') {
                    writeln!(self.output)?;
                }
            }
            IdmefOutputFormat::Json => {
                let json = if self.serializer.settings().should_indent() {
                    serde_json::to_string_pretty(message)?
                } else {
                    serde_json::to_string(message)?
                };
                writeln!(self.output, "{}", json)?;
            }
        }
        Ok(())
    }

    /// If `prompt` is passed, will display a confirmation prompt before overwriting files.
    fn create_output_file(path: impl AsRef<Path>, prompt: bool) -> Result<File> {
        let p = path.as_ref();

        if p.is_dir() {
            bail!(
                "There is a directory at {}, refusing to overwrite",
                p.display()
            );
        }

        if p.exists() {
            if prompt {
                match Confirm::new()
                    .with_prompt(format!(
                        "Are you sure you want to override output file at {}",
                        p.display()
                    ))
                    .default(false)
                    .interact()
                {
                    Ok(true) => Ok(File::create(p)?),
                    Ok(false) => bail!("Cancelled"),
                    Err(e) => bail!(
                        "Failed to write confirmation prompt to term caused by\n{}",
                        e
                    ),
                }
            } else {
                Ok(File::create(p)?)
            }
        } else {
            // Ok to assume p is not an existing directory
            match p.parent() {
                Some(parent) => {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        fs::create_dir_all(parent)?;
                    }
                    Ok(File::create(p)?)
                }
                None => bail!("Output file cannot be root."),
            }
        }
    }

    fn try_to_initialize_logging(&self) {
        if let Some(level) = self.verbosity_level {
            if let Err(e) = TermLogger::init(
                level.to_level_filter(),
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            ) {
                eprintln!("Failed to initialize logging: {:?}", e);
            }
        } else {
            log::set_max_level(LevelFilter::Off);
        }
    }
}

/// `-` reads the document from stdin.
fn read_input(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        io::read_to_string(io::stdin())
    } else {
        fs::read_to_string(path)
    }
}

fn command() -> Command {
    Command::new("IDMEF Dump")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Utility to parse IDMEF (RFC 4765) XML messages and print them back as XML or JSON")
        .arg(
            Arg::new("INPUT")
                .required(true)
                .action(ArgAction::Append)
                .help("IDMEF XML documents to read, one message per file. Use `-` to read from stdin."),
        )
        .arg(
            Arg::new("output-format")
                .short('o')
                .long("format")
                .value_parser(["xml", "json"])
                .default_value("xml")
                .help("Sets the output format")
                .long_help(
                    "Sets the output format:
    \"xml\"  - re-serializes each message as IDMEF XML.
    \"json\" - prints the parsed message model as JSON.",
                ),
        )
        .arg(
            Arg::new("tag-names")
                .short('t')
                .long("tag-names")
                .value_name("JSON")
                .help("JSON file mapping RFC 4765 element names to the element names used on the wire. \
                       Names left out keep their `idmef:` prefixed default."),
        )
        .arg(
            Arg::new("num-threads")
                .long("threads")
                .value_parser(clap::value_parser!(usize))
                .default_value("0")
                .help("Sets the number of worker threads, defaults to number of CPU cores."),
        )
        .arg(
            Arg::new("output-target")
                .long("output")
                .short('f')
                .value_name("FILE")
                .help("Writes output to the file specified instead of stdout, errors will still be printed to stderr. \
                       Will ask for confirmation before overwriting files, to allow overwriting, pass `--no-confirm-overwrite`. \
                       Will create parent directories if needed."),
        )
        .arg(
            Arg::new("no-confirm-overwrite")
                .long("no-confirm-overwrite")
                .action(ArgAction::SetTrue)
                .help("When set, will not ask for confirmation before overwriting files, useful for automation"),
        )
        .arg(
            Arg::new("no-indent")
                .long("no-indent")
                .action(ArgAction::SetTrue)
                .help("When set, output will not be indented."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("-v - info, -vv - debug, -vvv - trace. \
                       trace output is only available in debug builds, as it is extremely verbose"),
        )
}

fn main() {
    let matches = command().get_matches();

    let result = IdmefDump::from_cli_matches(&matches).and_then(|mut app| app.run());
    if let Err(e) = result {
        eprintln!("{:#}", e);
        exit(1);
    }
}
