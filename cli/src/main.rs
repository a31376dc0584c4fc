use clap::{Parser, Subcommand, ValueEnum};
use morsecode_core::{decode, AudioFileType, Issue, Message, Notation, Synthesizer};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "morsecode")]
#[command(about = "Morse code transcoder and tone generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text to Morse notation
    Encode {
        /// Text to encode (falls back to --input, then stdin)
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Rendering to print
        #[arg(short, long, value_enum, default_value_t = Format::Plain)]
        format: Format,
    },

    /// Decode plain or signal notation to text
    Decode {
        /// Notation to decode (falls back to --input, then stdin)
        #[arg(allow_hyphen_values = true)]
        notation: Option<String>,

        /// Read the notation from a file
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Print text and issues as JSON
        #[arg(long)]
        json: bool,
    },

    /// Synthesize text to an audio file
    Export {
        /// Text to send
        text: String,

        /// Output audio file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        tone: ToneArgs,

        /// Container format (default: from the output extension, else wav)
        #[arg(long, value_enum)]
        file_type: Option<FileType>,
    },

    /// Play text through the default audio device
    Play {
        /// Text to send
        text: String,

        #[command(flatten)]
        tone: ToneArgs,
    },
}

#[derive(clap::Args)]
struct ToneArgs {
    /// Words per minute (1-50)
    #[arg(short, long, default_value_t = morsecode_core::DEFAULT_WPM)]
    wpm: u32,

    /// Tone frequency in Hz (50-20000)
    #[arg(long, default_value_t = morsecode_core::DEFAULT_FREQUENCY)]
    frequency: u32,
}

impl ToneArgs {
    fn synthesizer(&self) -> Synthesizer {
        Synthesizer::new(self.wpm, self.frequency)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Plain,
    Signal,
    Stacked,
    Spoken,
}

#[derive(Clone, Copy, ValueEnum)]
enum FileType {
    Wav,
    Au,
    Raw,
}

impl From<FileType> for AudioFileType {
    fn from(file_type: FileType) -> Self {
        match file_type {
            FileType::Wav => AudioFileType::Wav,
            FileType::Au => AudioFileType::Au,
            FileType::Raw => AudioFileType::Raw,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read stdin: {0}")]
    Stdin(std::io::Error),
}

#[derive(Serialize)]
struct DecodeReport {
    text: String,
    issues: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { text, input, format } => encode_command(text, input.as_deref(), format)?,
        Commands::Decode { notation, input, json } => {
            decode_command(notation, input.as_deref(), json)?
        }
        Commands::Export {
            text,
            output,
            tone,
            file_type,
        } => export_command(&text, &output, &tone, file_type)?,
        Commands::Play { text, tone } => play_command(&text, &tone)?,
    }

    Ok(())
}

/// Positional argument, then input file, then stdin
fn read_source(arg: Option<String>, input: Option<&Path>) -> Result<String, CliError> {
    if let Some(arg) = arg {
        return Ok(arg);
    }
    if let Some(path) = input {
        return std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
            path: path.to_path_buf(),
            source,
        });
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(CliError::Stdin)?;
    // drop the newline the shell adds
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(buffer)
}

fn report_issues(issues: &[Issue]) {
    for issue in issues {
        eprintln!("warning: {}", issue);
    }
}

fn encode_command(
    text: Option<String>,
    input: Option<&Path>,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_source(text, input)?;
    let message = Message::new(&text);
    report_issues(message.issues());

    let rendered = match format {
        Format::Plain => message.notation(Notation::Plain),
        Format::Signal => message.notation(Notation::Signal),
        Format::Stacked => message.stacked(),
        Format::Spoken => message.spoken(),
    };
    println!("{}", rendered);
    Ok(())
}

fn decode_command(
    notation: Option<String>,
    input: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let notation = read_source(notation, input)?;
    let decoded = decode(&notation);
    log::info!("decoded {:?} notation into {} chars", decoded.form, decoded.text.chars().count());

    if json {
        let report = DecodeReport {
            text: decoded.text,
            issues: decoded.issues.iter().map(ToString::to_string).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report_issues(&decoded.issues);
        println!("{}", decoded.text);
    }
    Ok(())
}

fn export_command(
    text: &str,
    output: &Path,
    tone: &ToneArgs,
    file_type: Option<FileType>,
) -> Result<(), Box<dyn std::error::Error>> {
    let message = Message::new(text);
    report_issues(message.issues());

    let file_type = file_type.map(AudioFileType::from).unwrap_or_else(|| {
        output
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(AudioFileType::from_extension)
            .unwrap_or_default()
    });

    let synth = tone.synthesizer();
    synth.write_file(&message, output, file_type)?;
    println!(
        "Wrote {} ms of audio ({} wpm, {} Hz, {:?}) to {}",
        synth.duration_ms(&message),
        synth.wpm(),
        synth.frequency(),
        file_type,
        output.display()
    );
    Ok(())
}

fn play_command(text: &str, tone: &ToneArgs) -> Result<(), Box<dyn std::error::Error>> {
    let message = Message::new(text);
    report_issues(message.issues());

    let synth = tone.synthesizer();
    println!(
        "Playing {} ms of audio ({} wpm, {} Hz)",
        synth.duration_ms(&message),
        synth.wpm(),
        synth.frequency()
    );
    synth.play(&message)?;
    Ok(())
}
