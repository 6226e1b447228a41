use crate::{cli::OutputFormat, error::Result};
use colored::*;
use hls_streams::{NamedStream, StreamMap};
use std::io::Write;
use std::path::Path;

pub struct OutputManager {
    colored: bool,
}

impl OutputManager {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn format_streams(&self, streams: &StreamMap, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(self.format_pretty(streams)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(streams)?),
            OutputFormat::JsonCompact => Ok(serde_json::to_string(streams)?),
        }
    }

    fn format_pretty(&self, streams: &StreamMap) -> String {
        let mut output = String::new();

        output.push_str(&self.colorize("Available streams:", Color::Green, true));
        output.push('\n');

        for stream in streams.values() {
            output.push_str(&self.format_stream(stream));
        }

        output
    }

    fn format_stream(&self, stream: &NamedStream) -> String {
        let mut output = format!(
            "  {} ({})\n",
            self.colorize(&stream.name, Color::Cyan, true),
            self.colorize(stream.kind.as_str(), Color::Yellow, false)
        );
        output.push_str(&format!(
            "    {}: {}\n",
            self.colorize("Video", Color::Yellow, false),
            self.colorize(&stream.video_uri, Color::Blue, false)
        ));
        for uri in &stream.audio_uris {
            output.push_str(&format!(
                "    {}: {}\n",
                self.colorize("Audio", Color::Yellow, false),
                self.colorize(uri, Color::Blue, false)
            ));
        }
        output
    }

    fn colorize(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.colored {
            return text.to_string();
        }

        let colored_text = text.color(color);
        if bold {
            colored_text.bold().to_string()
        } else {
            colored_text.to_string()
        }
    }
}

pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            file.write_all(content.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
