use crate::{
    cli::SelectArgs,
    config::AppConfig,
    error::{CliError, Result},
    output::{OutputManager, write_output},
};
use hls_streams::{
    AudioSelect, FfmpegMuxer, HttpProbe, LocaleMatcher, Localization, MuxCapability,
    SelectOptions, StreamMap, VariantSelector,
};
use reqwest::header::{HeaderName, HeaderValue};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub struct CommandExecutor {
    config: AppConfig,
}

impl CommandExecutor {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn select(&self, args: SelectArgs) -> Result<()> {
        let manifest = read_manifest(&args.manifest)?;
        let options = self.select_options(&args)?;
        debug!("select options: {:?}", options);

        let audio_select = if args.audio_select.is_empty() {
            AudioSelect::new(self.config.audio_select.iter().cloned())
        } else {
            AudioSelect::new(args.audio_select.iter().cloned())
        };

        let selector = VariantSelector::new(options, self.locale(&args), self.muxer(&args))
            .with_audio_select(audio_select)
            .with_probe(Arc::new(HttpProbe::new(self.http_client()?)));

        let streams = selector
            .select_manifest(&manifest, args.base_url.as_ref())
            .await?;
        info!("found {} streams", streams.len());

        if streams.is_empty() {
            return Err(CliError::no_streams_found());
        }

        let format = args
            .output
            .clone()
            .unwrap_or_else(|| self.config.output_format.clone());
        self.print(&streams, &format, args.output_file.as_deref())
    }

    /// Command line flags take precedence over the configuration file.
    fn select_options(&self, args: &SelectArgs) -> Result<SelectOptions> {
        let mut options = self.config.select.clone();

        if let Some(name_key) = args.name_key {
            options.name_key = name_key;
        }
        if let Some(prefix) = &args.name_prefix {
            options.name_prefix = prefix.clone();
        }
        if let Some(template) = &args.name_fmt {
            options.name_fmt = Some(template.clone());
        }
        options.check_streams |= args.check_streams;
        options.playback.force_restart |= args.force_restart;
        if let Some(offset) = args.start_offset {
            options.playback.start_offset = offset;
        }
        if args.duration.is_some() {
            options.playback.duration = args.duration;
        }
        for header in &args.headers {
            let (key, value) = parse_header(header)?;
            options.transport.headers.insert(key, value);
        }
        for (key, value) in &options.transport.headers {
            validate_header(key, value)?;
        }
        if options.transport.timeout_secs.is_none() {
            options.transport.timeout_secs = Some(self.config.timeout);
        }

        Ok(options)
    }

    fn locale(&self, args: &SelectArgs) -> Arc<dyn LocaleMatcher> {
        let locale = match args.locale.as_ref().or(self.config.locale.as_ref()) {
            Some(tag) => Localization::requested(tag),
            None => Localization::from_env(),
        };
        debug!("using locale {} (explicit: {})", locale, locale.explicit());
        Arc::new(locale)
    }

    fn muxer(&self, args: &SelectArgs) -> Arc<dyn MuxCapability> {
        if args.no_mux || self.config.mux_disabled {
            return Arc::new(FfmpegMuxer::disabled());
        }
        let path = args.ffmpeg.clone().or_else(|| self.config.ffmpeg_path.clone());
        Arc::new(FfmpegMuxer::new(path))
    }

    fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(self.config.timeout));
        if let Some(user_agent) = &self.config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        Ok(builder.build()?)
    }

    fn print(
        &self,
        streams: &StreamMap,
        format: &crate::cli::OutputFormat,
        output_file: Option<&Path>,
    ) -> Result<()> {
        let output_manager = OutputManager::new(self.config.colored_output && output_file.is_none());
        let output = output_manager.format_streams(streams, format)?;
        write_output(&output, output_file)
    }
}

fn read_manifest(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut data = Vec::new();
        std::io::stdin().lock().read_to_end(&mut data)?;
        Ok(data)
    } else {
        Ok(std::fs::read(path)?)
    }
}

/// Accepts `Name=Value` and `Name: Value`.
fn parse_header(header: &str) -> Result<(String, String)> {
    let (key, value) = header
        .split_once('=')
        .or_else(|| header.split_once(':'))
        .ok_or_else(|| CliError::invalid_header(header))?;

    let (key, value) = (key.trim(), value.trim());
    validate_header(key, value)?;
    Ok((key.to_string(), value.to_string()))
}

/// Rejects names and values the HTTP client would refuse to send.
fn validate_header(key: &str, value: &str) -> Result<()> {
    HeaderName::from_str(key)
        .map_err(|e| CliError::invalid_header(format!("{key}: {e}")))?;
    HeaderValue::from_str(value)
        .map_err(|e| CliError::invalid_header(format!("{key}: {e}")))?;
    Ok(())
}
