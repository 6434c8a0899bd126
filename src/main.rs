use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fwupload_lib::{
    select::SelectedFiles,
    upload::HttpUploadClient,
    view::Event,
    widget::{UploadOutcome, UploadWidget},
    DataForm, Settings,
};
use fwupload_proto::{
    ArchiveFormat, DEFAULT_HOST, DEFAULT_MAX_ATTEMPTS, DEFAULT_PORT, DEFAULT_REFRESHED,
};
use itertools::Itertools;
use simple_logger::SimpleLogger;

use crate::ui::TerminalView;

mod ui;

#[derive(Parser)]
struct Args {
    /// Host of the analysis server
    #[arg(long, env = "FWUPLOAD_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port of the analysis server
    #[arg(long, env = "FWUPLOAD_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Use https
    #[arg(long, env = "FWUPLOAD_HTTPS")]
    https: bool,

    /// Upload page index, as in home/upload/<refreshed>/
    #[arg(long, env = "FWUPLOAD_REFRESHED", default_value_t = DEFAULT_REFRESHED)]
    refreshed: u32,

    /// Maximum submissions per upload, renamed resubmissions included
    #[arg(long, env = "FWUPLOAD_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Refuse files that are not a supported archive
    #[arg(long)]
    strict: bool,

    /// Do not use nerd fonts
    #[arg(long)]
    no_nerd: bool,

    #[clap(subcommand)]
    cmd: SubCommand,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            host: self.host.clone(),
            port: self.port,
            https: self.https,
            refreshed: self.refreshed,
            max_attempts: self.max_attempts.max(1),
            strict_formats: self.strict,
        }
    }
}

#[derive(clap::Subcommand)]
enum SubCommand {
    /// Upload firmware files
    Upload(UploadArgs),
    /// Submit the firmware data form
    Form(FormArgs),
}

#[derive(Parser)]
struct UploadArgs {
    /// Files or directories to upload
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Parser)]
struct FormArgs {
    /// Form fields as name=value
    #[arg(required = true)]
    fields: Vec<String>,
}

type Widget = UploadWidget<HttpUploadClient, TerminalView>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .context("Failed to init logger")?;

    let args: Args = Args::parse();
    let settings = args.settings();
    log::debug!("save_file endpoint: {}", settings.endpoint());

    if let Err(e) = ctrlc::set_handler(|| std::process::exit(0)) {
        log::warn!("Failed to set ctrl-c handler: {}", e);
    }

    let view = TerminalView::new(!args.no_nerd);
    let widget = UploadWidget::new(HttpUploadClient::new(&settings), view, settings);

    match args.cmd {
        SubCommand::Upload(upload_args) => upload(&widget, upload_args.input).await,
        SubCommand::Form(form_args) => {
            let mut form = DataForm::default();
            for pair in &form_args.fields {
                form.add_pair(pair);
            }
            let mut event = Event::default();
            widget.save_data_fields(&mut event, Some(&form)).await;
            Ok(())
        }
    }
}

async fn upload(widget: &Widget, mut input: Vec<PathBuf>) -> anyhow::Result<()> {
    loop {
        match select_files(&input) {
            Ok(files) => {
                widget.view().print_files(&files);
                widget.show_files(&files.to_dtos()).await;
                if let UploadOutcome::Failed(e) = widget.submit(&files).await {
                    log::error!("Upload failed: {}", e);
                }
            }
            Err(e) => widget.view().print_error(&e),
        }
        println!();
        input = match widget.view().ask_more_files() {
            Some(paths) => paths,
            None => break,
        };
    }

    Ok(())
}

fn select_files(input: &[PathBuf]) -> anyhow::Result<SelectedFiles> {
    let mut files = SelectedFiles::default();
    for path in input.iter().unique() {
        let path = std::fs::canonicalize(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        if path.is_dir() {
            files.add_dir(&path)?;
        } else {
            files.add_file(&path, None)?;
        }
    }

    log::debug!("Selected {} file(s)", files.len());
    for file in files.unsupported() {
        log::warn!(
            "{} is not a supported archive ({})",
            file.file.file_name,
            ArchiveFormat::supported_extensions().join(" ")
        );
    }
    Ok(files)
}
