use std::{
    fmt::Write,
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use colored::Colorize;
use comfy_table::Table;
use fwupload_lib::{
    select::SelectedFiles,
    view::{UploadView, ViewError},
};
use fwupload_proto::dto::FileDto;
use indicatif::{ProgressBar, ProgressState, ProgressStyle};

const PROGRESS_BAR_NO_NERD_TICK_CHARS: &'static str = "+x*";

pub struct TerminalView {
    use_nerd_fonts: bool,
    file_name: Mutex<String>,
    pb: Mutex<Option<ProgressBar>>,
}

impl TerminalView {
    pub fn new(use_nerd_fonts: bool) -> Self {
        Self {
            use_nerd_fonts,
            file_name: Mutex::new(String::new()),
            pb: Mutex::new(None),
        }
    }

    pub fn print_files(&self, files: &SelectedFiles) {
        let mut table = Table::new();
        table.set_header(vec!["No.", "Name", "Size"]);
        for file in files.iter() {
            table.add_row(vec![
                &format!("{}", file.index + 1),
                &self.file_name(&file.file),
                &self.file_size(&file.file),
            ]);
        }
        println!("{}", table);
    }

    pub fn print_error(&self, error: &impl std::fmt::Display) {
        println!("{}", error.to_string().bold().red());
    }

    pub fn ask_more_files(&self) -> Option<Vec<PathBuf>> {
        let input = inquire::Text::new("Files to upload next:")
            .with_help_message("space separated paths, esc to exit")
            .prompt_skippable()
            .ok()
            .flatten()?;
        let paths: Vec<PathBuf> = input.split_whitespace().map(PathBuf::from).collect();
        if paths.is_empty() {
            None
        } else {
            Some(paths)
        }
    }

    fn progress_style(&self) -> ProgressStyle {
        let style = ProgressStyle::with_template("{spinner} [{elapsed_precise}] [{msg}] [{bar:.cyan/blue}] {percent}% ({eta})")
            .unwrap()
            .with_key("eta", |state: &ProgressState, w: &mut dyn Write| write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap())
            .progress_chars("#>-");
        if self.use_nerd_fonts {
            style
        } else {
            style.tick_chars(PROGRESS_BAR_NO_NERD_TICK_CHARS)
        }
    }

    fn file_name(&self, file: &FileDto) -> String {
        format!("{} {}", self.file_icon(file), file.file_name)
    }

    fn file_icon(&self, file: &FileDto) -> &'static str {
        if !self.use_nerd_fonts {
            return "";
        }
        if file.is_supported() {
            "󰗄"
        } else {
            "󰈔"
        }
    }

    fn file_size(&self, file: &FileDto) -> String {
        humansize::format_size(file.size, humansize::DECIMAL)
    }

    fn finish_progress(&self) {
        if let Some(pb) = lock(&self.pb).take() {
            pb.finish_and_clear();
        }
    }
}

#[async_trait]
impl UploadView for TerminalView {
    fn show_file_name(&self, name: &str) -> Result<(), ViewError> {
        *lock(&self.file_name) = name.to_string();
        println!("{} {}", "Uploading".bold(), name.cyan());
        Ok(())
    }

    fn set_progress(&self, percent: u8) {
        let mut pb = lock(&self.pb);
        let pb = pb.get_or_insert_with(|| {
            ProgressBar::new(100)
                .with_style(self.progress_style())
                .with_message(lock(&self.file_name).clone())
        });
        pb.set_position(percent as u64);
    }

    async fn confirm_conflict(&self, file_name: &str) -> bool {
        self.finish_progress();
        inquire::Confirm::new("A file with the same name exists, rename and save it?")
            .with_default(true)
            .with_help_message(&format!("{} is already on the server", file_name))
            .prompt_skippable()
            .is_ok_and(|r| r == Some(true))
    }

    async fn prompt_file_name(&self, default: &str) -> Option<String> {
        let name = inquire::Text::new("Please enter the new file name")
            .with_default(default)
            .prompt_skippable()
            .ok()
            .flatten()?;
        *lock(&self.file_name) = name.clone();
        Some(name)
    }

    async fn alert(&self, message: &str) {
        self.finish_progress();
        println!("{}", message.bold());
    }

    fn reload(&self) {
        self.finish_progress();
        lock(&self.file_name).clear();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
