use crate::transcript::Transcript;
use anyhow::{Context, Result};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::PathBuf};

pub const EXPORT_FALLBACK_DIR: &str = "cache/exports";

const EXPORT_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

/// Export file name for a given date, `chat-YYYY-MM-DD.html`.
pub fn export_file_name(date: Date) -> Result<String> {
    let stamp = date
        .format(EXPORT_DATE_FORMAT)
        .context("failed to format export date")?;
    Ok(format!("chat-{stamp}.html"))
}

/// Write the transcript markup to the download directory, named by the
/// current date. Returns the written path.
#[cfg(not(target_arch = "wasm32"))]
pub fn export_transcript(transcript: &Transcript) -> Result<PathBuf> {
    let dir = dirs::download_dir().unwrap_or_else(|| PathBuf::from(EXPORT_FALLBACK_DIR));
    fs::create_dir_all(&dir).context("failed to create export directory")?;
    let path = dir.join(export_file_name(OffsetDateTime::now_utc().date())?);
    fs::write(&path, transcript.to_html()).context("failed to write transcript export")?;
    Ok(path)
}

#[cfg(target_arch = "wasm32")]
pub fn export_transcript(_transcript: &Transcript) -> Result<std::path::PathBuf> {
    anyhow::bail!("transcript export is not available on web builds")
}

pub fn format_message_timestamp(timestamp: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = timestamp?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn export_file_name_uses_the_date() {
        let name = export_file_name(date!(2026 - 08 - 28)).expect("format");
        assert_eq!(name, "chat-2026-08-28.html");
    }

    #[test]
    fn message_timestamps_render_in_twelve_hour_form() {
        let stamp = OffsetDateTime::UNIX_EPOCH;
        let rendered = format_message_timestamp(Some(stamp)).expect("format");
        assert!(rendered.ends_with("AM") || rendered.ends_with("PM"));
        assert_eq!(format_message_timestamp(None), None);
    }
}
