//! Source container download.
//!
//! The body is streamed into a temporary file next to the destination in fixed-size blocks,
//! and is only moved to the destination once complete.
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use reqwest::Url;

use crate::error::Error;

const BLOCK_SIZE: usize = 4096;

/// Copy `reader` into `writer` in blocks, advancing `progress` along the way.
///
/// If `expected` is provided and non-zero, a different number of copied bytes is an error.
/// Returns the number of copied bytes.
pub fn copy_with_progress<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    expected: Option<u64>,
    progress: &ProgressBar,
) -> Result<u64, Error> {
    let mut buf = [0u8; BLOCK_SIZE];
    let mut received = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        writer.write_all(&buf[..n])?;
        received += n as u64;
        progress.inc(n as u64);
    }
    writer.flush()?;

    match expected {
        Some(expected) if expected != 0 && expected != received => {
            Err(Error::DownloadIncomplete { expected, received })
        }
        _ => Ok(received),
    }
}

/// Holds the url to download and the http client that will make the request.
pub struct Downloader {
    url: Url,
    client: reqwest::blocking::Client,
    show_progress: bool,
}

impl Downloader {
    pub fn new(url: &str) -> Result<Self, Error> {
        let url = Url::parse(url).map_err(|e| Error::Custom(format!("invalid url {}: {}", url, e)))?;
        Ok(Self {
            url,
            client: reqwest::blocking::Client::new(),
            show_progress: true,
        })
    }

    /// Disable the progress bar.
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Download into `dst`, returning the number of received bytes.
    ///
    /// An existing file at `dst` is only replaced if the download succeeds.
    pub fn save_to(&self, dst: &Path) -> Result<u64, Error> {
        info!("downloading {} into {:?}", self.url, dst);
        let response = self.client.get(self.url.clone()).send()?.error_for_status()?;
        let expected = response.content_length();
        debug!("declared content length: {:?}", expected);

        let progress = self.progress_bar(expected);

        let parent = match dst.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let tmp = tempfile::Builder::new()
            .prefix(".download")
            .suffix(".part")
            .tempfile_in(parent)?;

        let mut writer = BufWriter::new(tmp);
        let received = copy_with_progress(response, &mut writer, expected, &progress)?;
        let tmp = writer.into_inner().map_err(|e| e.into_error())?;
        tmp.persist(dst)?;

        progress.finish();
        info!("downloaded {} bytes", received);
        Ok(received)
    }

    fn progress_bar(&self, len: Option<u64>) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        match len {
            Some(len) if len > 0 => {
                let pb = ProgressBar::new(len);
                let style = ProgressStyle::with_template(
                    "[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta} @ {bytes_per_sec})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> ");
                pb.set_style(style);
                pb
            }
            _ => ProgressBar::new_spinner(),
        }
    }
}
