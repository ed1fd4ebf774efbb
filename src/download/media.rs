//! Media file downloading.

use std::path::Path;

use futures::StreamExt;
use indicatif::{MultiProgress, ProgressBar};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::FapelloClient;
use crate::error::{Error, Result};
use crate::events::{Event, EventSink};
use crate::fs::paths::get_download_path;
use crate::media::MediaItem;
use crate::output::create_download_bar;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// A byte progress bar attached to `bars`, for downloads above the threshold.
fn download_bar(bars: Option<&MultiProgress>, content_length: Option<u64>) -> Option<ProgressBar> {
    match (bars, content_length) {
        (Some(bars), Some(len)) if len > PROGRESS_THRESHOLD => {
            Some(bars.add(create_download_bar(len)))
        }
        _ => None,
    }
}

/// Stream `url` into `output_path`, returning the number of bytes written.
///
/// An existing file is overwritten. On failure the partial file is left in place.
pub async fn download_media(
    client: &FapelloClient,
    url: &str,
    output_path: &Path,
    bars: Option<&MultiProgress>,
) -> Result<u64> {
    let response = client.download_file(url).await?;

    let progress = download_bar(bars, response.content_length());

    let mut file = File::create(output_path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(ref pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush().await?;
    finish(progress);

    Ok(downloaded)
}

fn finish(progress: Option<ProgressBar>) {
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
}

/// Download `item` into `folder`, recording the result.
///
/// Never fails: errors are recorded on `sink` and reported as `false`.
pub async fn download_to_file(
    client: &FapelloClient,
    item: &MediaItem,
    folder: &Path,
    bars: Option<&MultiProgress>,
    sink: &dyn EventSink,
) -> bool {
    let result = async {
        let output_path = get_download_path(folder, item)?;
        let bytes = download_media(client, &item.url, &output_path, bars).await?;
        Ok::<_, Error>((output_path, bytes))
    }
    .await;

    match result {
        Ok((path, bytes)) => {
            sink.record(Event::Downloaded {
                url: item.url.clone(),
                path,
                bytes,
            });
            true
        }
        Err(e) => {
            sink.record(Event::DownloadFailed {
                url: item.url.clone(),
                error: e.to_string(),
            });
            false
        }
    }
}
