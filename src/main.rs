use std::{io, process::ExitCode};

use log::LevelFilter;
use simple_logger::SimpleLogger;
use weeklypost::{config::Config, media, pick_media_url, report::report, Client, Result};

#[tokio::main]
async fn main() -> ExitCode {
    // logs go to stderr so stdout only ever carries the URL
    if let Err(err) = SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .with_utc_timestamps()
        .env()
        .init()
    {
        eprintln!("could not set up logging: {err}");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env(std::env::args_os())?;
    let client = Client::authenticate(&config.credentials, &config.client).await?;

    let url = pick_media_url(&client, &config.query, &mut rand::thread_rng()).await?;
    let url = url.as_deref().map(|url| {
        if config.strip_query {
            media::strip_query(url)
        } else {
            url
        }
    });

    if url.is_some_and(media::is_video) {
        log::info!("result is a video stream and may not embed everywhere");
    }

    report(url, &mut io::stdout().lock())
}
