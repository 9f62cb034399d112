//! imgup CLI
//!
//! Uploads one image file to the configured hosting account and prints
//! the returned secure URL. The file argument is the command-line
//! analogue of a picker selection; extra files are ignored with a
//! warning, first one wins.

use clap::{Arg, ArgAction, ArgMatches, Command};
use imgup::{
    clipboard, view, HostConfig, SystemClipboard, UploadOptions, UploadRequest, Uploader,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;

#[tokio::main]
async fn main() {
    let matches = Command::new("imgup")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Upload an image to an image-hosting account via its unsigned preset")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("copy")
                .short('c')
                .long("copy")
                .help("Copy the returned URL to the system clipboard")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("cloud-name")
                .long("cloud-name")
                .help("Account identifier at the image host (or IMGUP_CLOUD_NAME)"),
        )
        .arg(
            Arg::new("preset")
                .long("preset")
                .help("Unsigned upload preset name (or IMGUP_UPLOAD_PRESET)"),
        )
        .arg(
            Arg::new("api-base")
                .long("api-base")
                .help("API base URL of the host (or IMGUP_API_BASE)"),
        )
        .arg(
            Arg::new("file")
                .help("Image file(s) to upload; only the first is used")
                .required(true)
                .num_args(1..),
        )
        .get_matches();

    let mut logger = env_logger::Builder::from_default_env();
    if matches.get_flag("verbose") {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(err) = run(&matches).await {
        let status = view::error_status(&err);
        eprintln!("{}", status.message);
        std::process::exit(1);
    }
}

fn config_from(matches: &ArgMatches) -> HostConfig {
    let mut config = HostConfig::from_env();
    if let Some(name) = matches.get_one::<String>("cloud-name") {
        config = config.cloud_name(name);
    }
    if let Some(preset) = matches.get_one::<String>("preset") {
        config = config.upload_preset(preset);
    }
    if let Some(base) = matches.get_one::<String>("api-base") {
        config = config.api_base(base);
    }
    config
}

async fn run(matches: &ArgMatches) -> imgup::Result<()> {
    let files: Vec<&String> = matches
        .get_many::<String>("file")
        .map(|v| v.collect())
        .unwrap_or_default();
    if files.len() > 1 {
        warn!("{} files given; uploading the first only", files.len());
    }
    let path = files[0];

    let mut uploader = Uploader::new(config_from(matches))?;
    let request = UploadRequest::from_path(path)?;

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let ticker_bar = bar.clone();
    let options = UploadOptions::new().on_progress(move |pct| ticker_bar.set_position(pct as u64));

    let receipt = match uploader.submit(request, options).await {
        Ok(receipt) => receipt,
        Err(err) => {
            bar.finish_and_clear();
            return Err(err);
        }
    };
    bar.finish_and_clear();

    let preview = view::Preview::new(&receipt);
    let status = view::success_status();
    println!("{}", status.message);
    println!("{}", preview.copyable_url);

    if matches.get_flag("copy") {
        let mut target = SystemClipboard::new()?;
        let confirmation = clipboard::copy_url(&mut target, &preview)?;
        println!("Copied!");
        // Keep the confirmation up for its fixed duration before exiting,
        // since dropping the process can drop clipboard ownership on some
        // platforms.
        tokio::time::sleep(confirmation.revert_after()).await;
    }

    Ok(())
}
