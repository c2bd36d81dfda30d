use std::io;
use std::sync::mpsc::channel;

use config::{find_config_file, read_config, CONFIG_FILE_NAME};

mod client;
mod driver;

fn main() -> Result<(), io::Error> {
    let config_file_path = find_config_file(CONFIG_FILE_NAME)?;
    let config = read_config(&config_file_path)?;
    println!("Config file loaded from: \"{}\"", config_file_path.display());
    println!("Daemon: {:?}", config.daemon_url.as_ref().map(|url| url.as_str()));

    let (tx, rx) = channel();
    ctrlc::set_handler(move || tx.send(()).expect("Could not send signal on channel."))
        .expect("Error setting Ctrl-C handler");

    driver::exercise(&config, rx)
}
