use std::io;
use std::sync::mpsc::Receiver;

use config::Config;

use crate::client::{Daemon, Response};

/// Run the fixed exercise sequence against the daemon: status check, reset
/// (hard or soft), configure and join when hard resetting, then the uplink
/// loop until a termination signal arrives.
pub(crate) fn exercise(config: &Config, term_receiver: Receiver<()>) -> Result<(), io::Error> {
    let daemon_url = config.daemon_url.clone().ok_or(io::Error::new(
        io::ErrorKind::NotFound,
        "Could not parse daemon base url",
    ))?;
    let daemon = Daemon::new(daemon_url);

    print_reply("status", &daemon.status()?);

    if config.hard_reset() {
        print_reply("hard_reset", &daemon.hard_reset()?);
        if let Some(radio) = &config.radio {
            print_reply("config/set", &daemon.configure(radio)?);
        }
        if let Some(keys) = &config.query {
            print_reply("config/get", &daemon.query(keys)?);
        }
        print_reply("join", &daemon.join()?);
    } else {
        print_reply("reset", &daemon.reset()?);
    }

    if config.send() {
        let uplink = config.uplink();
        let path = if config.binary() { "sendb" } else { "send" };
        println!(
            "Sending {uplink} every {}s",
            config.period_duration.as_secs()
        );

        // Send, then a "sleep" interruptible by receiving a message to exit.
        // Normal looping produces a timeout error, meaning send the next uplink.
        loop {
            print_reply(path, &daemon.send(&uplink, config.binary())?);
            if term_receiver.recv_timeout(config.period_duration).is_ok() {
                break;
            }
        }
    }

    println!("Exiting");

    Ok(())
}

fn print_reply(action: &str, response: &Response) {
    println!("{action}: status_code {}", response.code);
    let reply = response.reply();
    if !reply.is_empty() {
        print!("{reply}");
    }
}
