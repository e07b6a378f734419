//! `rtl_433` subprocess.
//!
//! Launches the radio decoder pointed at our UDP socket:
//!
//! ```text
//! rtl_433 -F syslog:<host>:<port> -f <frequency> [extra args...]
//! ```
//!
//! The child is killed and reaped when [`DecoderProcess`] is dropped.

use std::io;
use std::net::SocketAddr;
use std::process::{Child, Command};

use log::{info, warn};

use crate::adapters::udp::reachable;
use crate::config::DecoderConfig;
use crate::error::{Error, Result};

pub struct DecoderProcess {
    child: Child,
}

impl DecoderProcess {
    /// Spawn the decoder so it sends syslog datagrams to `target`.
    pub fn spawn(cfg: &DecoderConfig, target: SocketAddr) -> Result<Self> {
        let args = decoder_args(cfg, target);
        let child = Command::new(&cfg.program)
            .args(&args)
            .spawn()
            .map_err(Error::Decoder)?;
        info!(
            "Decoder started: {} {} (pid {})",
            cfg.program,
            args.join(" "),
            child.id()
        );
        Ok(Self { child })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// `Some(status)` once the decoder has exited.
    pub fn try_wait(&mut self) -> io::Result<Option<std::process::ExitStatus>> {
        self.child.try_wait()
    }
}

impl Drop for DecoderProcess {
    fn drop(&mut self) {
        match self.child.try_wait() {
            Ok(Some(status)) => info!("Decoder already exited ({})", status),
            _ => {
                if let Err(e) = self.child.kill() {
                    warn!("Decoder kill failed: {}", e);
                }
                match self.child.wait() {
                    Ok(status) => info!("Decoder stopped ({})", status),
                    Err(e) => warn!("Decoder wait failed: {}", e),
                }
            }
        }
    }
}

/// Command-line arguments for the decoder.
pub fn decoder_args(cfg: &DecoderConfig, target: SocketAddr) -> Vec<String> {
    let target = reachable(target);
    let host = match target {
        SocketAddr::V4(a) => a.ip().to_string(),
        SocketAddr::V6(a) => format!("[{}]", a.ip()),
    };
    let mut args = vec![
        "-F".to_owned(),
        format!("syslog:{}:{}", host, target.port()),
        "-f".to_owned(),
        cfg.frequency.clone(),
    ];
    args.extend(cfg.extra_args.iter().cloned());
    args
}
