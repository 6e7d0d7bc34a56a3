//! Stdin feed — reads lines piped into the process, e.g.
//! `journalctl -f | dropwatch --source stdin`.

use tokio::io::{BufReader, Stdin};

pub fn open() -> BufReader<Stdin> {
    BufReader::new(tokio::io::stdin())
}
