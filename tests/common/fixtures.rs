//! Static log corpora used across harnesses.
//!
//! Lines follow the journal short format the kernel firewall rules produce:
//! `Mon DD HH:MM:SS host kernel: <MARKER> IN=.. OUT= MAC=.. SRC=.. ...`.

/// External drops, each with a destination port.
pub const CORPUS_EXTERNAL: &[&str] = &[
    "Oct 18 12:00:01 gw kernel: EXTERNAL_DROPPED: IN=eth0 OUT= MAC=00:11 SRC=203.0.113.7 DST=198.51.100.2 LEN=60 PROTO=TCP SPT=40000 DPT=22 WINDOW=64240",
    "Oct 18 12:00:04 gw kernel: EXTERNAL_DROPPED: IN=eth0 OUT= MAC=00:11 SRC=192.0.2.44 DST=198.51.100.2 LEN=40 PROTO=TCP SPT=51515 DPT=3389 WINDOW=1024",
    "Oct 18 12:00:09 gw kernel: EXTERNAL_DROPPED: IN=eth0 OUT= MAC=00:11 SRC=198.18.0.9 DST=198.51.100.2 LEN=84 PROTO=ICMP TYPE=8 CODE=0",
];

/// Internal drops.
pub const CORPUS_INTERNAL: &[&str] = &[
    "Oct 18 12:00:02 gw kernel: INTERNAL_DROPPED: IN=lan0 OUT=eth0 MAC=aa:bb SRC=10.0.0.5 DST=8.8.8.8 LEN=72 PROTO=UDP SPT=5353 DPT=53",
    "Oct 18 12:00:06 gw kernel: INTERNAL_DROPPED: IN=lan0 OUT=eth0 MAC=aa:bb SRC=10.0.0.17 DST=1.1.1.1 LEN=60 PROTO=TCP SPT=33012 DPT=853",
];

/// Journal noise: lines that are not drops and must be ignored silently.
pub const CORPUS_NOISE: &[&str] = &[
    "Oct 18 12:00:03 gw systemd[1]: Started Daily apt download activities.",
    "Oct 18 12:00:05 gw kernel: ACCEPTED: IN=eth0 OUT= MAC=00:11 SRC=203.0.113.7 DPT=443",
    "Oct 18 12:00:07 gw sshd[811]: Accepted publickey for admin from 10.0.0.5 port 50022 ssh2",
];

/// Lines with fewer than six tokens.
pub const CORPUS_MALFORMED: &[&str] = &["", "-- Boot 3f2a --", "Oct 18 12:00:08"];

/// A journal-like stream interleaving every corpus above, in timestamp order.
pub fn corpus_mixed() -> Vec<&'static str> {
    vec![
        CORPUS_EXTERNAL[0],
        CORPUS_INTERNAL[0],
        CORPUS_NOISE[0],
        CORPUS_EXTERNAL[1],
        CORPUS_NOISE[1],
        CORPUS_MALFORMED[1],
        CORPUS_INTERNAL[1],
        CORPUS_NOISE[2],
        CORPUS_MALFORMED[2],
        CORPUS_EXTERNAL[2],
    ]
}

/// Generate `n` distinct external drop lines for volume tests.
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            format!(
                "Oct 18 13:{:02}:{:02} gw kernel: EXTERNAL_DROPPED: IN=eth0 OUT= MAC=00:11 SRC=203.0.{}.{} PROTO=TCP SPT={} DPT={}",
                (i / 60) % 60,
                i % 60,
                (i / 256) % 256,
                i % 256,
                1024 + i % 60000,
                i % 65536,
            )
        })
        .collect()
}
