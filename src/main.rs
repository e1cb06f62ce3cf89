use std::env;
use std::process;

use oathcode::{Secret, Totp, DEFAULT_STEP};

fn main() {
    let secret = match env::args().nth(1) {
        Some(arg) => arg,
        None => {
            eprintln!("usage: oathcode <base32-secret>");
            process::exit(1);
        }
    };

    let totp = Totp::new(DEFAULT_STEP, Secret::Encoded(secret).to_bytes());
    match totp.generate_current() {
        Ok(code) => println!("{}", code),
        Err(err) => {
            eprintln!("oathcode: system clock is unreadable: {}", err);
            process::exit(1);
        }
    }
}
