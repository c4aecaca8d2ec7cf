//! Procedural identifiers for systems, crew and passengers.

use rand::Rng;
use rand::seq::IndexedRandom;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// Catalog name for a star system, e.g. `AB-1234-C-5678`.
pub fn system_name(rng: &mut impl Rng) -> String {
    let mut name = String::with_capacity(14);
    push_random(rng, LETTERS, 2, &mut name);
    name.push('-');
    push_random(rng, DIGITS, 4, &mut name);
    name.push('-');
    push_random(rng, LETTERS, 1, &mut name);
    name.push('-');
    push_random(rng, DIGITS, 4, &mut name);
    name
}

/// Service identifier for a crew member, e.g. `KP-850212-Z`.
pub fn crew_name(rng: &mut impl Rng) -> String {
    let mut name = String::with_capacity(11);
    push_random(rng, LETTERS, 2, &mut name);
    name.push('-');
    push_random(rng, DIGITS, 6, &mut name);
    name.push('-');
    push_random(rng, LETTERS, 1, &mut name);
    name
}

/// Ticket identifier for a passenger, e.g. `TRVL-8592-XK`.
pub fn passenger_ticket(rng: &mut impl Rng) -> String {
    let mut name = String::with_capacity(12);
    push_random(rng, LETTERS, 4, &mut name);
    name.push('-');
    push_random(rng, DIGITS, 4, &mut name);
    name.push('-');
    push_random(rng, LETTERS, 2, &mut name);
    name
}

fn push_random(rng: &mut impl Rng, source: &[u8], count: usize, out: &mut String) {
    for _ in 0..count {
        if let Some(&byte) = source.choose(rng) {
            out.push(char::from(byte));
        }
    }
}
