//! Canonical text form of a move sequence.
//!
//! Sequences are rendered as move-numbered SAN (`1.e4 c5 2.Nf3 d6`). Every place
//! that forms a sequence string goes through [`format_sequence`], since string
//! equality of sequences is the aggregation key downstream.

/// Join plies into the canonical sequence text.
pub fn format_sequence<S: AsRef<str>>(plies: &[S]) -> String {
    let mut out = String::new();
    for (i, ply) in plies.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if i % 2 == 0 {
            out.push_str(&format!("{}.", i / 2 + 1));
        }
        out.push_str(ply.as_ref());
    }
    out
}

/// Split a canonical sequence (or any move-numbered SAN text) back into plies.
pub fn sequence_plies(sequence: &str) -> Vec<&str> {
    sequence
        .split_whitespace()
        .map(strip_move_number)
        .filter(|ply| !ply.is_empty())
        .collect()
}

/// Number of plies in a canonical sequence.
pub fn ply_count(sequence: &str) -> usize {
    sequence_plies(sequence).len()
}

/// True if `prefix` is a strict ply-wise prefix of `sequence`.
pub fn is_strict_prefix(prefix: &str, sequence: &str) -> bool {
    let prefix_plies = sequence_plies(prefix);
    let plies = sequence_plies(sequence);
    prefix_plies.len() < plies.len() && plies.starts_with(&prefix_plies)
}

// "12.Nf3" -> "Nf3", "12...Nf6" -> "Nf6", "12." -> ""
fn strip_move_number(token: &str) -> &str {
    let digits = token.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits > 0 && token[digits..].starts_with('.') {
        token[digits..].trim_start_matches('.')
    } else {
        token
    }
}
