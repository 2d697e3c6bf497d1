//! Random literal synthesis for generated cells.

use crate::schema::ColumnType;
use rand::Rng;

/// Alphabet for generated string values. It deliberately excludes quote and
/// backslash characters, so rendered literals need no escaping; widening it
/// means the INSERT builder must grow an escaping pass.
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of generated string values. Shorter than the declared varchar
/// width on purpose; the headroom is part of the fixture's intent.
pub const STRING_VALUE_LEN: usize = 20;

/// Render one random literal for a column of the given type.
///
/// Integers are uniform over the full signed 32-bit range. Strings are
/// exactly [`STRING_VALUE_LEN`] letters, double-quoted.
pub fn render_value<R: Rng>(column_type: ColumnType, rng: &mut R) -> String {
    match column_type {
        ColumnType::Int => rng.random::<i32>().to_string(),
        ColumnType::VarChar(_) => format!("\"{}\"", random_letters(rng, STRING_VALUE_LEN)),
    }
}

fn random_letters<R: Rng>(rng: &mut R, len: usize) -> String {
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        out.push(LETTERS[rng.random_range(0..LETTERS.len())] as char);
    }
    out
}
