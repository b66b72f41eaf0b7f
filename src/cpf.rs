//! CPF checksum validation.
//!
//! A CPF is eleven decimal digits; the last two are verifier digits computed
//! from the preceding ones with a weighted sum modulo 11. Input may carry any
//! formatting (`529.982.247-25`); everything that is not an ASCII digit is
//! discarded before the check.
//!
//! [`validate`] is the hot-path predicate used by the file processor.
//! [`inspect`] runs the same algorithm but reports why a candidate was
//! rejected, which the verbose display level prints per line.

use std::fmt;

use crate::config::CPF_LENGTH;

/// Outcome of [`inspect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    /// Digit count after cleaning was not 11.
    WrongLength(usize),
    /// All eleven digits are the same (`000.000.000-00` and friends).
    RepeatedDigits,
    /// A verifier digit did not match. `position` is 9 or 10 (0-indexed).
    CheckDigitMismatch { position: usize, expected: u8, found: u8 },
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => write!(f, "valid"),
            Verdict::WrongLength(n) => write!(f, "expected {} digits, found {}", CPF_LENGTH, n),
            Verdict::RepeatedDigits => write!(f, "all digits identical"),
            Verdict::CheckDigitMismatch { position, expected, found } => write!(
                f,
                "check digit {} is {}, expected {}",
                position + 1,
                found,
                expected
            ),
        }
    }
}

/// Returns `true` if `input` holds a CPF whose verifier digits are correct.
///
/// Never panics: malformed input simply fails validation.
pub fn validate(input: &str) -> bool {
    let mut digits = [0u8; CPF_LENGTH];
    if collect_digits(input, &mut digits) != CPF_LENGTH || all_same(&digits) {
        return false;
    }
    let (d10, d11) = verifier_digits(&digits);
    d10 == digits[9] && d11 == digits[10]
}

/// Like [`validate`], but explains the rejection.
pub fn inspect(input: &str) -> Verdict {
    let mut digits = [0u8; CPF_LENGTH];
    let n = collect_digits(input, &mut digits);
    if n != CPF_LENGTH {
        return Verdict::WrongLength(n);
    }
    if all_same(&digits) {
        return Verdict::RepeatedDigits;
    }
    let (d10, d11) = verifier_digits(&digits);
    if d10 != digits[9] {
        return Verdict::CheckDigitMismatch { position: 9, expected: d10, found: digits[9] };
    }
    if d11 != digits[10] {
        return Verdict::CheckDigitMismatch { position: 10, expected: d11, found: digits[10] };
    }
    Verdict::Valid
}

/// Strips every character that is not an ASCII digit.
pub fn clean(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Computes both verifier digits from the nine base digits (values 0–9).
pub fn check_digits(base: &[u8; 9]) -> (u8, u8) {
    let mut digits = [0u8; CPF_LENGTH];
    digits[..9].copy_from_slice(base);
    let d10 = check_digit_at(&digits, 9);
    digits[9] = d10;
    (d10, check_digit_at(&digits, 10))
}

// Writes digit values into `out` and returns how many digits the input held,
// which may exceed the buffer length.
fn collect_digits(input: &str, out: &mut [u8; CPF_LENGTH]) -> usize {
    let mut n = 0;
    for b in input.bytes().filter(u8::is_ascii_digit) {
        if n < CPF_LENGTH {
            out[n] = b - b'0';
        }
        n += 1;
    }
    n
}

fn all_same(digits: &[u8; CPF_LENGTH]) -> bool {
    digits.iter().all(|&d| d == digits[0])
}

// Both verifier digits as computed from the digits actually present, so the
// second one is weighted over the input's own 10th digit.
fn verifier_digits(digits: &[u8; CPF_LENGTH]) -> (u8, u8) {
    (check_digit_at(digits, 9), check_digit_at(digits, 10))
}

// sum(digit[j] * (i + 1 - j)) for j < i, then (sum * 10) mod 11 with 10 -> 0.
fn check_digit_at(digits: &[u8; CPF_LENGTH], i: usize) -> u8 {
    let sum: usize = digits[..i]
        .iter()
        .enumerate()
        .map(|(j, &d)| d as usize * (i + 1 - j))
        .sum();
    match (sum * 10) % 11 {
        10 => 0,
        d => d as u8,
    }
}
