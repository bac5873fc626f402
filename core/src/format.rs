//! Input masks for CNPJ and CEP.
//!
//! Both masks drop every non-ASCII-digit character and then insert the
//! punctuation at fixed digit offsets, only where a digit follows. Extra
//! digits beyond the mask are discarded.

/// Digits in a complete CNPJ.
pub const CNPJ_DIGITS: usize = 14;
/// Length of a complete formatted CNPJ, `NN.NNN.NNN/NNNN-NN`.
pub const CNPJ_FORMATTED_LEN: usize = 18;
/// Digits in a complete CEP.
pub const CEP_DIGITS: usize = 8;
/// Length of a complete formatted CEP, `NNNNN-NNN`.
pub const CEP_FORMATTED_LEN: usize = 9;

const CNPJ_SEPARATORS: &[(usize, char)] = &[(2, '.'), (5, '.'), (8, '/'), (12, '-')];
const CEP_SEPARATORS: &[(usize, char)] = &[(5, '-')];

pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// `"12345678000190"` -> `"12.345.678/0001-90"`. Partial input gets a
/// partial mask: `"12345"` -> `"12.345"`.
pub fn format_cnpj(value: &str) -> String {
    mask(value, CNPJ_DIGITS, CNPJ_SEPARATORS)
}

/// `"01310100"` -> `"01310-100"`.
pub fn format_cep(value: &str) -> String {
    mask(value, CEP_DIGITS, CEP_SEPARATORS)
}

fn mask(value: &str, max_digits: usize, separators: &[(usize, char)]) -> String {
    let mut out = String::with_capacity(max_digits + separators.len());
    for (i, digit) in value.chars().filter(char::is_ascii_digit).take(max_digits).enumerate() {
        if let Some((_, sep)) = separators.iter().find(|(at, _)| *at == i) {
            out.push(*sep);
        }
        out.push(digit);
    }
    out
}
