//! Code 128 subset C encoder for fiscal-document access keys.
//!
//! Subset C packs two decimal digits into each symbol, which is why it
//! is the right mode here: access keys are exactly 44 digits, or 22
//! symbols. The encoder is a pure function — the same key always
//! produces the same module sequence, and malformed input comes back as
//! a typed error, never a panic.
//!
//! Check character convention: the running weighted sum is seeded with
//! the Start C value (105) and accumulates `index * value` for each
//! 1-based data symbol, reduced modulo 103. This is the standard
//! Code 128 definition; the golden-vector tests below pin it down.

mod patterns;

use patterns::{START_C, STOP, SYMBOL_WIDTHS};

use crate::error::CoreError;
use crate::types::{AccessKey, ACCESS_KEY_LEN};

/// Quiet zone width on each side of the symbol, in modules.
pub const QUIET_ZONE_MODULES: usize = 10;

/// Minimum render height of the bars. The print layer may exceed this,
/// never undercut it.
pub const MIN_HEIGHT_MM: f32 = 8.0;

const PAIR_COUNT: usize = ACCESS_KEY_LEN / 2;

// ==============================================================================
// Bar Pattern
// ==============================================================================

/// The rendered module sequence of one barcode: quiet zone, Start C,
/// 22 data symbols, check symbol, STOP, quiet zone. `true` is a bar,
/// `false` is a space.
///
/// Opaque and deterministic; the print/render layer only relies on the
/// module sequence being identical for identical keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarPattern {
    modules: Vec<bool>,
    checksum: u8,
}

impl BarPattern {
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    /// Total width in modules, quiet zones included.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// The modulo-103 check character value.
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Printable form: one `1` per bar module, one `0` per space module.
    pub fn to_module_string(&self) -> String {
        self.modules
            .iter()
            .map(|&bar| if bar { '1' } else { '0' })
            .collect()
    }
}

// ==============================================================================
// Encoding
// ==============================================================================

/// Encode a raw key string, validating the 44-digit format first.
pub fn encode(raw: &str) -> Result<BarPattern, CoreError> {
    let key = AccessKey::parse(raw)?;
    Ok(encode_key(&key))
}

/// Encode an already-validated access key. Infallible: the `AccessKey`
/// invariant guarantees 22 well-formed digit pairs.
pub fn encode_key(key: &AccessKey) -> BarPattern {
    let pairs = digit_pairs(key);
    debug_assert_eq!(pairs.len(), PAIR_COUNT);

    let mut sum = START_C as u32;
    let mut modules = Vec::with_capacity(total_module_count());
    modules.resize(QUIET_ZONE_MODULES, false);

    push_symbol(&mut modules, START_C);
    for (index, &value) in pairs.iter().enumerate() {
        sum += (index as u32 + 1) * value as u32;
        push_symbol(&mut modules, value as usize);
    }

    let checksum = (sum % 103) as u8;
    push_symbol(&mut modules, checksum as usize);
    push_symbol(&mut modules, STOP);

    modules.resize(modules.len() + QUIET_ZONE_MODULES, false);
    BarPattern { modules, checksum }
}

/// Split the key into 22 two-digit values, 0–99 each.
fn digit_pairs(key: &AccessKey) -> Vec<u8> {
    key.as_str()
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| (pair[0] - b'0') * 10 + (pair[1] - b'0'))
        .collect()
}

/// Append one symbol's modules, alternating bar/space starting with a bar.
fn push_symbol(modules: &mut Vec<bool>, value: usize) {
    for (element, &width) in SYMBOL_WIDTHS[value].iter().enumerate() {
        let bar = element % 2 == 0;
        modules.extend(std::iter::repeat(bar).take(width as usize));
    }
}

/// Quiet zones + Start C + 22 data symbols + check symbol (11 modules
/// each) + STOP (13 modules).
const fn total_module_count() -> usize {
    QUIET_ZONE_MODULES * 2 + 11 * (PAIR_COUNT + 2) + 13
}
