//! Input validation rules for users and entries

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

use crate::models::Entry;

pub const INVALID_DESCRIPTION: &str = "Informe uma descrição válida.";
pub const INVALID_MONTH: &str = "Informe um mês válido.";
pub const INVALID_YEAR: &str = "Informe um ano válido.";
pub const MISSING_USER: &str = "Informe um usuário.";
pub const INVALID_AMOUNT: &str = "Informe um valor válido.";
pub const MISSING_TYPE: &str = "Informe um tipo de lançamento.";

/// Amounts are stored as NUMERIC(16, 2): at most 14 integer digits, 2 decimals
pub const AMOUNT_SCALE: u32 = 2;
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(0x107a_4000, 0x5af3, 0, false, 0);

pub const INVALID_NAME: &str = "Informe um nome válido.";
pub const INVALID_EMAIL: &str = "Informe um email válido.";

/// Validate an entry before it is persisted.
///
/// Rules are checked in a fixed order and the first failure wins: description,
/// month, year, owning user, amount, type.
pub fn validate_entry(entry: &Entry) -> Result<(), &'static str> {
    if entry
        .description
        .as_deref()
        .is_none_or(|d| d.trim().is_empty())
    {
        return Err(INVALID_DESCRIPTION);
    }

    if entry.month.is_none_or(|m| !(1..=12).contains(&m)) {
        return Err(INVALID_MONTH);
    }

    // four digits, no sign
    if entry.year.is_none_or(|y| !(1000..=9999).contains(&y)) {
        return Err(INVALID_YEAR);
    }

    if entry.user_id.is_none() {
        return Err(MISSING_USER);
    }

    if entry.amount.is_none_or(|a| {
        a <= Decimal::ZERO || a >= AMOUNT_LIMIT || a.normalize().scale() > AMOUNT_SCALE
    }) {
        return Err(INVALID_AMOUNT);
    }

    if entry.entry_type.is_none() {
        return Err(MISSING_TYPE);
    }

    Ok(())
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err(INVALID_NAME);
    }

    Ok(())
}

/// Validate email syntax
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() || email.len() > 254 {
        return Err(INVALID_EMAIL);
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(INVALID_EMAIL);
    }

    Ok(())
}
