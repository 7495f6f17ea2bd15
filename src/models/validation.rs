//! Custom field validators used with `#[validate(custom(...))]`.

use std::borrow::Cow;

use validator::ValidationError;

fn digits(value: &str, len: usize, code: &'static str, message: &'static str) -> Result<(), ValidationError> {
    if value.len() == len && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new(code).with_message(Cow::Borrowed(message)))
    }
}

/// Mobile numbers are exactly 10 ASCII digits.
pub fn validate_mobile_number(value: &str) -> Result<(), ValidationError> {
    digits(
        value,
        10,
        "mobile_number",
        "Mobile number must be a 10-digit number.",
    )
}

pub fn validate_account_number(value: i64) -> Result<(), ValidationError> {
    digits(
        &value.to_string(),
        10,
        "account_number",
        "Account number must be a 10-digit number.",
    )
}

pub fn validate_card_number(value: &str) -> Result<(), ValidationError> {
    digits(
        value,
        12,
        "card_number",
        "Card number must be a 12-digit number.",
    )
}

pub fn validate_loan_number(value: &str) -> Result<(), ValidationError> {
    digits(
        value,
        12,
        "loan_number",
        "Loan number must be a 12-digit number.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("9876543210" => true ; "ten digits")]
    #[test_case("987654321" => false ; "too short")]
    #[test_case("98765432100" => false ; "too long")]
    #[test_case("98765x3210" => false ; "non digit")]
    #[test_case("" => false ; "empty")]
    fn mobile_number(value: &str) -> bool {
        validate_mobile_number(value).is_ok()
    }

    #[test_case(1_234_567_890 => true ; "ten digits")]
    #[test_case(123_456_789 => false ; "nine digits")]
    #[test_case(-123_456_789 => false ; "negative")]
    fn account_number(value: i64) -> bool {
        validate_account_number(value).is_ok()
    }

    #[test]
    fn card_and_loan_numbers_are_twelve_digits() {
        assert!(validate_card_number("100012345678").is_ok());
        assert!(validate_loan_number("100012345678").is_ok());
        assert!(validate_card_number("1000123456").is_err());
    }
}
