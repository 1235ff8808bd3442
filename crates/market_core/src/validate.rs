use thiserror::Error;

/// Amount a new bid must exceed the current highest bid by.
pub const BID_INCREMENT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("enter a bid amount as a number")]
    InvalidAmount,
    #[error("bid must be greater than zero")]
    NotPositive,
    #[error("bid must be at least {minimum:.2}")]
    BidTooLow { minimum: f64, offered: f64 },
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Lowest acceptable bid: highest bid plus the increment, or the starting
/// price while nobody has bid.
pub fn minimum_bid(current_bid: Option<f64>, starting_price: f64) -> f64 {
    match current_bid {
        Some(current) => current + BID_INCREMENT,
        None => starting_price,
    }
}

pub fn parse_bid_amount(input: &str) -> Result<f64, ValidationError> {
    let cleaned = input.trim().trim_start_matches('$').replace(',', "");
    let amount: f64 = cleaned
        .parse()
        .map_err(|_| ValidationError::InvalidAmount)?;
    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmount);
    }
    if amount <= 0.0 {
        return Err(ValidationError::NotPositive);
    }
    Ok(amount)
}

pub fn validate_bid(amount: f64, minimum: f64) -> Result<(), ValidationError> {
    if amount < minimum {
        return Err(ValidationError::BidTooLow {
            minimum,
            offered: amount,
        });
    }
    Ok(())
}

pub fn validate_password_confirmation(
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
