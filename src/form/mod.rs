//! Budget form controller: holds the category/amount inputs, validates the
//! amount locally and submits `POST /setBudget`.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::api::BudgetService;
use crate::config::FailureReporting;
use crate::error::ValidationError;
use crate::models::{BudgetRequest, Category};
use crate::session::Session;
use crate::sync::{self, DataSync, MutationOutcome};

/// Shown with [`FailureReporting::Inline`] when the service does not acknowledge
pub const SAVE_FAILED_MESSAGE: &str = "Could not save budget. Please try again.";

/// Amount text split into its parts: `[+-]digits[.digits][e[+-]digits]`
struct NumericText<'a> {
    negative: bool,
    mantissa: String,
    exponent: Option<&'a str>,
}

impl<'a> NumericText<'a> {
    fn parse(text: &'a str) -> Option<Self> {
        let (negative, unsigned) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };
        let (body, exponent) = match unsigned.find(['e', 'E']) {
            Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
            None => (unsigned, None),
        };

        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
            return None;
        }
        if let Some(exponent) = exponent {
            let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            if digits.is_empty() || !all_digits(digits) {
                return None;
            }
        }

        let whole = if whole.is_empty() { "0" } else { whole };
        let mantissa = if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{fraction}")
        };
        Some(Self { negative, mantissa, exponent })
    }

    fn is_zero(&self) -> bool {
        self.mantissa.bytes().all(|b| b == b'0' || b == b'.')
    }

    fn to_decimal(&self) -> Option<Decimal> {
        let value = match self.exponent {
            None => Decimal::from_str(&self.mantissa).ok()?,
            Some(exponent) => {
                let exponent = exponent.strip_prefix('+').unwrap_or(exponent);
                Decimal::from_scientific(&format!("{}e{exponent}", self.mantissa)).ok()?
            }
        };
        Some(value)
    }
}

/// Parse the amount field. Accepts plain or scientific decimal notation,
/// surrounding whitespace ignored; the value must be strictly positive.
///
/// Positive input that does not survive conversion to a 28-digit decimal,
/// either by overflowing or by rounding to zero, is rejected as
/// [`ValidationError::OutOfRange`] rather than submitted as something else.
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let text = NumericText::parse(input.trim())
        .ok_or_else(|| ValidationError::NotANumber(input.to_string()))?;

    if text.negative || text.is_zero() {
        return Err(ValidationError::NotPositive(input.to_string()));
    }
    match text.to_decimal() {
        Some(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(ValidationError::OutOfRange(input.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Invalid(String),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Rejected before any request was sent
    Invalid(ValidationError),
    /// Request sent; see the mutation outcome for what the service said
    Sent(MutationOutcome),
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Sent(outcome) if outcome.is_acknowledged())
    }
}

#[derive(Debug, Clone)]
pub struct BudgetForm {
    category: Category,
    amount: String,
    error_message: String,
    reporting: FailureReporting,
}

impl Default for BudgetForm {
    fn default() -> Self {
        Self::new(FailureReporting::default())
    }
}

impl BudgetForm {
    pub fn new(reporting: FailureReporting) -> Self {
        Self {
            category: Category::default(),
            amount: String::new(),
            error_message: String::new(),
            reporting,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    pub fn state(&self) -> FormState {
        if self.error_message.is_empty() {
            FormState::Idle
        } else {
            FormState::Invalid(self.error_message.clone())
        }
    }

    /// Validate the inputs into a request. On failure only the error message changes.
    pub fn prepare(&mut self) -> Result<BudgetRequest, ValidationError> {
        match parse_amount(&self.amount) {
            Ok(amount) => Ok(BudgetRequest::new(self.category, amount)),
            Err(err) => {
                self.error_message = err.to_string();
                Err(err)
            }
        }
    }

    /// Validate, send, and on acknowledgement reset the form and reload once.
    ///
    /// When the service does not acknowledge, inputs are left exactly as the
    /// user entered them and no reload happens. With
    /// [`FailureReporting::Silent`] the error message is untouched as well.
    pub async fn submit(
        &mut self,
        session: &Session,
        service: &dyn BudgetService,
        sync: &dyn DataSync,
    ) -> SubmitOutcome {
        let request = match self.prepare() {
            Ok(request) => request,
            Err(err) => return SubmitOutcome::Invalid(err),
        };

        let outcome = sync::commit(
            sync,
            session,
            "set budget",
            service.set_budget(session, &request),
        )
        .await;

        if outcome.is_acknowledged() {
            self.reset();
        } else if self.reporting == FailureReporting::Inline {
            self.error_message = SAVE_FAILED_MESSAGE.to_string();
        }

        SubmitOutcome::Sent(outcome)
    }

    fn reset(&mut self) {
        self.category = Category::default();
        self.amount.clear();
        self.error_message.clear();
    }
}
