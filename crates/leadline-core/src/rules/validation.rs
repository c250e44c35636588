use crate::domain::email::is_valid_email;
use crate::domain::phone::is_valid_phone;
use crate::domain::position::Position;
use crate::error::ValidationError;
use crate::timezone::is_known_zone;

pub const MIN_CREDIT_SCORE: i32 = 300;
pub const MAX_CREDIT_SCORE: i32 = 850;
/// Ceiling for any dollar amount on a lead, positions included.
pub const MAX_AMOUNT: i64 = 1_000_000_000;

/// Borrowed view of the fields that carry validation rules, shared by drafts
/// and stored leads.
#[derive(Debug, Clone, Copy)]
pub struct LeadFields<'a> {
    pub business_name: &'a str,
    pub owner_name: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub credit_score: Option<i32>,
    pub funding_amount: i64,
    pub monthly_revenue: i64,
    pub positions: &'a [Position],
    pub client_timezone: &'a str,
}

pub fn validate_lead_fields(fields: &LeadFields<'_>) -> Result<(), ValidationError> {
    if fields.business_name.trim().is_empty() {
        return Err(ValidationError::MissingBusinessName);
    }
    if fields.owner_name.trim().is_empty() {
        return Err(ValidationError::MissingOwnerName);
    }
    if fields.phone.trim().is_empty() {
        return Err(ValidationError::MissingPhone);
    }
    if !is_valid_phone(fields.phone) {
        return Err(ValidationError::InvalidPhone(fields.phone.trim().to_string()));
    }
    if let Some(email) = fields.email.filter(|e| !e.trim().is_empty()) {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail(email.trim().to_string()));
        }
    }
    if let Some(score) = fields.credit_score {
        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&score) {
            return Err(ValidationError::InvalidCreditScore(score));
        }
    }
    if fields.funding_amount < 0 {
        return Err(ValidationError::NegativeAmount("funding amount"));
    }
    if fields.monthly_revenue < 0 {
        return Err(ValidationError::NegativeAmount("monthly revenue"));
    }
    if fields.funding_amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge("funding amount"));
    }
    if fields.monthly_revenue > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge("monthly revenue"));
    }
    validate_positions(fields.positions)?;
    if !is_known_zone(fields.client_timezone) {
        return Err(ValidationError::UnknownTimezone(
            fields.client_timezone.to_string(),
        ));
    }
    Ok(())
}

/// Positions are numbered from 1 in errors, the way the form shows them.
pub fn validate_positions(positions: &[Position]) -> Result<(), ValidationError> {
    for (index, position) in positions.iter().enumerate() {
        if !position.is_active() {
            continue;
        }
        if position.original_amount <= 0 {
            return Err(ValidationError::PositionOriginalAmount(index + 1));
        }
        if position.current_balance < 0 {
            return Err(ValidationError::PositionNegativeBalance(index + 1));
        }
        if position.original_amount > MAX_AMOUNT || position.current_balance > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge("position amount"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_lead_fields, validate_positions, LeadFields, MAX_AMOUNT};
    use crate::domain::position::{PaymentFrequency, Position};
    use crate::error::ValidationError;

    fn fields<'a>(positions: &'a [Position]) -> LeadFields<'a> {
        LeadFields {
            business_name: "Sunrise Bakery",
            owner_name: "Maria Lopez",
            phone: "(415) 555-1212",
            email: Some("maria@sunrise.com"),
            credit_score: Some(640),
            funding_amount: 50_000,
            monthly_revenue: 40_000,
            positions,
            client_timezone: "America/New_York",
        }
    }

    #[test]
    fn accepts_complete_lead() {
        assert!(validate_lead_fields(&fields(&[])).is_ok());
    }

    #[test]
    fn requires_names_and_phone() {
        let mut value = fields(&[]);
        value.business_name = "  ";
        assert_eq!(
            validate_lead_fields(&value),
            Err(ValidationError::MissingBusinessName)
        );

        let mut value = fields(&[]);
        value.owner_name = "";
        assert_eq!(
            validate_lead_fields(&value),
            Err(ValidationError::MissingOwnerName)
        );

        let mut value = fields(&[]);
        value.phone = "";
        assert_eq!(validate_lead_fields(&value), Err(ValidationError::MissingPhone));

        let mut value = fields(&[]);
        value.phone = "555-1212";
        assert!(matches!(
            validate_lead_fields(&value),
            Err(ValidationError::InvalidPhone(_))
        ));
    }

    #[test]
    fn blank_email_is_allowed_but_malformed_is_not() {
        let mut value = fields(&[]);
        value.email = Some("  ");
        assert!(validate_lead_fields(&value).is_ok());
        value.email = Some("maria@sunrise");
        assert!(matches!(
            validate_lead_fields(&value),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn credit_score_range_is_inclusive() {
        let mut value = fields(&[]);
        value.credit_score = Some(300);
        assert!(validate_lead_fields(&value).is_ok());
        value.credit_score = Some(850);
        assert!(validate_lead_fields(&value).is_ok());
        value.credit_score = Some(851);
        assert_eq!(
            validate_lead_fields(&value),
            Err(ValidationError::InvalidCreditScore(851))
        );
    }

    #[test]
    fn rejects_negative_money_and_unknown_zone() {
        let mut value = fields(&[]);
        value.monthly_revenue = -1;
        assert_eq!(
            validate_lead_fields(&value),
            Err(ValidationError::NegativeAmount("monthly revenue"))
        );

        let mut value = fields(&[]);
        value.client_timezone = "Mars/Base";
        assert!(matches!(
            validate_lead_fields(&value),
            Err(ValidationError::UnknownTimezone(_))
        ));
    }

    #[test]
    fn caps_dollar_amounts() {
        let mut value = fields(&[]);
        value.funding_amount = MAX_AMOUNT;
        assert!(validate_lead_fields(&value).is_ok());
        value.funding_amount = i64::MAX;
        assert_eq!(
            validate_lead_fields(&value),
            Err(ValidationError::AmountTooLarge("funding amount"))
        );

        let mut value = fields(&[]);
        value.monthly_revenue = MAX_AMOUNT + 1;
        assert_eq!(
            validate_lead_fields(&value),
            Err(ValidationError::AmountTooLarge("monthly revenue"))
        );

        let huge = Position::new("Kapitus", i64::MAX, 0, PaymentFrequency::Daily);
        assert_eq!(
            validate_positions(&[huge]),
            Err(ValidationError::AmountTooLarge("position amount"))
        );
    }

    #[test]
    fn positions_are_checked_only_when_active() {
        let placeholder = Position::new("", 0, 0, PaymentFrequency::Daily);
        let good = Position::new("Kapitus", 25_000, 12_000, PaymentFrequency::Weekly);
        let zero = Position::new("OnDeck", 0, 0, PaymentFrequency::Daily);
        let negative = Position::new("Fora", 10_000, -5, PaymentFrequency::Monthly);

        assert!(validate_positions(&[placeholder.clone(), good.clone()]).is_ok());
        assert_eq!(
            validate_positions(&[good.clone(), zero]),
            Err(ValidationError::PositionOriginalAmount(2))
        );
        assert_eq!(
            validate_positions(&[negative, good]),
            Err(ValidationError::PositionNegativeBalance(1))
        );
    }
}
