use crate::domain::{FollowupPriority, PaybackTime, Stage};
use crate::filter::ast::{AmountField, Comparison, FilterExpr, LeadFilter};
use crate::filter::FilterParseError;
use crate::rules::DueSelector;
use std::str::FromStr;

/// Whitespace-separated terms, all of which must match. Bare words are
/// free-text; `key:value` tokens select on a field.
pub fn parse_filter(input: &str) -> Result<LeadFilter, FilterParseError> {
    let mut terms = Vec::new();

    for token in input.split_whitespace() {
        let Some((key, value)) = token.split_once(':') else {
            terms.push(FilterExpr::Text(token.to_string()));
            continue;
        };
        let term = match key.to_ascii_lowercase().as_str() {
            "stage" => {
                let value = non_empty("stage", value)?;
                let stage = Stage::from_str(value)
                    .map_err(|_| FilterParseError::InvalidStage(value.to_string()))?;
                FilterExpr::Stage(stage)
            }
            "priority" => {
                let value = non_empty("priority", value)?;
                let priority = FollowupPriority::from_str(value)
                    .map_err(|_| FilterParseError::InvalidPriority(value.to_string()))?;
                FilterExpr::Priority(priority)
            }
            "type" => FilterExpr::BusinessType(non_empty("type", value)?.to_string()),
            "payback" => {
                let value = non_empty("payback", value)?;
                let payback = PaybackTime::from_str(value)
                    .map_err(|_| FilterParseError::InvalidPayback(value.to_string()))?;
                FilterExpr::Payback(payback)
            }
            "mca" => FilterExpr::McaHistory(parse_yes_no(value)?),
            "due" => FilterExpr::Due(parse_due_selector(value)?),
            "funding" => parse_amount(AmountField::Funding, "funding", value)?,
            "revenue" => parse_amount(AmountField::Revenue, "revenue", value)?,
            "credit" => parse_amount(AmountField::Credit, "credit", value)?,
            _ => FilterExpr::Text(token.to_string()),
        };
        terms.push(term);
    }

    Ok(FilterExpr::And(terms))
}

fn non_empty<'a>(key: &'static str, value: &'a str) -> Result<&'a str, FilterParseError> {
    if value.is_empty() {
        return Err(FilterParseError::EmptyValue(key));
    }
    Ok(value)
}

fn parse_yes_no(raw: &str) -> Result<bool, FilterParseError> {
    match raw.to_ascii_lowercase().as_str() {
        "yes" | "true" => Ok(true),
        "no" | "false" => Ok(false),
        _ => Err(FilterParseError::InvalidMcaSelector(raw.to_string())),
    }
}

fn parse_due_selector(raw: &str) -> Result<DueSelector, FilterParseError> {
    match raw {
        "overdue" => Ok(DueSelector::Overdue),
        "upcoming" => Ok(DueSelector::Upcoming),
        "any" => Ok(DueSelector::Any),
        "none" => Ok(DueSelector::None),
        _ => Err(FilterParseError::InvalidDueSelector(raw.to_string())),
    }
}

fn parse_amount(
    field: AmountField,
    key: &'static str,
    raw: &str,
) -> Result<FilterExpr, FilterParseError> {
    let raw = non_empty(key, raw)?;
    let (cmp, rest) = [
        (">=", Comparison::Ge),
        ("<=", Comparison::Le),
        (">", Comparison::Gt),
        ("<", Comparison::Lt),
        ("=", Comparison::Eq),
    ]
    .into_iter()
    .find_map(|(prefix, cmp)| raw.strip_prefix(prefix).map(|rest| (cmp, rest)))
    .unwrap_or((Comparison::Eq, raw));

    let digits: String = rest.chars().filter(|ch| !matches!(ch, '$' | ',')).collect();
    let value = digits
        .parse::<i64>()
        .map_err(|_| FilterParseError::InvalidAmount(raw.to_string()))?;
    Ok(FilterExpr::Amount { field, cmp, value })
}

#[cfg(test)]
mod tests {
    use super::parse_filter;
    use crate::domain::{FollowupPriority, Stage};
    use crate::filter::ast::{AmountField, Comparison, FilterExpr};
    use crate::filter::FilterParseError;
    use crate::rules::DueSelector;

    #[test]
    fn parse_field_selectors() {
        let filter = parse_filter("stage:email-sent priority:urgent due:overdue").unwrap();
        assert_eq!(
            filter,
            FilterExpr::And(vec![
                FilterExpr::Stage(Stage::EmailSent),
                FilterExpr::Priority(FollowupPriority::Urgent),
                FilterExpr::Due(DueSelector::Overdue),
            ])
        );
    }

    #[test]
    fn parse_text_terms() {
        let filter = parse_filter("sunrise bakery").unwrap();
        assert_eq!(
            filter,
            FilterExpr::And(vec![
                FilterExpr::Text("sunrise".to_string()),
                FilterExpr::Text("bakery".to_string())
            ])
        );
    }

    #[test]
    fn parse_amount_comparisons() {
        let filter = parse_filter("funding:>=50,000 credit:<600 revenue:$20000").unwrap();
        assert_eq!(
            filter,
            FilterExpr::And(vec![
                FilterExpr::Amount {
                    field: AmountField::Funding,
                    cmp: Comparison::Ge,
                    value: 50_000
                },
                FilterExpr::Amount {
                    field: AmountField::Credit,
                    cmp: Comparison::Lt,
                    value: 600
                },
                FilterExpr::Amount {
                    field: AmountField::Revenue,
                    cmp: Comparison::Eq,
                    value: 20_000
                },
            ])
        );
    }

    #[test]
    fn unknown_keys_are_text() {
        let filter = parse_filter("note:hello").unwrap();
        assert_eq!(
            filter,
            FilterExpr::And(vec![FilterExpr::Text("note:hello".to_string())])
        );
    }

    #[test]
    fn invalid_selectors_are_errors() {
        assert_eq!(
            parse_filter("due:soon").unwrap_err(),
            FilterParseError::InvalidDueSelector("soon".to_string())
        );
        assert_eq!(
            parse_filter("mca:maybe").unwrap_err(),
            FilterParseError::InvalidMcaSelector("maybe".to_string())
        );
        assert_eq!(
            parse_filter("stage:").unwrap_err(),
            FilterParseError::EmptyValue("stage")
        );
        assert!(matches!(
            parse_filter("funding:>lots").unwrap_err(),
            FilterParseError::InvalidAmount(_)
        ));
    }
}
