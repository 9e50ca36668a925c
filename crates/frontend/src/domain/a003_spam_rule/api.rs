use contracts::domain::a003_spam_rule::dto::{SaveSpamRuleDto, SpamRuleDto, SPAM_RULE_TYPES};
use contracts::shared::mutation::{MutationResponse, RemoveRequest};
use std::collections::BTreeMap;
use std::net::IpAddr;

use crate::shared::data_table::TableError;
use crate::system::auth::gateway::{ApiGateway, HttpMethod};

pub const LIST_ENDPOINT: &str = "/api/spam-rules";
pub const EXPORT_ENDPOINT: &str = "/api/spam-rules/export";

fn invalid(field: &str, message: &str) -> TableError {
    TableError::Validation {
        message: message.to_string(),
        fields: BTreeMap::from([(field.to_string(), message.to_string())]),
    }
}

/// The value has to make sense for the rule type.
pub fn validate(dto: &SaveSpamRuleDto) -> Result<(), TableError> {
    TableError::require_fields(&[("rule_type", &dto.rule_type), ("value", &dto.value)])?;
    let value = dto.value.trim();
    match dto.rule_type.as_str() {
        t if !SPAM_RULE_TYPES.contains(&t) => Err(invalid("rule_type", "Unknown rule type.")),
        "email" if !value.contains('@') => Err(invalid("value", "Enter an email address.")),
        "domain" if !value.contains('.') || value.contains(char::is_whitespace) => {
            Err(invalid("value", "Enter a domain such as example.com."))
        }
        "ip" if value.parse::<IpAddr>().is_err() => {
            Err(invalid("value", "Enter an IPv4 or IPv6 address."))
        }
        _ => Ok(()),
    }
}

/// Creates the rule when `dto.id` is empty, updates it otherwise.
pub async fn save(
    gateway: &ApiGateway,
    dto: &SaveSpamRuleDto,
) -> Result<MutationResponse, TableError> {
    validate(dto)?;
    gateway
        .send_json(HttpMethod::Post, &format!("{}/save", LIST_ENDPOINT), dto)
        .await
}

/// Same rule with `is_active` flipped.
pub fn toggled(rule: &SpamRuleDto) -> SaveSpamRuleDto {
    SaveSpamRuleDto {
        id: Some(rule.id),
        rule_type: rule.rule_type.clone(),
        value: rule.value.clone(),
        is_active: !rule.is_active,
    }
}

pub async fn remove(gateway: &ApiGateway, id: i64) -> Result<MutationResponse, TableError> {
    gateway
        .send_json(
            HttpMethod::Delete,
            &format!("{}/remove", LIST_ENDPOINT),
            &RemoveRequest { id },
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(rule_type: &str, value: &str) -> SaveSpamRuleDto {
        SaveSpamRuleDto {
            id: None,
            rule_type: rule_type.into(),
            value: value.into(),
            is_active: true,
        }
    }

    #[test]
    fn test_validate_by_rule_type() {
        assert!(validate(&rule("email", "spam@bad.io")).is_ok());
        assert!(validate(&rule("email", "bad.io")).is_err());
        assert!(validate(&rule("domain", "bad.io")).is_ok());
        assert!(validate(&rule("domain", "bad io")).is_err());
        assert!(validate(&rule("ip", "10.0.0.1")).is_ok());
        assert!(validate(&rule("ip", "::1")).is_ok());
        assert!(validate(&rule("ip", "10.0.0.300")).is_err());
        assert!(validate(&rule("keyword", "casino")).is_ok());
        assert!(validate(&rule("regex", "x")).is_err());
        assert!(validate(&rule("keyword", "  ")).is_err());
    }

    #[test]
    fn test_toggled_keeps_identity() {
        let row = SpamRuleDto {
            id: 9,
            rule_type: "ip".into(),
            value: "10.0.0.1".into(),
            is_active: true,
            hits: 3,
            created_at: None,
        };
        let dto = toggled(&row);
        assert_eq!(dto.id, Some(9));
        assert!(!dto.is_active);
        assert_eq!(dto.value, "10.0.0.1");
    }
}
