//! Success-condition heuristics for pipelets with an error exit.
//!
//! Pipelets report failure through their "error" connector, which has no
//! direct equivalent in the generated code. The condition guarding the
//! success arm is guessed from the pipelet, in priority order:
//!
//! 1. a condition registered for the pipelet name
//! 2. the variable bound to a well-known domain-object key
//! 3. the variable bound to an output-style key (`Output`, `Result`, `*_out`)
//! 4. `Always`

use indexmap::IndexMap;
use rewire_ir::{Condition, PipeletNode};

const DOMAIN_KEYS: &[&str] = &[
    "Product",
    "Customer",
    "Basket",
    "Order",
    "ProductList",
    "Profile",
    "Category",
    "Content",
    "ProductSearchModel",
    "GiftCertificate",
    "Address",
    "PaymentInstrument",
    "ShippingMethod",
    "CouponLineItem",
];

/// Overridable lookup table for pipelet success conditions.
///
/// # Example
///
/// ```
/// use rewire_codegen::analysis::SuccessConditions;
///
/// let table = SuccessConditions::default()
///     .with_condition("CreateOrder", "Order != null");
/// assert_eq!(table.named("CreateOrder"), Some("Order != null"));
/// assert_eq!(table.named("Script"), Some("ScriptStatus !== PIPELET_ERROR"));
/// ```
#[derive(Debug, Clone)]
pub struct SuccessConditions {
    named: IndexMap<String, String>,
    domain_keys: Vec<String>,
}

impl SuccessConditions {
    /// A table without any entries; every pipelet falls back to key bindings.
    pub fn empty() -> Self {
        Self {
            named: IndexMap::new(),
            domain_keys: Vec::new(),
        }
    }

    /// Register (or replace) the condition for a pipelet name.
    pub fn with_condition(mut self, pipelet: impl Into<String>, expression: impl Into<String>) -> Self {
        self.named.insert(pipelet.into(), expression.into());
        self
    }

    /// Replace the domain-object key list.
    pub fn with_domain_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Condition registered for a pipelet name.
    pub fn named(&self, pipelet: &str) -> Option<&str> {
        self.named.get(pipelet).map(String::as_str)
    }

    /// Domain-object keys checked when no named condition exists.
    pub fn domain_keys(&self) -> &[String] {
        &self.domain_keys
    }

    /// Choose the condition guarding the success arm of `pipelet`.
    pub fn condition_for(&self, pipelet: &PipeletNode) -> Condition {
        if let Some(expression) = self.named(&pipelet.name) {
            return Condition::Success {
                expression: expression.to_string(),
            };
        }

        let domain = self
            .domain_keys
            .iter()
            .find_map(|key| pipelet.binding(key).filter(|alias| is_bound(alias)));
        let output = || {
            pipelet
                .key_bindings
                .iter()
                .filter(|b| is_output_key(&b.key) && !b.is_unbound())
                .map(|b| b.alias.as_str())
                .next()
        };

        match domain.or_else(output) {
            Some(alias) => Condition::Success {
                expression: alias.to_string(),
            },
            None => Condition::Always,
        }
    }
}

impl Default for SuccessConditions {
    fn default() -> Self {
        Self::empty()
            .with_condition("LoginCustomer", "CurrentCustomer.authenticated")
            .with_condition("ValidateToken", "ValidatedToken != null")
            .with_condition("Script", "ScriptStatus !== PIPELET_ERROR")
            .with_domain_keys(DOMAIN_KEYS.iter().copied())
    }
}

fn is_bound(alias: &str) -> bool {
    !alias.is_empty() && alias != rewire_ir::KeyBinding::NULL
}

fn is_output_key(key: &str) -> bool {
    key == "Output" || key == "Result" || key.ends_with("_out")
}

#[cfg(test)]
mod tests {
    use rewire_ir::KeyBinding;

    use super::*;

    fn pipelet(name: &str, bindings: &[(&str, &str)]) -> PipeletNode {
        PipeletNode {
            name: name.into(),
            set_identifier: None,
            key_bindings: bindings
                .iter()
                .map(|(key, alias)| KeyBinding {
                    key: key.to_string(),
                    alias: alias.to_string(),
                })
                .collect(),
            config: vec![],
            has_error_branch: true,
        }
    }

    fn expression(condition: Condition) -> Option<String> {
        match condition {
            Condition::Success { expression } => Some(expression),
            _ => None,
        }
    }

    #[test]
    fn test_named_condition_wins() {
        let table = SuccessConditions::default();
        let p = pipelet("LoginCustomer", &[("Customer", "Customer")]);
        assert_eq!(
            expression(table.condition_for(&p)).as_deref(),
            Some("CurrentCustomer.authenticated")
        );
    }

    #[test]
    fn test_domain_key_binding() {
        let table = SuccessConditions::default();
        let p = pipelet(
            "GetProduct",
            &[("ProductID", "CurrentHttpParameterMap.pid.stringValue"), ("Product", "Product")],
        );
        assert_eq!(expression(table.condition_for(&p)).as_deref(), Some("Product"));
    }

    #[test]
    fn test_unbound_domain_key_is_ignored() {
        let table = SuccessConditions::default();
        let p = pipelet("GetBasket", &[("Basket", "null"), ("Result", "BasketResult")]);
        assert_eq!(
            expression(table.condition_for(&p)).as_deref(),
            Some("BasketResult")
        );
    }

    #[test]
    fn test_output_style_key() {
        let table = SuccessConditions::default();
        let p = pipelet("ResolveThing", &[("Thing_out", "Resolved")]);
        assert_eq!(expression(table.condition_for(&p)).as_deref(), Some("Resolved"));
    }

    #[test]
    fn test_fallback_is_always() {
        let table = SuccessConditions::default();
        let p = pipelet("SendMail", &[("MailTo", "Customer.email")]);
        assert_eq!(table.condition_for(&p), Condition::Always);
    }

    #[test]
    fn test_overrides() {
        let table = SuccessConditions::empty()
            .with_condition("SendMail", "MailStatus.isOK()")
            .with_domain_keys(["Shipment"]);
        assert_eq!(
            expression(table.condition_for(&pipelet("SendMail", &[]))).as_deref(),
            Some("MailStatus.isOK()")
        );
        assert_eq!(
            expression(table.condition_for(&pipelet("GetShipment", &[("Shipment", "Ship")])))
                .as_deref(),
            Some("Ship")
        );
        // LoginCustomer is no longer special
        assert_eq!(
            table.condition_for(&pipelet("LoginCustomer", &[])),
            Condition::Always
        );
        assert_eq!(table.domain_keys(), ["Shipment".to_string()]);
    }
}
