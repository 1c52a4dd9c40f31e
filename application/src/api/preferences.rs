//! [`Preferences`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{
    GraphQLScalar, InputValue, ParseScalarResult, ParseScalarValue,
    ScalarToken, ScalarValue, Value,
};
use service::domain::{preferences, Preferences as Stored};

use crate::api::scalar;

/// Client key `Preferences` are stored under.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "PreferencesKey", with = scalar::Via::<preferences::Key>)]
pub struct Key(preferences::Key);

/// Listing browsing selections of a client, as a JSON string.
///
/// Holds `version`, `filter`, `sort`, `page` and `scrollPosition` fields.
/// Stored selections of an outdated version are replaced with the defaults.
#[derive(Clone, Debug, From, GraphQLScalar, Into)]
#[graphql(name = "Preferences", with = json)]
pub struct Preferences(Stored);

mod json {
    //! JSON string representation of [`Preferences`].

    use super::{
        InputValue, ParseScalarResult, ParseScalarValue, Preferences,
        ScalarToken, ScalarValue, Stored, Value,
    };

    /// Outputs the provided [`Preferences`] as a JSON string.
    pub(super) fn to_output<S: ScalarValue>(p: &Preferences) -> Value<S> {
        Value::scalar(p.0.encode().to_string())
    }

    /// Parses [`Preferences`] out of a JSON string.
    ///
    /// Malformed JSON and JSON not shaped as [`Preferences`] is rejected,
    /// while an outdated version resets to the defaults.
    pub(super) fn from_input<S: ScalarValue>(
        input: &InputValue<S>,
    ) -> Result<Preferences, String> {
        let s = input.as_string_value().ok_or_else(|| {
            format!(
                "Cannot parse input scalar `Preferences`: expected string \
                 input value, found: {input}",
            )
        })?;
        let value = serde_json::from_str::<serde_json::Value>(s)
            .map_err(|e| format!("Cannot parse input scalar `Preferences`: {e}"))?;
        if !value.is_object() {
            return Err(
                "Cannot parse input scalar `Preferences`: expected JSON object"
                    .into(),
            );
        }
        Ok(Preferences(Stored::decode(value)))
    }

    /// Parses the provided [`ScalarToken`] as a string.
    pub(super) fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue};
    use service::read::listing::SortKey;

    use super::{json, Key};
    use crate::api::scalar::Via;

    #[test]
    fn parses_json_strings() {
        let p = json::from_input(&InputValue::<DefaultScalarValue>::scalar(
            r#"{"version":1,"sort":"PRICE_ASC","page":2}"#.to_owned(),
        ))
        .expect("valid JSON");

        assert_eq!(p.0.sort, SortKey::PriceAsc);
        assert_eq!(p.0.page, 2);
    }

    #[test]
    fn rejects_malformed_json() {
        for raw in ["{", "42", "\"x\""] {
            let res = json::from_input(
                &InputValue::<DefaultScalarValue>::scalar(raw.to_owned()),
            );
            assert!(res.is_err(), "accepted `{raw}`");
        }
    }

    #[test]
    fn rejects_oversized_keys() {
        type Parse = Via<service::domain::preferences::Key>;

        let res: Result<Key, _> = Parse::from_input(
            &InputValue::<DefaultScalarValue>::scalar("k".repeat(129)),
        );
        assert!(res.is_err());

        let res: Result<Key, _> = Parse::from_input(
            &InputValue::<DefaultScalarValue>::scalar("listings".to_owned()),
        );
        assert!(res.is_ok());
    }
}
