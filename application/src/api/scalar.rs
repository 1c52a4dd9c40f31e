//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute.
///
/// Outputs the target type as a string via its [`Display`] impl, and parses
/// it via the [`FromStr`] impl of `As` type.
///
/// Integer inputs are accepted as well, so numeric scalars may be provided
/// either way. Malformed values are rejected before reaching any resolver.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Convert the target type into scalar [`Value`] by using its
    /// [`Display`] impl.
    ///
    /// [`Display`]: fmt::Display
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        T: fmt::Display,
        S: ScalarValue,
    {
        Value::from(value.to_string())
    }

    /// Constructs the target type from scalar [`Value`] by using [`FromStr`]
    /// impl of `As` type.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the input value is neither a string nor an integer;
    /// - the input value cannot be parsed into `As` type.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: From<As> + GraphQLType<S, TypeInfo = ()>,
        S: ScalarValue,
    {
        let name = T::name(&()).expect("always has a name");
        let s = input
            .as_string_value()
            .map(ToOwned::to_owned)
            .or_else(|| input.as_int_value().map(|i| i.to_string()))
            .ok_or_else(|| {
                format!(
                    "Cannot parse input scalar `{name}`: expected string or \
                     integer input value, found: {input}",
                )
            })?;
        s.parse::<As>().map(T::from).map_err(|e| {
            format!("Cannot parse input scalar `{name}` from \"{s}\": {e}")
        })
    }

    /// Parse the provided [`ScalarToken`].
    ///
    /// # Errors
    ///
    /// Returns an error if the token is neither a string nor an integer.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
            .or_else(|_| <i32 as ParseScalarValue<S>>::from_str(value))
    }
}

/// Defines GraphQL scalars wrapping domain types, parsed with
/// [`Via`].
macro_rules! define_scalar {
    ($(
        #[doc = $doc:literal]
        #[graphql(name = $gql:literal)]
        $name:ident($ty:ty);
    )*) => {$(
        #[doc = $doc]
        #[derive(
            Clone,
            Debug,
            ::derive_more::Display,
            ::derive_more::From,
            ::juniper::GraphQLScalar,
        )]
        #[graphql(name = $gql, with = $crate::api::scalar::Via::<$ty>)]
        pub struct $name(pub $ty);
    )*};
}

pub(crate) use define_scalar;

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue};

    use crate::api::listing::Number;

    use super::Via;

    type Parse = Via<service::domain::listing::Id>;

    #[test]
    fn parses_strings_and_integers() {
        let n: Number =
            Parse::from_input(&InputValue::<DefaultScalarValue>::scalar(42))
                .expect("integer input");
        assert_eq!(n.to_string(), "42");

        let n: Number = Parse::from_input(
            &InputValue::<DefaultScalarValue>::scalar("17".to_owned()),
        )
        .expect("string input");
        assert_eq!(n.to_string(), "17");
    }

    #[test]
    fn rejects_malformed_numbers() {
        let res: Result<Number, _> = Parse::from_input(
            &InputValue::<DefaultScalarValue>::scalar("12abc".to_owned()),
        );

        assert!(res.is_err());
    }
}
