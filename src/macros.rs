//! Declarative macros for reducing boilerplate in snapshot definitions.
//!
//! The `zakat_snapshot!` macro generates a snapshot struct of `Decimal` amounts
//! together with the closed category enum that indexes it, so the two can
//! never drift apart.

/// Generates a snapshot struct and its category enum from one field list.
///
/// This macro generates:
/// - The struct definition, one non-negative `Decimal` per category
///   (serde `camelCase`, missing fields default to zero)
/// - The category enum (`Display`/`EnumString`/`EnumIter`, same `camelCase` names)
/// - Fluent setters named after each field, accepting any `IntoZakatDecimal`
/// - `get`, `set`, `with`, `iter`, `sum_where`, `is_empty` and `from_raw`
///
/// # Usage
///
/// ```rust,ignore
/// zakat_snapshot! {
///     /// Documentation for the struct
///     pub struct MySnapshot;
///     /// Documentation for the enum
///     pub enum MyCategory {
///         /// Documentation shared by field and variant
///         first_field => FirstField,
///     }
/// }
/// ```
macro_rules! zakat_snapshot {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident;
        $(#[$cat_meta:meta])*
        $cat_vis:vis enum $cat:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
        #[serde(default, rename_all = "camelCase")]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: rust_decimal::Decimal,
            )*
        }

        $(#[$cat_meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize, schemars::JsonSchema,
            strum::Display, strum::EnumString, strum::EnumIter,
        )]
        #[serde(rename_all = "camelCase")]
        #[strum(serialize_all = "camelCase")]
        $cat_vis enum $cat {
            $(
                $(#[$field_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Creates an empty snapshot (every category zero).
            pub fn new() -> Self {
                Self::default()
            }

            $(
                pub fn $field(mut self, value: impl $crate::inputs::IntoZakatDecimal) -> Self {
                    if let Ok(v) = value.into_zakat_decimal() {
                        self.$field = v.max(rust_decimal::Decimal::ZERO);
                    }
                    self
                }
            )*

            /// Amount entered for `category`. Negative stored values read as zero.
            pub fn get(&self, category: $cat) -> rust_decimal::Decimal {
                let amount = match category {
                    $( $cat::$variant => self.$field, )*
                };
                amount.max(rust_decimal::Decimal::ZERO)
            }

            pub fn set(&mut self, category: $cat, amount: rust_decimal::Decimal) {
                let amount = amount.max(rust_decimal::Decimal::ZERO);
                match category {
                    $( $cat::$variant => self.$field = amount, )*
                }
            }

            pub fn with(mut self, category: $cat, value: impl $crate::inputs::IntoZakatDecimal) -> Self {
                if let Ok(v) = value.into_zakat_decimal() {
                    self.set(category, v);
                }
                self
            }

            /// Every category with its amount, in declaration order.
            pub fn iter(&self) -> impl Iterator<Item = ($cat, rust_decimal::Decimal)> + '_ {
                <$cat as strum::IntoEnumIterator>::iter().map(move |c| (c, self.get(c)))
            }

            /// Saturating sum of the categories selected by `include`.
            pub fn sum_where(&self, include: impl Fn($cat) -> bool) -> rust_decimal::Decimal {
                self.iter()
                    .filter(|(c, _)| include(*c))
                    .fold(rust_decimal::Decimal::ZERO, |acc, (_, v)| acc.saturating_add(v))
            }

            pub fn is_empty(&self) -> bool {
                self.iter().all(|(_, v)| v.is_zero())
            }

            /// Builds a snapshot from raw locale-formatted text entries.
            ///
            /// Each entry goes through `normalize::parse_amount`; malformed text
            /// counts as zero and later entries overwrite earlier ones.
            pub fn from_raw<'a>(entries: impl IntoIterator<Item = ($cat, &'a str)>) -> Self {
                let mut snapshot = Self::default();
                for (category, text) in entries {
                    snapshot.set(category, $crate::normalize::parse_amount(text));
                }
                snapshot
            }
        }
    };
}
