use rust_decimal::Decimal;
use std::str::FromStr;
use crate::types::ZakatError;

/// Trait for converting various types into `Decimal` for Zakat calculations.
///
/// This lets builders take `i32`, `f64`, `&str`, etc. directly, without
/// wrapping them in `dec!()` or `Decimal::from()`. Strings must use the
/// canonical `.` decimal point; locale-formatted text (`1.234,56`) goes
/// through [`crate::normalize::parse_amount`] instead.
pub trait IntoZakatDecimal {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError>;
}

impl IntoZakatDecimal for Decimal {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        Ok(self)
    }
}

impl IntoZakatDecimal for &Decimal {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        Ok(*self)
    }
}

macro_rules! impl_into_zakat_decimal_int {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_zakat_decimal_int!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

macro_rules! impl_into_zakat_decimal_float {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
                    // `as f64` widens f32 to its exact binary value; parse the
                    // shortest display form so 0.1f32 stays 0.1.
                    Decimal::from_str(&self.to_string())
                        .or_else(|_| Decimal::from_f64_retain(self as f64).ok_or(()))
                        .map_err(|_| ZakatError::invalid_input("amount", self.to_string(), "Not a finite number"))
                }
            }
        )*
    };
}

impl_into_zakat_decimal_float!(f32, f64);

impl IntoZakatDecimal for &str {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        Decimal::from_str(self.trim())
            .map_err(|e| ZakatError::invalid_input("amount", self, format!("Invalid decimal: {}", e)))
    }
}

impl IntoZakatDecimal for String {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        self.as_str().into_zakat_decimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_conversions() {
        assert_eq!(85.into_zakat_decimal().unwrap(), dec!(85));
        assert_eq!(0.1f32.into_zakat_decimal().unwrap(), dec!(0.1));
        assert_eq!(2500.5f64.into_zakat_decimal().unwrap(), dec!(2500.5));
        assert_eq!(" 12.75 ".into_zakat_decimal().unwrap(), dec!(12.75));
        assert_eq!(String::from("3").into_zakat_decimal().unwrap(), dec!(3));
    }

    #[test]
    fn test_rejects_non_finite_and_malformed() {
        assert!(f64::NAN.into_zakat_decimal().is_err());
        assert!(f64::INFINITY.into_zakat_decimal().is_err());
        assert!("1.234,56".into_zakat_decimal().is_err());
    }
}
