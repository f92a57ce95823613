//! Comprehensive tests for Money and Currency

use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, MoneyError};

// ============================================================================
// Construction Tests
// ============================================================================

mod construction_tests {
    use super::*;

    #[test]
    fn test_new_rounds_to_four_places() {
        let money = Money::new(dec!(10.123456), Currency::USD);
        assert_eq!(money.amount(), dec!(10.1235));
    }

    #[test]
    fn test_from_minor_units() {
        let money = Money::from_minor(12345, Currency::USD);
        assert_eq!(money.amount(), dec!(123.45));

        // JPY has no minor unit.
        let yen = Money::from_minor(500, Currency::JPY);
        assert_eq!(yen.amount(), dec!(500));
    }

    #[test]
    fn test_zero() {
        let zero = Money::zero(Currency::EUR);
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());
    }

    #[test]
    fn test_sign_predicates() {
        assert!(Money::new(dec!(0.0001), Currency::USD).is_positive());
        assert!(Money::new(dec!(-5), Currency::USD).is_negative());
    }
}

// ============================================================================
// Arithmetic Tests
// ============================================================================

mod arithmetic_tests {
    use super::*;

    #[test]
    fn test_checked_add_same_currency() {
        let a = Money::new(dec!(10.50), Currency::USD);
        let b = Money::new(dec!(4.25), Currency::USD);
        assert_eq!(a.checked_add(&b).unwrap().amount(), dec!(14.75));
    }

    #[test]
    fn test_checked_add_currency_mismatch() {
        let a = Money::new(dec!(10), Currency::USD);
        let b = Money::new(dec!(10), Currency::EUR);
        assert!(matches!(
            a.checked_add(&b),
            Err(MoneyError::CurrencyMismatch(_, _))
        ));
    }

    #[test]
    fn test_subtraction_can_go_negative() {
        let a = Money::new(dec!(10), Currency::USD);
        let b = Money::new(dec!(30), Currency::USD);
        let diff = a.checked_sub(&b).unwrap();
        assert_eq!(diff.amount(), dec!(-20));
        assert!(diff.is_negative());
    }

    #[test]
    fn test_negation_and_abs() {
        let money = Money::new(dec!(12.34), Currency::USD);
        assert_eq!((-money).amount(), dec!(-12.34));
        assert_eq!((-money).abs(), money);
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        let amounts: Vec<Money> = Vec::new();
        let total = Money::sum(Currency::USD, &amounts).unwrap();
        assert!(total.is_zero());
    }

    #[test]
    fn test_sum_with_reversals() {
        let amounts = vec![
            Money::new(dec!(100), Currency::USD),
            Money::new(dec!(-20), Currency::USD),
            Money::new(dec!(0.5), Currency::USD),
        ];
        let total = Money::sum(Currency::USD, &amounts).unwrap();
        assert_eq!(total.amount(), dec!(80.5));
    }

    #[test]
    fn test_sum_rejects_mixed_currencies() {
        let amounts = vec![
            Money::new(dec!(1), Currency::USD),
            Money::new(dec!(1), Currency::GBP),
        ];
        assert!(Money::sum(Currency::USD, &amounts).is_err());
    }
}

// ============================================================================
// Rounding & Display Tests
// ============================================================================

mod display_tests {
    use super::*;

    #[test]
    fn test_round_to_currency() {
        let money = Money::new(dec!(9.9951), Currency::USD);
        assert_eq!(money.round_to_currency().amount(), dec!(10.00));

        let yen = Money::new(dec!(100.4), Currency::JPY);
        assert_eq!(yen.round_to_currency().amount(), dec!(100));
    }

    #[test]
    fn test_display_uses_symbol_and_precision() {
        let money = Money::new(dec!(1234.5), Currency::USD);
        assert_eq!(money.to_string(), "$ 1234.50");
    }

    #[test]
    fn test_currency_codes_round_trip_serde() {
        let json = serde_json::to_string(&Currency::CNY).unwrap();
        assert_eq!(json, "\"CNY\"");
        let back: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Currency::CNY);
    }
}
