use proptest::prelude::*;

use authmatech_types::{filter_countries, normalize_local_number, PendingPhoneNumber, COUNTRIES};

proptest! {
    /// Every dialing-prefix spelling of a country finds that country.
    #[test]
    fn dial_code_spellings_find_country(idx in 0usize..COUNTRIES.len()) {
        let country = &COUNTRIES[idx];
        let plain = country.dial_digits().to_string();
        for query in [country.code.to_string(), plain.clone(), format!("00{plain}")] {
            let found = filter_countries(&query);
            prop_assert!(found.iter().any(|c| *c == country), "{} not found by {}", country.name, query);
        }
    }

    /// Filtering never reorders: results are a subsequence of the static list.
    #[test]
    fn filter_preserves_order(query in "[a-zA-Z0-9+ ]{0,6}") {
        let found = filter_countries(&query);
        let mut last = None;
        for c in found {
            let pos = COUNTRIES.iter().position(|x| x == c).unwrap();
            if let Some(prev) = last {
                prop_assert!(pos > prev);
            }
            last = Some(pos);
        }
    }

    /// Exactly one leading zero is dropped, nothing else changes.
    #[test]
    fn leading_zero_dropped_once(rest in "[0-9]{0,12}") {
        let with_zero = format!("0{rest}");
        prop_assert_eq!(normalize_local_number(&with_zero), rest.as_str());
    }

    /// Input without a leading zero passes through untouched.
    #[test]
    fn no_leading_zero_untouched(first in "[1-9]", rest in "[0-9]{0,11}") {
        let input = format!("{first}{rest}");
        prop_assert_eq!(normalize_local_number(&input), input.as_str());
    }

    /// The pending number is dial digits plus the normalized local part, with no `+`.
    #[test]
    fn pending_number_shape(idx in 0usize..COUNTRIES.len(), local in "0?[1-9][0-9]{5,10}") {
        let country = &COUNTRIES[idx];
        let pending = PendingPhoneNumber::from_parts(country, &local);
        let expected = format!("{}{}", country.dial_digits(), normalize_local_number(&local));
        prop_assert_eq!(pending.as_str(), expected.as_str());
        prop_assert!(!pending.as_str().contains('+'));
    }
}
