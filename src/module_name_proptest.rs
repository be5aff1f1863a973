//! Property-based tests for module name normalization.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::module_name::{clean_module_name, ModuleName, Scope};
    use proptest::prelude::*;

    proptest! {
        /// Property: a single trailing slash never changes module identity
        #[test]
        fn trailing_slash_is_insignificant(input in "[a-z0-9_.-]+(/[a-z0-9_.-]+){0,3}") {
            prop_assert_eq!(ModuleName::new(format!("{}/", input)), ModuleName::new(&input));
        }

        /// Property: names without a trailing separator are left untouched
        #[test]
        fn plain_names_are_preserved(input in "[a-z0-9_.-]+(/[a-z0-9_.-]+){0,3}") {
            let name = ModuleName::new(&input);
            prop_assert_eq!(name.as_str(), input.as_str());
        }

        /// Property: normalization removes at most one character
        #[test]
        fn normalization_removes_at_most_one_char(input in ".*") {
            let name = ModuleName::new(&input);
            prop_assert!(input.len() - name.as_str().len() <= 1);
            prop_assert!(input.starts_with(name.as_str()));
        }

        /// Property: a scope built from a name always includes that name
        #[test]
        fn scope_includes_its_own_target(input in "[a-z0-9_.-]+/?") {
            let scope = Scope::from(clean_module_name(Some(&input)));
            prop_assert!(scope.includes(&ModuleName::new(&input)));
        }
    }
}
