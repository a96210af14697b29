//! Symbol-table scoping: shadowing, self-reference, and undefined lookups.

use wacc::error::ErrorKind;

#[test]
fn variable_cannot_reference_itself_in_its_own_initializer() {
    test_utils::check_fails(
        "begin int main() is int x = x end end",
        ErrorKind::Semantic,
        "",
    );
}

#[test]
fn inner_block_may_shadow_an_outer_binding() {
    test_utils::check_valid(
        "begin int main() is int x = 1; begin int x = 2 end end end",
    );
}

#[test]
fn undefined_identifier_is_a_semantic_error() {
    test_utils::check_fails(
        "begin int main() is int x = y end end",
        ErrorKind::Semantic,
        "not defined",
    );
}

#[test]
fn duplicate_definition_in_the_same_scope_is_rejected() {
    test_utils::check_fails(
        "begin int main() is int x = 1; int x = 2 end end",
        ErrorKind::Semantic,
        "",
    );
}

#[test]
fn parameter_is_visible_inside_the_function_body() {
    test_utils::check_valid("begin int f(int x) is return x end end");
}

#[test]
fn forward_reference_to_a_later_function_resolves() {
    test_utils::check_valid(
        "begin int main() is println call g() end; int g() is return 1 end end",
    );
}
