//! End-to-end checks exercised through the public `wacc::compile` entry
//! point rather than the inline unit tests inside `checker::mod`.

use wacc::error::ErrorKind;

#[test]
fn bad_top_level_reassignment_is_a_syntax_error() {
    test_utils::check_fails(
        "begin int x = 3; x = x + 1 end",
        ErrorKind::Syntax,
        "",
    );
}

#[test]
fn no_main_but_return_type_mismatch_is_a_type_error() {
    test_utils::check_fails("begin int f() is return true end end", ErrorKind::Type, "");
}

#[test]
fn missing_return_on_one_branch_is_semantic() {
    test_utils::check_fails(
        "begin int f() is if true then return 1 else skip fi end end",
        ErrorKind::Semantic,
        "not all code paths return",
    );
}

#[test]
fn main_cannot_return_a_value() {
    test_utils::check_fails(
        "begin int main() is return 0 end end",
        ErrorKind::Semantic,
        "cannot return a value from the global scope",
    );
}

#[test]
fn two_definitions_both_type_check() {
    test_utils::check_valid(
        "begin int main() is skip end; int f(int x) is return x + 1 end end",
    );
}

#[test]
fn desugared_for_loop_type_checks() {
    test_utils::check_valid(
        "begin int main() is for (int i = 0; i < 10; i = i + 1) do skip done end end",
    );
}
