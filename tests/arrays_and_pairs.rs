//! Array and pair typing: element access, `newpair`, and `fst`/`snd`.

use wacc::error::ErrorKind;

#[test]
fn array_literal_elements_must_agree_in_type() {
    test_utils::check_fails(
        "begin int main() is int[] xs = [1, true] end end",
        ErrorKind::Type,
        "",
    );
}

#[test]
fn empty_array_literal_is_the_wildcard_array() {
    test_utils::check_valid("begin int[] xs = [] end");
}

#[test]
fn array_index_must_be_int() {
    test_utils::check_fails(
        "begin int main() is int[] xs = [1, 2]; int x = xs[true] end end",
        ErrorKind::Type,
        "",
    );
}

#[test]
fn indexing_a_non_array_is_a_type_error() {
    test_utils::check_fails(
        "begin int main() is int x = 1; int y = x[0] end end",
        ErrorKind::Type,
        "",
    );
}

#[test]
fn newpair_projects_fst_and_snd_types() {
    test_utils::check_valid(
        "begin pair(int, bool) p = newpair(1, true) end",
    );
}

#[test]
fn fst_on_a_non_pair_is_a_type_error() {
    test_utils::check_fails(
        "begin int main() is int x = 1; int y = fst x end end",
        ErrorKind::Type,
        "",
    );
}

#[test]
fn reading_into_an_array_element_is_allowed() {
    test_utils::check_valid(
        "begin int main() is int[] xs = [1, 2]; read xs[0] end end",
    );
}
