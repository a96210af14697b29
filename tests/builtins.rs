//! `read`/`free`/`exit`/`print`/`println` argument typing.

use wacc::error::ErrorKind;

#[test]
fn exit_requires_an_int_argument() {
    test_utils::check_fails("begin int main() is exit true end end", ErrorKind::Type, "");
}

#[test]
fn free_requires_a_pair_or_array() {
    test_utils::check_fails(
        "begin int main() is int x = 1; free x end end",
        ErrorKind::Type,
        "",
    );
}

#[test]
fn free_accepts_a_pair() {
    test_utils::check_valid(
        "begin int main() is pair(int, int) p = newpair(1, 2); free p end end",
    );
}

#[test]
fn read_rejects_a_literal_target_at_parse_time() {
    test_utils::check_fails("begin int main() is read 3 end end", ErrorKind::Syntax, "");
}

#[test]
fn print_and_println_accept_any_type() {
    test_utils::check_valid("begin int main() is print 1; println true end end");
}
