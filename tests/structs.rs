//! Struct definitions and `news` construction.
//!
//! `NewStruct` is parsed but not validated against a declared struct (the
//! checker never looks the name up in the type-definition table) -- these
//! tests pin down that boundary rather than assert a check that isn't there.

#[test]
fn struct_definition_with_multiple_fields_type_checks() {
    test_utils::check_valid(
        "begin struct point is int x; int y end int main() is skip end end",
    );
}

#[test]
fn news_of_an_undeclared_struct_name_still_type_checks() {
    test_utils::check_valid("begin point* p = news point end");
}

#[test]
fn struct_pointer_variable_is_well_typed() {
    test_utils::check_valid(
        "begin struct point is int x; int y end int main() is point* p = news point end end",
    );
}
