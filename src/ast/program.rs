use super::definition::Definition;
use crate::location::LocationData;

/// The parser's final product: a list of top-level definitions plus the
/// location side-table collected while building them.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedProgram {
    pub definitions: Vec<Definition>,
    pub locations: LocationData,
}
