//! Relations command implementation.

use crate::output::Formatter;
use kinship_domain::{Relation, Sex, Side};

/// Every relation kind, males first within each family.
pub fn supported_relations() -> Vec<Relation> {
    let mut relations = Vec::new();
    for sex in [Sex::Male, Sex::Female] {
        relations.push(Relation::Sibling(sex));
        relations.push(Relation::HalfSibling(sex));
        relations.push(Relation::Child(sex));
        relations.push(Relation::NieceOrNephew(sex));
        relations.push(Relation::FirstCousin(sex));
        relations.push(Relation::Grandchild(sex));
        for side in [None, Some(Side::Maternal), Some(Side::Paternal)] {
            relations.push(Relation::AuntOrUncle { sex, side });
        }
    }
    relations
}

/// Execute the relations command.
pub fn execute_relations(formatter: &Formatter) {
    println!("{}", formatter.format_relations(&supported_relations()));
}
