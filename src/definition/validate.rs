//! Declaration checks run before the transition table is compiled.
//!
//! Uses `Validation` to accumulate every issue instead of stopping at the
//! first one.

use crate::core::StateName;
use crate::definition::decl::StateDecl;
use crate::definition::error::DefinitionIssue;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<DefinitionIssue>>;

/// Check a non-empty declaration list, reporting all issues at once.
pub(crate) fn validate(decls: &[StateDecl]) -> Validation<(), NonEmptyVec<DefinitionIssue>> {
    let declared: HashSet<&StateName> = decls.iter().map(|decl| &decl.name).collect();
    let mut seen: HashSet<&StateName> = HashSet::new();
    let mut checks: Vec<Check> = Vec::new();

    for decl in decls {
        checks.push(if decl.name.is_wildcard() {
            Validation::fail(DefinitionIssue::ReservedName)
        } else {
            Validation::success(())
        });

        checks.push(if seen.insert(&decl.name) {
            Validation::success(())
        } else {
            Validation::fail(DefinitionIssue::DuplicateState {
                state: decl.name.clone(),
            })
        });

        for (event, target) in &decl.transitions {
            checks.push(if declared.contains(target) {
                Validation::success(())
            } else {
                Validation::fail(DefinitionIssue::UnknownTarget {
                    from: decl.name.clone(),
                    event: event.clone(),
                    to: target.clone(),
                })
            });
        }
    }

    Validation::all_vec(checks).map(|_| ())
}
