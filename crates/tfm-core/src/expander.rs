//! Framework expansion: every framework a project can also be treated as.

use crate::framework::FrameworkIdentity;
use crate::provider::FrameworkNameProvider;
use crate::range::FrameworkRange;
use std::collections::{HashSet, VecDeque};
use tfm_schema::FrameworkVersion;

#[derive(Debug, Clone, Copy)]
enum Stage {
    Equivalent,
    EquivalentRange,
    Mapped,
    Subset,
}

const STAGES: [Stage; 4] = [
    Stage::Equivalent,
    Stage::EquivalentRange,
    Stage::Mapped,
    Stage::Subset,
];

/// Expands a framework into the frameworks it implies.
#[derive(Debug, Clone, Copy)]
pub struct FrameworkExpander<'a> {
    names: &'a FrameworkNameProvider,
}

impl<'a> FrameworkExpander<'a> {
    /// Expand using the given tables.
    pub fn new(names: &'a FrameworkNameProvider) -> Self {
        Self { names }
    }

    /// Frameworks one hop away from `framework`.
    ///
    /// In order: direct equivalents, equivalents of lower versions of the
    /// same family, the upper bound of every one-way mapping that applies,
    /// and the subset identifiers at the same version and profile. The
    /// iterator is lazy, yields each framework once and never yields
    /// `framework` itself.
    pub fn expand(&self, framework: &FrameworkIdentity) -> impl Iterator<Item = FrameworkIdentity> + use<'a> {
        let names = self.names;
        let source = framework.clone();
        let mut seen: HashSet<FrameworkIdentity> = HashSet::from([framework.clone()]);

        STAGES
            .into_iter()
            .flat_map(move |stage| Self::stage(names, stage, &source))
            .filter(move |candidate| seen.insert(candidate.clone()))
    }

    fn stage(
        names: &FrameworkNameProvider,
        stage: Stage,
        framework: &FrameworkIdentity,
    ) -> Vec<FrameworkIdentity> {
        match stage {
            Stage::Equivalent => names.equivalent_frameworks(framework),
            Stage::EquivalentRange => {
                let range = FrameworkRange::new(
                    framework.at_version(FrameworkVersion::EMPTY),
                    framework.clone(),
                );
                names.equivalent_frameworks_in_range(&range)
            }
            Stage::Mapped => names
                .compatibility_mappings(framework)
                .map(|supports| supports.max().clone())
                .collect(),
            Stage::Subset => names
                .subset_frameworks(framework.name())
                .iter()
                .map(|subset| framework.renamed(subset.clone()))
                .collect(),
        }
    }

    /// Every framework reachable from `framework` through repeated
    /// expansion, in discovery order, excluding `framework` itself.
    pub fn expand_transitive(&self, framework: &FrameworkIdentity) -> Vec<FrameworkIdentity> {
        let mut seen: HashSet<FrameworkIdentity> = HashSet::from([framework.clone()]);
        let mut result = Vec::new();
        let mut queue = VecDeque::from([framework.clone()]);

        while let Some(current) = queue.pop_front() {
            for next in self.expand(&current) {
                if seen.insert(next.clone()) {
                    result.push(next.clone());
                    queue.push_back(next);
                }
            }
        }

        tracing::trace!(
            framework = %self.names.short_folder_name(framework),
            expanded = result.len(),
            "Expanded framework"
        );

        result
    }
}
