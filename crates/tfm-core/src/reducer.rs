//! Set operations over frameworks: nearest match and reduction.

use crate::compat::CompatibilityProvider;
use crate::framework::FrameworkIdentity;
use crate::provider::FrameworkNameProvider;
use std::cmp::Ordering;
use std::collections::HashSet;
use tfm_schema::identifier::ids;
use tfm_schema::FrameworkVersion;

/// Nearest-match selection and framework set reduction.
#[derive(Debug, Clone, Copy)]
pub struct FrameworkReducer<'a> {
    names: &'a FrameworkNameProvider,
    compat: CompatibilityProvider<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Upwards,
    Downwards,
}

impl<'a> FrameworkReducer<'a> {
    /// Reduce using the given tables.
    pub fn new(names: &'a FrameworkNameProvider) -> Self {
        Self {
            names,
            compat: CompatibilityProvider::new(names),
        }
    }

    /// Pick the candidate a project targeting `project` should use.
    ///
    /// Returns one of the `candidates` (the first occurrence when the list
    /// has duplicates), or `None` when none is compatible.
    pub fn get_nearest(
        &self,
        project: &FrameworkIdentity,
        candidates: &[FrameworkIdentity],
    ) -> Option<FrameworkIdentity> {
        let nearest = self.nearest(project, candidates)?;

        tracing::debug!(
            project = %self.names.short_folder_name(project),
            nearest = %self.names.short_folder_name(&nearest),
            candidates = candidates.len(),
            "Selected nearest framework"
        );

        candidates.iter().find(|c| **c == nearest).cloned()
    }

    fn nearest(
        &self,
        project: &FrameworkIdentity,
        candidates: &[FrameworkIdentity],
    ) -> Option<FrameworkIdentity> {
        let mut possible: Vec<&FrameworkIdentity> = candidates.iter().collect();

        // Unsupported only wins when it is the sole choice
        if possible.iter().any(|f| !f.is_unsupported()) {
            possible.retain(|f| !f.is_unsupported());
        }

        if let Some(exact) = possible.iter().find(|f| **f == project) {
            return Some((*exact).clone());
        }

        let mut compatible: Vec<FrameworkIdentity> = possible
            .into_iter()
            .filter(|f| self.compat.is_compatible(project, f))
            .cloned()
            .collect();

        if compatible.iter().any(|f| !f.is_any()) {
            compatible.retain(|f| !f.is_any());
        }

        let mut reduced = self.reduce_upwards(&compatible);

        if reduced.len() > 1 && reduced.iter().any(|f| f.name() == project.name()) {
            reduced.retain(|f| f.name() == project.name());
        }

        if reduced.len() > 1 {
            let portable = reduced.iter().filter(|f| f.is_portable()).count();
            if portable > 0 && portable < reduced.len() {
                reduced.retain(|f| !f.is_portable());
            } else if portable == reduced.len() {
                reduced = if project.is_portable() {
                    self.nearest_portable_for_portable(project, reduced)
                } else {
                    self.nearest_portable_for_framework(project, reduced)
                };

                if reduced.len() > 1 {
                    reduced = self.best_portable(&reduced).into_iter().collect();
                }
            }
        }

        if reduced.len() > 1
            && !project.is_package_based()
            && reduced.iter().any(FrameworkIdentity::is_package_based)
            && reduced.iter().any(|f| !f.is_package_based())
        {
            reduced.retain(|f| !f.is_package_based());
        }

        if reduced.len() > 1 && !reduced.iter().any(FrameworkIdentity::is_portable) {
            reduced = self.reduce_by_profile(project, reduced);
        }

        if reduced.len() > 1 {
            reduced.sort_by(|a, b| {
                self.names
                    .compare_precedence(a, b)
                    .then_with(|| b.cmp(a))
            });
        }

        reduced.into_iter().next()
    }

    /// Prefer the project's own profile, then no profile at all.
    fn reduce_by_profile(
        &self,
        project: &FrameworkIdentity,
        mut reduced: Vec<FrameworkIdentity>,
    ) -> Vec<FrameworkIdentity> {
        if project.has_profile() {
            let same: Vec<FrameworkIdentity> = reduced
                .iter()
                .filter(|f| f.name() == project.name() && f.profile() == project.profile())
                .cloned()
                .collect();
            if !same.is_empty() {
                reduced = same;
            }
        }

        if reduced.len() > 1
            && reduced.iter().any(FrameworkIdentity::has_profile)
            && reduced.iter().any(|f| !f.has_profile())
        {
            reduced.retain(|f| !f.has_profile());
        }

        reduced
    }

    /// A regular project choosing among portable candidates: find the
    /// nearest member framework and keep the profiles that contain it.
    fn nearest_portable_for_framework(
        &self,
        project: &FrameworkIdentity,
        reduced: Vec<FrameworkIdentity>,
    ) -> Vec<FrameworkIdentity> {
        let members = distinct_members(&reduced);

        match self.nearest(project, &members) {
            Some(nearest) => {
                let filtered: Vec<FrameworkIdentity> = reduced
                    .iter()
                    .filter(|f| contains_member(f, &nearest))
                    .cloned()
                    .collect();
                if filtered.is_empty() {
                    reduced
                } else {
                    filtered
                }
            }
            None => reduced,
        }
    }

    /// A portable project choosing among portable candidates: each of the
    /// project's member frameworks votes for the candidates containing its
    /// nearest member.
    fn nearest_portable_for_portable(
        &self,
        project: &FrameworkIdentity,
        reduced: Vec<FrameworkIdentity>,
    ) -> Vec<FrameworkIdentity> {
        let Some(profile) = project.portable_profile() else {
            return reduced;
        };

        let required: Vec<FrameworkIdentity> = profile.required().cloned().collect();
        let members = distinct_members(&reduced);
        let mut scores = vec![0usize; reduced.len()];

        for sub in self.reduce_equivalent(&required) {
            if let Some(nearest) = self.nearest(&sub, &members) {
                for (score, candidate) in scores.iter_mut().zip(&reduced) {
                    if contains_member(candidate, &nearest) {
                        *score += 1;
                    }
                }
            }
        }

        let best = scores.iter().copied().max().unwrap_or(0);
        if best == 0 {
            return reduced;
        }

        reduced
            .into_iter()
            .zip(scores)
            .filter(|(_, score)| *score == best)
            .map(|(candidate, _)| candidate)
            .collect()
    }

    fn best_portable(&self, candidates: &[FrameworkIdentity]) -> Option<FrameworkIdentity> {
        let mut best: Option<&FrameworkIdentity> = None;
        for candidate in candidates {
            best = match best {
                Some(current) if !self.is_better_portable(current, candidate) => Some(current),
                _ => Some(candidate),
            };
        }
        best.cloned()
    }

    /// True when `considering` should replace `current` as the best
    /// portable candidate.
    fn is_better_portable(&self, current: &FrameworkIdentity, considering: &FrameworkIdentity) -> bool {
        let (Some(current_profile), Some(considering_profile)) =
            (current.portable_profile(), considering.portable_profile())
        else {
            return false;
        };

        let current_required: Vec<&FrameworkIdentity> = current_profile.required().collect();
        let considering_required: Vec<&FrameworkIdentity> = considering_profile.required().collect();

        // fewer members means a broader surface area
        match considering_required.len().cmp(&current_required.len()) {
            Ordering::Less => return true,
            Ordering::Greater => return false,
            Ordering::Equal => {}
        }

        // more shared identifiers at a higher version
        let mut higher = 0usize;
        let mut lower = 0usize;
        for member in &considering_required {
            if let Some(other) = current_required.iter().find(|f| f.name() == member.name()) {
                match member.version().cmp(&other.version()) {
                    Ordering::Greater => higher += 1,
                    Ordering::Less => lower += 1,
                    Ordering::Equal => {}
                }
            }
        }
        match higher.cmp(&lower) {
            Ordering::Greater => return true,
            Ordering::Less => return false,
            Ordering::Equal => {}
        }

        // the higher .NET Framework version
        match net_version(&considering_required).cmp(&net_version(&current_required)) {
            Ordering::Greater => return true,
            Ordering::Less => return false,
            Ordering::Equal => {}
        }

        // stable fallback on the folder name
        let current_name = self.names.short_folder_name(current);
        let considering_name = self.names.short_folder_name(considering);
        considering_name.to_ascii_lowercase() < current_name.to_ascii_lowercase()
    }

    /// Remove every framework that some other member of the set can
    /// consume. What remains are the most specific frameworks.
    pub fn reduce_upwards(&self, frameworks: &[FrameworkIdentity]) -> Vec<FrameworkIdentity> {
        self.reduce_core(frameworks, Direction::Upwards)
    }

    /// Remove every framework that can consume some other member of the
    /// set. What remains are the least specific frameworks.
    pub fn reduce_downwards(&self, frameworks: &[FrameworkIdentity]) -> Vec<FrameworkIdentity> {
        self.reduce_core(frameworks, Direction::Downwards)
    }

    fn reduce_core(&self, frameworks: &[FrameworkIdentity], direction: Direction) -> Vec<FrameworkIdentity> {
        let input = distinct(frameworks);

        // `covers(x, y)`: y makes x redundant in this direction
        let covers = |x: &FrameworkIdentity, y: &FrameworkIdentity| match direction {
            Direction::Upwards => self.compat.is_compatible(y, x),
            Direction::Downwards => self.compat.is_compatible(x, y),
        };

        let mut result: Vec<FrameworkIdentity> = input
            .iter()
            .enumerate()
            .filter(|&(i, x)| {
                !input.iter().enumerate().any(|(j, y)| {
                    i != j && covers(x, y) && (!covers(y, x) || x.version() < y.version())
                })
            })
            .map(|(_, x)| x.clone())
            .collect();

        result.sort_by(|a, b| {
            a.name()
                .cmp(b.name())
                .then_with(|| self.names.full_name(a).cmp(&self.names.full_name(b)))
        });

        result
    }

    /// Collapse equivalent frameworks, keeping the representative the
    /// equivalence precedence list prefers.
    pub fn reduce_equivalent(&self, frameworks: &[FrameworkIdentity]) -> Vec<FrameworkIdentity> {
        let mut ordered = frameworks.to_vec();
        ordered.sort_by(|a, b| {
            self.names
                .compare_equivalent_precedence(a, b)
                .then_with(|| b.cmp(a))
        });

        let mut duplicates: HashSet<FrameworkIdentity> = HashSet::new();
        let mut result = Vec::new();

        for framework in ordered {
            if duplicates.contains(&framework) {
                continue;
            }
            duplicates.extend(self.names.equivalent_closure(&framework));
            duplicates.insert(framework.clone());
            result.push(framework);
        }

        result
    }

    /// Partition the set into groups of mutually comparable frameworks.
    ///
    /// Two frameworks share a group when either can consume the other,
    /// directly or through a chain of other members. Shared targets
    /// (portable libraries, `native`, the `dotnet` and `netstandard`
    /// contracts and the special identities) only link to their own
    /// identifier, so unrelated families that both consume one stay apart.
    /// Groups are ordered by the precedence of their first member; within a
    /// group the framework that can consume the most other members comes
    /// first.
    pub fn reduce(&self, frameworks: &[FrameworkIdentity]) -> Vec<Vec<FrameworkIdentity>> {
        let input = distinct(frameworks);
        let count = input.len();

        let mut parent: Vec<usize> = (0..count).collect();
        let mut consumes = vec![0usize; count];
        for (i, project) in input.iter().enumerate() {
            for (j, package) in input.iter().enumerate() {
                if i == j || !self.compat.is_compatible(project, package) {
                    continue;
                }
                consumes[i] += 1;
                if project.name() != package.name()
                    && (is_shared_target(project) || is_shared_target(package))
                {
                    continue;
                }
                let (a, b) = (find_root(&mut parent, i), find_root(&mut parent, j));
                if a != b {
                    parent[b] = a;
                }
            }
        }

        let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
        for i in 0..count {
            let root = find_root(&mut parent, i);
            match groups.iter_mut().find(|(r, _)| *r == root) {
                Some((_, members)) => members.push(i),
                None => groups.push((root, vec![i])),
            }
        }

        let mut groups: Vec<Vec<FrameworkIdentity>> = groups
            .into_iter()
            .map(|(_, mut members)| {
                members.sort_by(|&a, &b| {
                    consumes[b]
                        .cmp(&consumes[a])
                        .then_with(|| self.names.compare_precedence(&input[a], &input[b]))
                        .then_with(|| input[b].cmp(&input[a]))
                });
                members.into_iter().map(|i| input[i].clone()).collect()
            })
            .collect();

        groups.sort_by(|a, b| match (a.first(), b.first()) {
            (Some(x), Some(y)) => self.names.compare_precedence(x, y),
            _ => Ordering::Equal,
        });

        groups
    }
}

/// Frameworks consumable by many unrelated families.
fn is_shared_target(framework: &FrameworkIdentity) -> bool {
    !framework.is_specific()
        || framework.is_portable()
        || [ids::NATIVE, ids::NET_PLATFORM, ids::NET_STANDARD]
            .iter()
            .any(|id| framework.name().is(id))
}

/// Union-find root lookup with path halving.
fn find_root(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

fn net_version(required: &[&FrameworkIdentity]) -> Option<FrameworkVersion> {
    required
        .iter()
        .find(|f| f.name().is(ids::NET))
        .map(|f| f.version())
}

/// Order-preserving deduplication.
fn distinct(frameworks: &[FrameworkIdentity]) -> Vec<FrameworkIdentity> {
    let mut seen = HashSet::new();
    frameworks
        .iter()
        .filter(|f| seen.insert((*f).clone()))
        .cloned()
        .collect()
}

/// Every member of the given portable frameworks, optional ones included.
fn distinct_members(portables: &[FrameworkIdentity]) -> Vec<FrameworkIdentity> {
    let members: Vec<FrameworkIdentity> = portables
        .iter()
        .filter_map(FrameworkIdentity::portable_profile)
        .flat_map(|p| p.frameworks().iter().cloned())
        .collect();
    distinct(&members)
}

fn contains_member(portable: &FrameworkIdentity, member: &FrameworkIdentity) -> bool {
    portable
        .portable_profile()
        .is_some_and(|p| p.frameworks().contains(member))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(names: &FrameworkNameProvider, tokens: &[&str]) -> Vec<FrameworkIdentity> {
        tokens.iter().map(|t| names.parse(t).unwrap()).collect()
    }

    fn nearest(project: &str, candidates: &[&str]) -> Option<String> {
        let names = FrameworkNameProvider::with_defaults();
        let reducer = FrameworkReducer::new(&names);
        let project = names.parse(project).unwrap();
        let candidates = parse_all(&names, candidates);
        reducer
            .get_nearest(&project, &candidates)
            .map(|f| names.short_folder_name(&f))
    }

    #[test]
    fn test_nearest_prefers_highest_compatible() {
        assert_eq!(
            nearest("net45", &["net20", "net35", "net40", "net451"]).as_deref(),
            Some("net40")
        );
        assert_eq!(nearest("net40", &["net45"]), None);
    }

    #[test]
    fn test_nearest_exact_match() {
        assert_eq!(nearest("net45", &["net40", "net45"]).as_deref(), Some("net45"));
    }

    #[test]
    fn test_nearest_unsupported_and_any() {
        assert_eq!(
            nearest("net45", &["unsupported", "any"]).as_deref(),
            Some("any")
        );
        assert_eq!(nearest("net45", &["any", "net40"]).as_deref(), Some("net40"));
        assert_eq!(nearest("net45", &["unsupported"]), None);
    }

    #[test]
    fn test_nearest_client_profile() {
        assert_eq!(
            nearest("net40-client", &["net40", "net40-client"]).as_deref(),
            Some("net40-client")
        );
        assert_eq!(
            nearest("net45", &["net40", "net40-client"]).as_deref(),
            Some("net40")
        );
    }

    #[test]
    fn test_nearest_prefers_regular_over_portable() {
        assert_eq!(
            nearest("net45", &["portable-net45+win8", "net40"]).as_deref(),
            Some("net40")
        );
    }

    #[test]
    fn test_reduce_upwards() {
        let names = FrameworkNameProvider::with_defaults();
        let reducer = FrameworkReducer::new(&names);
        let input = parse_all(&names, &["net45", "net40", "net35", "win8", "win81"]);
        let reduced = reducer.reduce_upwards(&input);
        assert_eq!(reduced, parse_all(&names, &["net45", "win81"]));
    }

    #[test]
    fn test_reduce_downwards() {
        let names = FrameworkNameProvider::with_defaults();
        let reducer = FrameworkReducer::new(&names);
        let input = parse_all(&names, &["net45", "net40", "net35", "win8", "win81"]);
        let reduced = reducer.reduce_downwards(&input);
        assert_eq!(reduced, parse_all(&names, &["net35", "win8"]));
    }

    #[test]
    fn test_reduce_equivalent_precedence() {
        let names = FrameworkNameProvider::with_defaults();
        let reducer = FrameworkReducer::new(&names);
        let input = parse_all(
            &names,
            &["netcore45", "winrt45", "win8", "win", "netcore", "net45"],
        );
        assert_eq!(
            reducer.reduce_equivalent(&input),
            parse_all(&names, &["win8", "net45"])
        );
    }

    #[test]
    fn test_reduce_groups() {
        let names = FrameworkNameProvider::with_defaults();
        let reducer = FrameworkReducer::new(&names);
        let input = parse_all(&names, &["net35", "wp8", "net40", "net45", "wp81"]);
        let groups = reducer.reduce(&input);
        assert_eq!(
            groups,
            vec![
                parse_all(&names, &["net45", "net40", "net35"]),
                parse_all(&names, &["wp81", "wp8"]),
            ]
        );
    }

    #[test]
    fn test_reduce_keeps_siblings_apart_across_shared_targets() {
        let names = FrameworkNameProvider::with_defaults();
        let reducer = FrameworkReducer::new(&names);

        let groups = reducer.reduce(&parse_all(&names, &["dnx451", "dnxcore50", "native"]));
        assert_eq!(groups.len(), 3);

        let groups = reducer.reduce(&parse_all(&names, &["wp8", "win8", "portable-win8+wp8"]));
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.len() == 1));

        let groups = reducer.reduce(&parse_all(
            &names,
            &["portable-net45+win8", "portable-net451+win81", "dotnet5.2", "dotnet5.4"],
        ));
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.len() == 2));
    }
}
